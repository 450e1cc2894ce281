//! LabelMap - Integer label images
//!
//! A `LabelMap` assigns a `u32` label to every pixel; 0 means
//! "no label". It carries connected-component labelings, seed
//! labelings and the final per-pixel line segmentation.

use crate::bitmap::Bitmap;
use crate::box_::Box;
use crate::error::{Error, Result, check_same_size};

/// Row-major `u32` label image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl LabelMap {
    /// Create an all-zero label map.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Create a label map from row-major labels.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Label at (x, y), or `None` outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, label: u32) {
        let idx = (y * self.width + x) as usize;
        self.data[idx] = label;
    }

    /// Largest label present (0 for an unlabeled map).
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Number of labeled (nonzero) pixels.
    pub fn count_labeled(&self) -> usize {
        self.data.iter().filter(|&&l| l != 0).count()
    }

    /// Bitmap of labeled pixels.
    pub fn to_mask(&self) -> Bitmap {
        let data = self.data.iter().map(|&l| (l != 0) as u8).collect();
        Bitmap::from_raw(self.width, self.height, data)
    }

    /// Bitmap of the pixels carrying `label`.
    pub fn mask_of(&self, label: u32) -> Bitmap {
        let data = self.data.iter().map(|&l| (l == label) as u8).collect();
        Bitmap::from_raw(self.width, self.height, data)
    }

    /// Zero every label that falls on background of `mask`.
    pub fn masked_by(&self, mask: &Bitmap) -> Result<LabelMap> {
        check_same_size(self.dimensions(), mask.dimensions())?;
        let data = self
            .data
            .iter()
            .zip(mask.data())
            .map(|(&l, &m)| if m != 0 { l } else { 0 })
            .collect();
        Ok(LabelMap {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Apply a lookup table: each label `l` becomes `table[l]`.
    ///
    /// Labels beyond the end of the table map to 0.
    pub fn relabel(&self, table: &[u32]) -> LabelMap {
        let data = self
            .data
            .iter()
            .map(|&l| table.get(l as usize).copied().unwrap_or(0))
            .collect();
        LabelMap {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Copy out region `b` (clipped to the image).
    pub fn crop(&self, b: Box) -> Result<LabelMap> {
        let b = b
            .clip(self.width as i32, self.height as i32)
            .ok_or_else(|| Error::InvalidParameter(format!("box {:?} outside label map", b)))?;
        let mut data = Vec::with_capacity(b.area() as usize);
        for y in b.y..b.bottom() {
            let start = (y as u32 * self.width) as usize;
            data.extend_from_slice(&self.data[start + b.x as usize..start + b.right() as usize]);
        }
        LabelMap::from_data(b.w as u32, b.h as u32, data)
    }
}
