//! Bitmap - Binary page images
//!
//! `Bitmap` holds one byte per pixel, each either 0 (background) or
//! 1 (ink), stored row-major with no padding. The pixel at (x, y) is at
//! index `y * width + x`.
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for cheap cloning between pipeline stages.
//! To modify pixel data, convert to `BitmapMut` via [`Bitmap::try_into_mut`]
//! or [`Bitmap::to_mut`], then convert back with `Into<Bitmap>`.

use crate::box_::Box;
use crate::error::{Error, Result, check_same_size};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct BitmapData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BitmapData {
    fn zeroed(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }
}

/// Immutable binary image (1 = ink)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create an all-background bitmap.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(BitmapData::zeroed(width, height)?),
        })
    }

    /// Create a bitmap from row-major bytes; any nonzero byte is ink.
    pub fn from_data(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
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
        for v in data.iter_mut() {
            *v = (*v != 0) as u8;
        }
        Ok(Self {
            inner: Arc::new(BitmapData {
                width,
                height,
                data,
            }),
        })
    }

    /// Wrap already-normalized bytes; dimensions must be valid.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            inner: Arc::new(BitmapData {
                width,
                height,
                data,
            }),
        }
    }

    /// Create a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Result<Self> {
        let mut inner = BitmapData::zeroed(width, height)?;
        for y in 0..height {
            for x in 0..width {
                inner.data[(y * width + x) as usize] = f(x, y) as u8;
            }
        }
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Raw pixel bytes (0 or 1), row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// One image row.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get a pixel value, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.inner.data[(y * self.inner.width + x) as usize])
        } else {
            None
        }
    }

    /// True if (x, y) lies inside the image and is ink.
    #[inline]
    pub fn is_fg(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.get_pixel(x as u32, y as u32) == Some(1)
    }

    /// Number of ink pixels.
    pub fn count_pixels(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// True if there is no ink at all.
    pub fn is_zero(&self) -> bool {
        self.inner.data.iter().all(|&v| v == 0)
    }

    /// Pixelwise AND.
    pub fn and(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a & b)
    }

    /// Pixelwise OR.
    pub fn or(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a | b)
    }

    /// Pixels set here but not in `other`.
    pub fn subtract(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a & (b ^ 1))
    }

    fn combine(&self, other: &Bitmap, op: impl Fn(u8, u8) -> u8) -> Result<Bitmap> {
        check_same_size(self.dimensions(), other.dimensions())?;
        let data = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Bitmap {
            inner: Arc::new(BitmapData {
                width: self.width(),
                height: self.height(),
                data,
            }),
        })
    }

    /// Swap ink and background.
    pub fn invert(&self) -> Bitmap {
        let data = self.data().iter().map(|&v| v ^ 1).collect();
        Bitmap {
            inner: Arc::new(BitmapData {
                width: self.width(),
                height: self.height(),
                data,
            }),
        }
    }

    /// Copy out the part of the image covered by `b`.
    ///
    /// Pixels of `b` outside the image are filled with `fill`, so the
    /// result always has the size of `b`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `b` is empty.
    pub fn crop(&self, b: Box, fill: bool) -> Result<Bitmap> {
        if b.is_empty() {
            return Err(Error::InvalidDimension {
                width: b.w.max(0) as u32,
                height: b.h.max(0) as u32,
            });
        }
        let fill = fill as u8;
        let mut out = BitmapData::zeroed(b.w as u32, b.h as u32)?;
        for dy in 0..b.h {
            for dx in 0..b.w {
                let (sx, sy) = (b.x + dx, b.y + dy);
                let v = if sx >= 0 && sy >= 0 {
                    self.get_pixel(sx as u32, sy as u32).unwrap_or(fill)
                } else {
                    fill
                };
                out.data[(dy * b.w + dx) as usize] = v;
            }
        }
        Ok(Bitmap {
            inner: Arc::new(out),
        })
    }

    /// Try to take unique ownership for in-place modification.
    ///
    /// Fails (returning `self`) if the data is shared.
    pub fn try_into_mut(self) -> std::result::Result<BitmapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(BitmapMut { inner: data }),
            Err(arc) => Err(Bitmap { inner: arc }),
        }
    }

    /// Create a mutable copy of this bitmap.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable binary image
#[derive(Debug, Clone)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Create an all-background mutable bitmap.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            inner: BitmapData::zeroed(width, height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// One mutable image row.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set a pixel, checking bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_pixel_unchecked(x, y, on);
        Ok(())
    }

    /// Set a pixel; the caller guarantees (x, y) is inside the image.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, on: bool) {
        let idx = (y * self.inner.width + x) as usize;
        self.inner.data[idx] = on as u8;
    }

    /// Set every pixel of `b` (clipped to the image) to `on`.
    pub fn fill_rect(&mut self, b: Box, on: bool) {
        let Some(b) = b.clip(self.inner.width as i32, self.inner.height as i32) else {
            return;
        };
        for y in b.y..b.bottom() {
            let row = self.row_mut(y as u32);
            row[b.x as usize..b.right() as usize].fill(on as u8);
        }
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bm: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bm.inner),
        }
    }
}
