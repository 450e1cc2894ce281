//! GrayImage - 8-bit grayscale page images
//!
//! Used for the optional normalized grayscale companion of a page, from
//! which grayscale line crops are cut.

use crate::box_::Box;
use crate::error::{Error, Result};

/// 8-bit grayscale image, row-major with no padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    /// Create an image with every pixel set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Create an image from row-major samples.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
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
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = (y * self.width + x) as usize;
        self.data[idx] = value;
    }

    /// Copy out the region `b`; pixels outside the image become `fill`.
    pub fn crop(&self, b: Box, fill: u8) -> Result<GrayImage> {
        if b.is_empty() {
            return Err(Error::InvalidDimension {
                width: b.w.max(0) as u32,
                height: b.h.max(0) as u32,
            });
        }
        let mut out = GrayImage::new_with_value(b.w as u32, b.h as u32, fill)?;
        for dy in 0..b.h {
            let sy = b.y + dy;
            if sy < 0 || sy >= self.height as i32 {
                continue;
            }
            for dx in 0..b.w {
                let sx = b.x + dx;
                if sx >= 0 && sx < self.width as i32 {
                    let v = self.data[(sy as u32 * self.width + sx as u32) as usize];
                    out.set_pixel_unchecked(dx as u32, dy as u32, v);
                }
            }
        }
        Ok(out)
    }
}
