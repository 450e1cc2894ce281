//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values used for the smoothed and
//! gradient maps computed during segmentation.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The pixel at (x, y)
//! is at index `y * width + x`.

use crate::bitmap::Bitmap;
use crate::error::{Error, Result, check_same_size};

/// Floating-point image
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all pixels set to `value`
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(FPix {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Create a FPix from raw data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected_size = width as usize * height as usize;
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Convert a bitmap to 0.0 / 1.0 values.
    pub fn from_bitmap(bm: &Bitmap) -> FPix {
        FPix {
            width: bm.width(),
            height: bm.height(),
            data: bm.data().iter().map(|&v| v as f32).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get a pixel value
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if (x, y) is outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y * self.width + x) as usize;
        self.data[idx] = value;
    }

    /// Largest value in the image.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Apply `f` to every pixel.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Pixelwise product.
    pub fn mul(&self, other: &FPix) -> Result<FPix> {
        check_same_size(self.dimensions(), other.dimensions())?;
        Ok(FPix {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a * b)
                .collect(),
        })
    }

    /// Pixels strictly greater than `t`.
    pub fn threshold_above(&self, t: f32) -> Bitmap {
        self.to_bitmap(|v| v > t)
    }

    /// Pixels strictly less than `t`.
    pub fn threshold_below(&self, t: f32) -> Bitmap {
        self.to_bitmap(|v| v < t)
    }

    /// Build a bitmap from a per-pixel predicate.
    pub fn to_bitmap(&self, pred: impl Fn(f32) -> bool) -> Bitmap {
        let data = self.data.iter().map(|&v| pred(v) as u8).collect();
        Bitmap::from_raw(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_access() {
        let mut f = FPix::new(4, 3).unwrap();
        f.set_pixel_unchecked(2, 1, 0.5);
        assert_eq!(f.get_pixel(2, 1).unwrap(), 0.5);
        assert!(f.get_pixel(4, 0).is_err());
        assert!(FPix::new(0, 3).is_err());
    }

    #[test]
    fn test_max_and_threshold() {
        let f = FPix::from_data(3, 1, vec![0.1, 0.9, -2.0]).unwrap();
        assert_eq!(f.max_value(), 0.9);
        assert_eq!(f.threshold_above(0.5).data(), &[0, 1, 0]);
        assert_eq!(f.threshold_below(0.0).data(), &[0, 0, 1]);
    }

    #[test]
    fn test_from_bitmap_and_mul() {
        let bm = Bitmap::from_data(2, 1, vec![1, 0]).unwrap();
        let a = FPix::from_bitmap(&bm);
        let b = FPix::from_data(2, 1, vec![3.0, 4.0]).unwrap();
        assert_eq!(a.mul(&b).unwrap().data(), &[3.0, 0.0]);
    }
}
