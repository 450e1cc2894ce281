//! Box (block average) filter using running sums
//!
//! Runs in O(1) per pixel regardless of the window size. A window of
//! length `n` centered at `i` covers `[i - n/2, i - n/2 + n - 1]`; samples
//! beyond the border are mirrored.

use crate::convolve::{Axis, map_lines, reflect_index};
use crate::{FilterError, FilterResult};
use pageseg_core::FPix;

/// Average `f` over a `size_x` x `size_y` window.
///
/// A size of 1 leaves that axis untouched.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if either size is 0.
pub fn uniform_filter(f: &FPix, size_x: u32, size_y: u32) -> FilterResult<FPix> {
    if size_x == 0 || size_y == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window sizes must be positive: {}x{}",
            size_x, size_y
        )));
    }
    let mut out = f.clone();
    if size_x > 1 {
        out = uniform_axis(&out, Axis::X, size_x as usize);
    }
    if size_y > 1 {
        out = uniform_axis(&out, Axis::Y, size_y as usize);
    }
    Ok(out)
}

fn uniform_axis(f: &FPix, axis: Axis, size: usize) -> FPix {
    let mut prefix: Vec<f64> = Vec::new();
    map_lines(f, axis, |src, dst| {
        let n = src.len();
        let offset = (size / 2) as isize;
        prefix.clear();
        prefix.push(0.0);
        let mut acc = 0.0f64;
        for j in 0..(n + size - 1) {
            acc += src[reflect_index(j as isize - offset, n)] as f64;
            prefix.push(acc);
        }
        let norm = size as f64;
        for (i, d) in dst.iter_mut().enumerate() {
            *d = ((prefix[i + size] - prefix[i]) / norm) as f32;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_odd_window() {
        let f = FPix::from_data(5, 1, vec![0.0, 0.0, 3.0, 0.0, 0.0]).unwrap();
        let g = uniform_filter(&f, 3, 1).unwrap();
        assert_eq!(g.data(), &[0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_uniform_even_window_alignment() {
        // Window [i-1, i+0] for size 2.
        let f = FPix::from_data(4, 1, vec![0.0, 2.0, 0.0, 0.0]).unwrap();
        let g = uniform_filter(&f, 2, 1).unwrap();
        assert_eq!(g.data(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_uniform_reflects_border() {
        let f = FPix::from_data(1, 3, vec![3.0, 0.0, 0.0]).unwrap();
        let g = uniform_filter(&f, 1, 3).unwrap();
        // Row 0 sees [3 (mirror), 3, 0].
        assert!((g.get_pixel(0, 0).unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_rejects_zero() {
        let f = FPix::new(3, 3).unwrap();
        assert!(uniform_filter(&f, 0, 1).is_err());
    }
}
