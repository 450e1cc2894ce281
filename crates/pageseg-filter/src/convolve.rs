//! Separable convolution
//!
//! Convolves an [`FPix`] with one 1-D kernel along x and another along y.
//! Samples beyond the border are mirrored (`d c b a | a b c d | d c b a`).

use crate::kernel::{DEFAULT_TRUNCATE, GaussianOrder, Kernel1D, gaussian_kernel};
use crate::FilterResult;
use pageseg_core::FPix;

/// Image axis along which a 1-D filter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along rows (horizontal)
    X,
    /// Along columns (vertical)
    Y,
}

/// Mirror an out-of-range index back into `0..n`.
#[inline]
pub(crate) fn reflect_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}

/// Run `op(src_line, dst_line)` over every row (`Axis::X`) or column
/// (`Axis::Y`) of `f`, collecting the outputs into a new image.
pub(crate) fn map_lines(f: &FPix, axis: Axis, mut op: impl FnMut(&[f32], &mut [f32])) -> FPix {
    let (w, h) = (f.width() as usize, f.height() as usize);
    let mut out = f.clone();
    match axis {
        Axis::X => {
            let src = f.data();
            let dst = out.data_mut();
            for y in 0..h {
                op(&src[y * w..(y + 1) * w], &mut dst[y * w..(y + 1) * w]);
            }
        }
        Axis::Y => {
            let mut line = vec![0.0f32; h];
            let mut res = vec![0.0f32; h];
            for x in 0..w {
                for (y, v) in line.iter_mut().enumerate() {
                    *v = f.data()[y * w + x];
                }
                op(&line, &mut res);
                let dst = out.data_mut();
                for (y, &v) in res.iter().enumerate() {
                    dst[y * w + x] = v;
                }
            }
        }
    }
    out
}

/// Convolve every line of `f` along `axis` with `kernel`.
pub fn convolve_axis(f: &FPix, axis: Axis, kernel: &Kernel1D) -> FPix {
    if kernel.radius == 0 && kernel.weights[0] == 1.0 {
        return f.clone();
    }
    let r = kernel.radius as isize;
    map_lines(f, axis, |src, dst| {
        let n = src.len();
        for (i, d) in dst.iter_mut().enumerate() {
            let i = i as isize;
            let mut acc = 0.0f32;
            for k in -r..=r {
                acc += kernel.at(k) * src[reflect_index(i - k, n)];
            }
            *d = acc;
        }
    })
}

/// Anisotropic Gaussian filter with optional first derivatives
///
/// # Arguments
///
/// * `sigma_x`, `sigma_y` - Standard deviations along x and y (0 = no smoothing)
/// * `order_x`, `order_y` - Smoothing or first derivative along each axis
///
/// # Errors
///
/// Returns an error if a sigma is invalid for the requested order.
pub fn gaussian_filter(
    f: &FPix,
    sigma_x: f32,
    sigma_y: f32,
    order_x: GaussianOrder,
    order_y: GaussianOrder,
) -> FilterResult<FPix> {
    let kx = gaussian_kernel(sigma_x, order_x, DEFAULT_TRUNCATE)?;
    let ky = gaussian_kernel(sigma_y, order_y, DEFAULT_TRUNCATE)?;
    let tmp = convolve_axis(f, Axis::X, &kx);
    Ok(convolve_axis(&tmp, Axis::Y, &ky))
}

/// Scale `f` so that its maximum becomes 1.
///
/// Images whose maximum is not positive are returned unchanged.
pub fn norm_max(f: &FPix) -> FPix {
    let m = f.max_value();
    if m > 0.0 {
        f.map(|v| v / m)
    } else {
        f.clone()
    }
}
