//! 1-D Gaussian and first-derivative-of-Gaussian kernels
//!
//! Conventions:
//! - `radius = round(truncate * sigma)`, so the kernel has `2 * radius + 1` taps.
//! - The smoothing kernel `g` is normalized to unit sum.
//! - The derivative kernel is `dg[i] = -(x / sigma^2) * g[i]` with the
//!   normalized `g`; it sums to zero and is odd about the center.
//!
//! Kernels are indexed by offset: `weights[radius + k]` is the weight at
//! offset `k`, applied as a convolution (`out[i] = sum_k w[k] * in[i - k]`),
//! so the derivative kernel responds positively to increasing signals.

use crate::{FilterError, FilterResult};

/// Kernel half-width in units of sigma.
pub const DEFAULT_TRUNCATE: f32 = 4.0;

/// Which Gaussian to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaussianOrder {
    /// Plain smoothing kernel
    #[default]
    Smooth,
    /// First derivative of the smoothing kernel
    FirstDerivative,
}

/// A symmetric 1-D kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl Kernel1D {
    /// The identity kernel (a single tap of weight 1).
    pub fn identity() -> Self {
        Self {
            radius: 0,
            weights: vec![1.0],
        }
    }

    /// Weight at offset `k` from the center.
    #[inline]
    pub fn at(&self, k: isize) -> f32 {
        self.weights[(self.radius as isize + k) as usize]
    }
}

/// Build a Gaussian kernel of the given `sigma` and `order`
///
/// A `sigma` of 0 gives the identity for [`GaussianOrder::Smooth`].
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `sigma` is negative or not
/// finite, or if a derivative is requested with `sigma == 0`.
pub fn gaussian_kernel(sigma: f32, order: GaussianOrder, truncate: f32) -> FilterResult<Kernel1D> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FilterError::InvalidKernel(format!(
            "sigma must be finite and >= 0, got {}",
            sigma
        )));
    }
    if sigma == 0.0 {
        return match order {
            GaussianOrder::Smooth => Ok(Kernel1D::identity()),
            GaussianOrder::FirstDerivative => Err(FilterError::InvalidKernel(
                "derivative kernel needs sigma > 0".to_string(),
            )),
        };
    }

    let radius = ((truncate * sigma + 0.5) as usize).max(1);
    let sigma2 = sigma * sigma;
    let mut g: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-(x * x) / (2.0 * sigma2)).exp()
        })
        .collect();
    let sum: f32 = g.iter().sum();
    for v in &mut g {
        *v /= sum;
    }

    let weights = match order {
        GaussianOrder::Smooth => g,
        GaussianOrder::FirstDerivative => g
            .iter()
            .enumerate()
            .map(|(i, &gi)| {
                let x = i as f32 - radius as f32;
                -(x / sigma2) * gi
            })
            .collect(),
    };

    Ok(Kernel1D { radius, weights })
}
