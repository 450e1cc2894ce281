//! pageseg-filter - Separable image filters
//!
//! Filters used to build the smoothed, gradient and rank maps of the
//! segmenter. All of them operate on [`FPix`] (rank filters also on
//! [`Bitmap`]) and are separable: a pass along x followed by a pass
//! along y.
//!
//! - [`kernel`] - 1-D Gaussian and Gaussian-derivative kernels
//! - [`convolve`] - Separable convolution and [`gaussian_filter`]
//! - [`block_conv`] - Running-sum box filter ([`uniform_filter`])
//! - [`rank`] - Running max filter ([`maximum_filter`])
//!
//! Borders are handled by mirror reflection (`d c b a | a b c d | d c b a`)
//! for linear filters and by clipping the window for rank filters.
//!
//! [`FPix`]: pageseg_core::FPix
//! [`Bitmap`]: pageseg_core::Bitmap

pub mod block_conv;
pub mod convolve;
mod error;
pub mod kernel;
pub mod rank;

pub use block_conv::uniform_filter;
pub use convolve::{Axis, convolve_axis, gaussian_filter, norm_max};
pub use error::{FilterError, FilterResult};
pub use kernel::{DEFAULT_TRUNCATE, GaussianOrder, Kernel1D, gaussian_kernel};
pub use rank::{maximum_filter, maximum_filter_bitmap};
