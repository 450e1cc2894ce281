//! pageseg-morph - Binary morphology for page segmentation
//!
//! Erosion, dilation, opening and closing of [`Bitmap`] images with
//! rectangular ("brick") structuring elements. Bricks are separable, so
//! every operation runs as a horizontal pass followed by a vertical pass,
//! each linear in the image size regardless of the brick dimensions.
//!
//! [`Bitmap`]: pageseg_core::Bitmap

pub mod binary;
mod error;

pub use binary::{close_brick, dilate_brick, erode_brick, open_brick};
pub use error::{MorphError, MorphResult};
