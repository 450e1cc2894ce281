//! pageseg-core - Basic data structures for page segmentation
//!
//! This crate provides the image containers shared by every stage of the
//! text-line segmenter:
//!
//! - [`Bitmap`] / [`BitmapMut`] - Binary page image (immutable / mutable)
//! - [`GrayImage`] - 8-bit grayscale page image
//! - [`FPix`] - Floating-point image for smoothed and gradient maps
//! - [`LabelMap`] - Integer label image (components, seeds, lines)
//! - [`Box`] - Rectangle regions
//!
//! All containers are row-major with `y` growing downward.

pub mod bitmap;
pub mod box_;
pub mod error;
pub mod fpix;
pub mod gray;
pub mod label;

pub use bitmap::{Bitmap, BitmapMut};
pub use box_::Box;
pub use error::{Error, Result, check_same_size};
pub use fpix::FPix;
pub use gray::GrayImage;
pub use label::LabelMap;
