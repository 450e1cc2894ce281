//! pageseg - Text-line segmentation for scanned pages
//!
//! Finds the text lines of a binarized page image, orders them for
//! reading and writes one crop per line, ready for a line recognizer.
//!
//! # Overview
//!
//! - Scale estimation from character-sized components
//! - Column separators from black rules and whitespace gutters
//! - Line seeds from vertical gradients, spread over the page ink
//! - Reading order by topological sort
//! - Line crops and RGB label maps as PNG
//!
//! # Example
//!
//! ```
//! use pageseg::{Bitmap, PageOptions, segment_page};
//!
//! // A blank page has no lines and no usable scale
//! let page = Bitmap::new(800, 1000).unwrap();
//! let opts = PageOptions::default().with_check_page(false);
//! assert!(segment_page(&page, &opts).is_err());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pageseg_core::*;

// The segmenter is the main entry point
pub use pageseg_layout::{
    ColumnOptions, ExportOptions, GradientFilter, LayoutError, LayoutResult, Line, LineOptions,
    OrderMode, OrderOptions, PageOptions, PageSegmentation, ScaleOptions, SeedOptions,
    check_page, check_page_image, export_page, segment_page,
};

// Re-export domain crates as modules to avoid name conflicts
pub use pageseg_filter as filter;
pub use pageseg_io as io;
pub use pageseg_layout as layout;
pub use pageseg_morph as morph;
pub use pageseg_region as region;
