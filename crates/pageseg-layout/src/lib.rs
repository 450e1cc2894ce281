//! pageseg-layout - Text-line segmentation of scanned pages
//!
//! This crate turns a binarized page into labeled text lines in reading
//! order:
//!
//! - **Scale estimation**: median height of character-sized components
//! - **Column separators**: black rules and whitespace gutters
//! - **Line seeds**: bands between baselines and x-heights, one per line
//! - **Label spreading**: growing seeds over the ink of each line
//! - **Reading order**: topological sort of a "precedes" relation
//! - **Export**: per-line crops and an RGB label map
//!
//! # Quick Start
//!
//! ```no_run
//! use pageseg_layout::{PageOptions, segment_page};
//!
//! let page = pageseg_io::read_bitmap("page.bin.png").unwrap();
//! let seg = segment_page(&page, &PageOptions::default()).unwrap();
//! for line in &seg.lines {
//!     println!("line {}: {:?}", line.label, line.bounds);
//! }
//! ```
//!
//! # Modules
//!
//! - [`scale`]: Scale estimation and validation
//! - [`colseps`]: Horizontal rule removal and column separators
//! - [`seeds`]: Box map, gradient maps and line seeds
//! - [`spread`]: Seed spreading over the page ink
//! - [`lines`]: Line bounds and masks
//! - [`order`]: Reading order
//! - [`pipeline`]: The whole page, stage by stage
//! - [`export`]: Writing line crops and the label map

mod check;
pub mod colseps;
mod error;
pub mod export;
pub mod lines;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod scale;
pub mod seeds;
pub mod spread;

pub use check::{MAX_PAGE_SIDE, MIN_PAGE_SIDE, check_page, check_page_image};
pub use error::{LayoutError, LayoutResult};
pub use export::{export_page, gray_path_for, line_id, output_dir_for};
pub use lines::{Line, extract_lines};
pub use options::{
    ColumnOptions, ExportOptions, GradientFilter, LineOptions, OrderMode, OrderOptions,
    PageOptions, ScaleOptions, SeedOptions,
};
pub use order::{order_bounds, reading_order};
pub use pipeline::{PageSegmentation, segment_page};
pub use scale::{estimate_scale, resolve_scale, validate_scale};

// Re-export core for convenience
pub use pageseg_core;

/// A scale-relative length in whole pixels, never below 1
pub(crate) fn px(v: f32) -> u32 {
    (v as u32).max(1)
}
