//! pageseg-region - Region processing for page segmentation
//!
//! This crate provides the region-level building blocks of the segmenter:
//!
//! - **Connected component analysis** - labeling, bounds, sizes, noise removal
//! - **Region selection** - keeping the widest or tallest components
//! - **Label propagation** - growing seed labels through whole components
//! - **Label spreading** - distance-limited nearest-label assignment
//!
//! # Examples
//!
//! ```
//! use pageseg_core::Bitmap;
//! use pageseg_region::{ConnectivityType, find_connected_components};
//!
//! let bm = Bitmap::from_data(5, 1, vec![1, 1, 0, 0, 1]).unwrap();
//! let components = find_connected_components(&bm, ConnectivityType::FourWay).unwrap();
//! assert_eq!(components.len(), 2);
//! assert_eq!(components[0].pixel_count, 2);
//! ```

pub mod conncomp;
mod error;
pub mod label;
pub mod propagate;
pub mod select;
pub mod spread;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, find_connected_components, label_connected_components,
    remove_small_components,
};
pub use error::{RegionError, RegionResult};
pub use label::{get_component_bounds, get_component_sizes};
pub use propagate::{PixelLabel, PropagatedLabels, propagate_labels};
pub use select::{RegionMeasure, select_regions};
pub use spread::spread_labels;
