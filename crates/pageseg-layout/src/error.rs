//! Error types for pageseg-layout

use thiserror::Error;

/// Errors that can occur while segmenting a page
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pageseg_core::Error),

    /// Morphology library error
    #[error("morphology error: {0}")]
    Morph(#[from] pageseg_morph::MorphError),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] pageseg_filter::FilterError),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] pageseg_region::RegionError),

    /// Image I/O error
    #[error("io error: {0}")]
    Io(#[from] pageseg_io::IoError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The estimated or given scale is unusable
    #[error("scale {scale} out of range (minimum {min_scale}, must be below 1000)")]
    ScaleOutOfRange { scale: f32, min_scale: f32 },

    /// More line seeds than allowed
    #[error("too many lines: {count} > {max}")]
    TooManyLines { count: usize, max: usize },

    /// The image does not look like a page
    #[error("page check failed: {}", .0.join("; "))]
    PageCheck(Vec<String>),
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
