//! Line extraction from a segmentation

use crate::LayoutResult;
use crate::options::LineOptions;
use pageseg_core::{Bitmap, Box, LabelMap};
use pageseg_region::{get_component_bounds, get_component_sizes};

/// One text line of a segmentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Label of the line in the segmentation
    pub label: u32,
    /// Bounding box on the page
    pub bounds: Box,
    /// Pixels of the line, over `bounds`
    pub mask: Bitmap,
    /// Number of pixels in `mask`
    pub pixel_count: usize,
}

/// Describe every line of `segmentation`, sorted by label
///
/// Labels with no pixels, and lines narrower than `min_width * scale` or
/// shorter than `min_height * scale`, are skipped.
pub fn extract_lines(
    segmentation: &LabelMap,
    scale: f32,
    options: &LineOptions,
) -> LayoutResult<Vec<Line>> {
    let count = segmentation.max_label();
    let bounds = get_component_bounds(segmentation, count);
    let sizes = get_component_sizes(segmentation, count);
    let (min_w, min_h) = (options.min_width * scale, options.min_height * scale);

    let mut lines = Vec::new();
    let mut empty = 0usize;
    for (i, (b, &n)) in bounds.iter().zip(&sizes).enumerate() {
        let label = i as u32 + 1;
        let Some(b) = *b else {
            empty += 1;
            continue;
        };
        if (b.w as f32) < min_w || (b.h as f32) < min_h {
            log::debug!("dropping line {} of size {}x{}", label, b.w, b.h);
            continue;
        }
        let mask = segmentation.crop(b)?;
        let mask = Bitmap::from_data(
            mask.width(),
            mask.height(),
            mask.data().iter().map(|&l| (l == label) as u8).collect(),
        )?;
        lines.push(Line {
            label,
            bounds: b,
            mask,
            pixel_count: n as usize,
        });
    }
    if empty > 0 {
        log::debug!("{} seeds labeled no ink", empty);
    }
    Ok(lines)
}
