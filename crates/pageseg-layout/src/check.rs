//! Page checks
//!
//! Cheap sanity checks run before segmentation, so that images which are
//! clearly not scanned text pages fail fast with a readable reason.

use crate::{LayoutError, LayoutResult};
use pageseg_core::Bitmap;
use pageseg_region::{ConnectivityType, label_connected_components};

/// Smallest accepted page side, in pixels
pub const MIN_PAGE_SIDE: u32 = 600;
/// Largest accepted page side, in pixels
pub const MAX_PAGE_SIDE: u32 = 10000;

/// Median of `n` binary values of which `zeros` are 0.
fn binary_median(zeros: usize, n: usize) -> f64 {
    let at = |i: usize| if i < zeros { 0.0 } else { 1.0 };
    if n % 2 == 1 {
        at(n / 2)
    } else {
        (at(n / 2 - 1) + at(n / 2)) / 2.0
    }
}

/// Check that `ink` (1 = ink) looks like a page image
///
/// # Errors
///
/// Returns [`LayoutError::PageCheck`] listing every failed condition.
pub fn check_page(ink: &Bitmap) -> LayoutResult<()> {
    check_page_image(ink, false)
}

/// [`check_page`] for a page read from a file that may have been a color
/// image; `color` is reported as one more failed condition.
pub fn check_page_image(ink: &Bitmap, color: bool) -> LayoutResult<()> {
    let (w, h) = ink.dimensions();
    let n = w as usize * h as usize;
    let count = ink.count_pixels();
    let mut problems = Vec::new();

    if color {
        problems.push("input image is color image".to_string());
    }

    let mean = count as f64 / n as f64;
    if mean < binary_median(n - count, n) {
        problems.push("image may be inverted".to_string());
    }
    if h < MIN_PAGE_SIDE {
        problems.push(format!("image not tall enough for a page image ({}x{})", w, h));
    }
    if h > MAX_PAGE_SIDE {
        problems.push(format!("image too tall for a page image ({}x{})", w, h));
    }
    if w < MIN_PAGE_SIDE {
        problems.push(format!("image too narrow for a page image ({}x{})", w, h));
    }
    if w > MAX_PAGE_SIDE {
        problems.push(format!("image too wide for a page image ({}x{})", w, h));
    }

    let slots = n / (30 * 30);
    let (_, ncomps) = label_connected_components(ink, ConnectivityType::FourWay)?;
    let ncomps = ncomps as usize;
    if ncomps < 10 {
        problems.push(format!(
            "too few connected components for a page image (got {})",
            ncomps
        ));
    }
    if ncomps > slots {
        problems.push(format!(
            "too many connected components for a page image ({} > {})",
            ncomps, slots
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(LayoutError::PageCheck(problems))
    }
}
