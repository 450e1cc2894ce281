//! Scale estimation
//!
//! The scale of a page is the median height of its character-sized
//! connected components. Every kernel size of the later stages is a
//! multiple of it.

use crate::options::ScaleOptions;
use crate::{LayoutError, LayoutResult};
use pageseg_core::Bitmap;
use pageseg_region::{ConnectivityType, find_connected_components};

/// Largest usable scale (exclusive)
pub const MAX_SCALE: f32 = 1000.0;

/// Estimate the scale of a page
///
/// Returns NaN if no component falls inside the height band.
pub fn estimate_scale(binary: &Bitmap, options: &ScaleOptions) -> LayoutResult<f32> {
    let components = find_connected_components(binary, ConnectivityType::FourWay)?;
    let (lo, hi) = (
        options.min_component_height as i32,
        options.max_component_height as i32,
    );
    let mut heights: Vec<i32> = components
        .iter()
        .map(|c| c.bounds.h)
        .filter(|&h| h > lo && h < hi)
        .collect();
    log::debug!(
        "scale: {} of {} components in height band ({}, {})",
        heights.len(),
        components.len(),
        lo,
        hi
    );
    Ok(median(&mut heights))
}

fn median(values: &mut [i32]) -> f32 {
    if values.is_empty() {
        return f32::NAN;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid] as f32
    } else {
        (values[mid - 1] + values[mid]) as f32 / 2.0
    }
}

/// Check that `scale` lies in `[min_scale, 1000)`
///
/// NaN is always rejected.
pub fn validate_scale(scale: f32, min_scale: f32) -> LayoutResult<()> {
    if scale >= min_scale && scale < MAX_SCALE {
        Ok(())
    } else {
        Err(LayoutError::ScaleOutOfRange { scale, min_scale })
    }
}

/// The fixed scale if one is configured, otherwise the estimate; validated.
pub fn resolve_scale(binary: &Bitmap, options: &ScaleOptions) -> LayoutResult<f32> {
    let scale = match options.fixed_scale {
        Some(s) => s,
        None => estimate_scale(binary, options)?,
    };
    validate_scale(scale, options.min_scale)?;
    log::debug!("scale: {}", scale);
    Ok(scale)
}
