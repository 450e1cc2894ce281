//! Column separator detection
//!
//! Two independent detectors produce separator masks:
//!
//! - **black rules**: tall thin ink structures that survive a vertical
//!   opening of the dilated page;
//! - **whitespace gutters**: low-ink regions just left of a strong
//!   left-to-right ink edge, tall enough to split columns.
//!
//! Their union is the column mask. Separator pixels are removed from the
//! working binary before line detection.

use crate::options::ColumnOptions;
use crate::{LayoutResult, px};
use pageseg_core::{Bitmap, FPix};
use pageseg_filter::{GaussianOrder, gaussian_filter, maximum_filter_bitmap, uniform_filter};
use pageseg_morph::{dilate_brick, erode_brick, open_brick};
use pageseg_region::{
    ConnectivityType, RegionMeasure, get_component_bounds, label_connected_components,
    select_regions,
};

/// Remove horizontal rules: components wider than
/// `hline_max_width * scale` and shorter than `hline_max_height * scale`
///
/// Returns the cleaned image and the number of ink pixels removed.
pub fn remove_hlines(
    binary: &Bitmap,
    scale: f32,
    options: &ColumnOptions,
) -> LayoutResult<(Bitmap, usize)> {
    let (labels, count) = label_connected_components(binary, ConnectivityType::FourWay)?;
    let (max_w, max_h) = (
        options.hline_max_width * scale,
        options.hline_max_height * scale,
    );
    let rule: Vec<bool> = std::iter::once(false)
        .chain(
            get_component_bounds(&labels, count)
                .iter()
                .map(|b| b.is_some_and(|b| b.w as f32 > max_w && (b.h as f32) < max_h)),
        )
        .collect();

    let mut out = binary.to_mut();
    let mut removed = 0usize;
    for (dst, &l) in out.data_mut().iter_mut().zip(labels.data()) {
        if rule[l as usize] {
            *dst = 0;
            removed += 1;
        }
    }
    if removed > 0 {
        log::debug!("removed {} ink pixels of horizontal rules", removed);
    }
    Ok((out.into(), removed))
}

/// Find vertical black rules
///
/// Returns an empty mask unless [`ColumnOptions::black_sep_count`] is
/// positive.
pub fn compute_black_seps(
    binary: &Bitmap,
    scale: f32,
    options: &ColumnOptions,
) -> LayoutResult<Bitmap> {
    let nseps = options.black_sep_count() as usize;
    if nseps == 0 {
        return Ok(Bitmap::new(binary.width(), binary.height())?);
    }
    let d0 = px(scale / 4.0).max(5);
    let d1 = px(scale).max(5) + options.sep_widen;

    let thick = dilate_brick(binary, d1, d0)?;
    let vert = open_brick(&thick, 1, px(10.0 * scale))?;
    let vert = erode_brick(&vert, options.sep_widen, (d0 / 2).max(1))?;
    let vert = select_regions(
        &vert,
        ConnectivityType::FourWay,
        RegionMeasure::Width,
        2 * nseps,
        3.0,
    )?;
    let vert = select_regions(
        &vert,
        ConnectivityType::FourWay,
        RegionMeasure::Height,
        nseps,
        options.black_sep_min_height * scale,
    )?;
    Ok(vert)
}

/// Find whitespace column gutters
pub fn compute_whitespace_seps(
    binary: &Bitmap,
    scale: f32,
    options: &ColumnOptions,
) -> LayoutResult<Bitmap> {
    let ink = FPix::from_bitmap(binary);

    let smoothed = gaussian_filter(
        &ink,
        0.5 * scale,
        scale,
        GaussianOrder::Smooth,
        GaussianOrder::Smooth,
    )?;
    let smoothed = uniform_filter(&smoothed, 1, px(5.0 * scale))?;
    let whitespace = smoothed.threshold_below(0.1 * smoothed.max_value());

    let grad = gaussian_filter(
        &ink,
        0.5 * scale,
        scale,
        GaussianOrder::FirstDerivative,
        GaussianOrder::Smooth,
    )?;
    let grad = uniform_filter(&grad, 1, px(10.0 * scale))?;
    let edges = grad.threshold_above(0.5 * grad.max_value());

    let near_edges = maximum_filter_bitmap(&edges, px(5.0 * scale), px(scale))?;
    let seps = whitespace.and(&near_edges)?;
    let seps = maximum_filter_bitmap(&seps, 1, px(2.0 * scale))?;
    Ok(select_regions(
        &seps,
        ConnectivityType::FourWay,
        RegionMeasure::Height,
        options.max_col_seps as usize,
        options.col_sep_min_height * scale,
    )?)
}

/// Compute the column mask and the working binary
///
/// The working binary is `binary` with every column mask pixel cleared.
pub fn detect_columns(
    binary: &Bitmap,
    scale: f32,
    options: &ColumnOptions,
) -> LayoutResult<(Bitmap, Bitmap)> {
    let white = compute_whitespace_seps(binary, scale, options)?;
    let black = compute_black_seps(binary, scale, options)?;
    log::debug!(
        "column separators: {} whitespace px, {} black rule px",
        white.count_pixels(),
        black.count_pixels()
    );
    let colmask = white.or(&black)?;
    let cleaned = binary.subtract(&colmask)?;
    Ok((colmask, cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageseg_core::{BitmapMut, Box};

    /// Mask of the columns `x0..x1` over the full height.
    fn vertical_band(width: u32, height: u32, x0: u32, x1: u32) -> Bitmap {
        let mut bm = BitmapMut::new(width, height).unwrap();
        bm.fill_rect(
            Box::from_extents(x0 as i32, 0, x1 as i32, height as i32),
            true,
        );
        bm.into()
    }

    #[test]
    fn test_remove_hlines() {
        let mut bm = BitmapMut::new(300, 40).unwrap();
        // 250 px rule and a 10 px glyph
        bm.fill_rect(Box::new_unchecked(10, 5, 250, 2), true);
        bm.fill_rect(Box::new_unchecked(20, 20, 10, 10), true);
        let bm: Bitmap = bm.into();
        let (clean, removed) = remove_hlines(&bm, 20.0, &ColumnOptions::default()).unwrap();
        assert_eq!(removed, 500);
        assert_eq!(clean.count_pixels(), 100);
        assert_eq!(clean.get_pixel(25, 25), Some(1));
    }

    #[test]
    fn test_remove_hlines_keeps_line_height_bands() {
        let mut bm = BitmapMut::new(300, 60).unwrap();
        bm.fill_rect(Box::new_unchecked(10, 5, 250, 2), true);
        // As tall as a text line: a run of touching glyphs, not a rule
        bm.fill_rect(Box::new_unchecked(10, 30, 250, 12), true);
        let bm: Bitmap = bm.into();
        let (clean, removed) = remove_hlines(&bm, 10.0, &ColumnOptions::default()).unwrap();
        assert_eq!(removed, 500);
        assert_eq!(clean.count_pixels(), 3000);

        let strict = ColumnOptions::default().with_hline_size(10.0, 2.0);
        let (_, removed) = remove_hlines(&bm, 10.0, &strict).unwrap();
        assert_eq!(removed, 3500);
    }

    #[test]
    fn test_black_seps_disabled_by_default() {
        let bm = vertical_band(100, 400, 50, 52);
        let seps = compute_black_seps(&bm, 15.0, &ColumnOptions::default()).unwrap();
        assert!(seps.is_zero());
    }

    #[test]
    fn test_black_rule_detected() {
        // A 2 px wide rule running the full height of a 400 px page.
        let bm = vertical_band(100, 400, 50, 52);
        let opts = ColumnOptions::default().with_black_seps(true);
        let seps = compute_black_seps(&bm, 15.0, &opts).unwrap();
        assert!(!seps.is_zero());
        assert_eq!(seps.get_pixel(51, 200), Some(1));
        assert_eq!(seps.get_pixel(5, 200), Some(0));
        assert_eq!(seps.get_pixel(95, 200), Some(0));
    }

    #[test]
    fn test_whitespace_seps_empty_page() {
        let bm = Bitmap::new(120, 120).unwrap();
        let seps = compute_whitespace_seps(&bm, 12.0, &ColumnOptions::default()).unwrap();
        assert!(seps.is_zero());
    }

    #[test]
    fn test_working_binary_excludes_mask() {
        let bm = vertical_band(100, 400, 50, 52);
        let opts = ColumnOptions::default().with_black_seps(true);
        let (colmask, cleaned) = detect_columns(&bm, 15.0, &opts).unwrap();
        assert!(cleaned.and(&colmask).unwrap().is_zero());
        assert!(cleaned.count_pixels() < bm.count_pixels());
    }
}
