//! Line seed detection
//!
//! Character-sized components are replaced by their filled bounding
//! boxes (the box map). Smoothing the box map wide and differentiating it
//! vertically gives strong responses at the top and bottom edges of every
//! text line. Each column is then scanned bottom-up: a bottom edge opens a
//! seed that extends up to the matching top edge, provided it is close
//! enough. The seeds of a line merge horizontally into one thin component.

use crate::options::{GradientFilter, SeedOptions};
use crate::{LayoutResult, px};
use pageseg_core::{Bitmap, BitmapMut, FPix, LabelMap};
use pageseg_filter::{
    GaussianOrder, gaussian_filter, maximum_filter, maximum_filter_bitmap, norm_max,
    uniform_filter,
};
use pageseg_region::{ConnectivityType, find_connected_components, label_connected_components};
use rayon::prelude::*;

/// Fill the bounding box of every character-sized component
///
/// A component qualifies when the square root of its bounding-box area
/// lies in `[boxmap_min * scale, boxmap_max * scale]`. Wider components
/// whose height lies in that band are runs of touching glyphs and
/// qualify too.
pub fn compute_boxmap(binary: &Bitmap, scale: f32, options: &SeedOptions) -> LayoutResult<Bitmap> {
    let (lo, hi) = (options.boxmap_min * scale, options.boxmap_max * scale);
    let in_band = |v: f32| v >= lo && v <= hi;
    let mut boxmap = BitmapMut::new(binary.width(), binary.height())?;
    for c in find_connected_components(binary, ConnectivityType::FourWay)? {
        let size = (c.bounds.area() as f32).sqrt();
        let run = c.bounds.w as f32 > hi && in_band(c.bounds.h as f32);
        if in_band(size) || run {
            boxmap.fill_rect(c.bounds, true);
        }
    }
    Ok(boxmap.into())
}

/// Normalized line edge responses
#[derive(Debug, Clone)]
pub struct GradMaps {
    /// Response at the bottom edges of lines, in [0, 1]
    pub bottom: FPix,
    /// Response at the top edges of lines, in [0, 1]
    pub top: FPix,
}

/// Vertical gradient of the box-mapped ink
pub fn compute_gradmaps(
    binary: &Bitmap,
    boxmap: &Bitmap,
    scale: f32,
    options: &SeedOptions,
) -> LayoutResult<GradMaps> {
    let cleaned = FPix::from_bitmap(&binary.and(boxmap)?);
    let (hs, vs) = (options.hscale * scale, options.vscale * scale);
    let grad = match options.gradient {
        GradientFilter::Gaussian => gaussian_filter(
            &cleaned,
            6.0 * hs,
            0.3 * vs,
            GaussianOrder::Smooth,
            GaussianOrder::FirstDerivative,
        )?,
        GradientFilter::Box => {
            let grad = gaussian_filter(
                &cleaned,
                hs,
                (0.3 * vs).max(4.0),
                GaussianOrder::Smooth,
                GaussianOrder::FirstDerivative,
            )?;
            uniform_filter(&grad, px(6.0 * hs), px(options.vscale))?
        }
    };
    Ok(GradMaps {
        bottom: norm_max(&grad.map(|v| (-v).max(0.0))),
        top: norm_max(&grad.map(|v| v.max(0.0))),
    })
}

/// Rows where `f` attains its running maximum over a `vrange`-row window,
/// widened by one pixel down and right, above `t * max(f)`, outside `colmask`.
fn mark_peaks(f: &FPix, vrange: u32, t: f32, colmask: &Bitmap) -> LayoutResult<Bitmap> {
    let runmax = maximum_filter(f, 1, vrange)?;
    let peaks = f
        .data()
        .iter()
        .zip(runmax.data())
        .map(|(&v, &m)| (v == m) as u8)
        .collect();
    let peaks = Bitmap::from_data(f.width(), f.height(), peaks)?;
    let peaks = maximum_filter_bitmap(&peaks, 2, 2)?;
    let strong = f.threshold_above(t * f.max_value());
    Ok(peaks.and(&strong)?.subtract(colmask)?)
}

/// Seed row ranges of one image column
///
/// `bottom` and `top` flag the rows marked as bottom and top line edges.
/// Marks are visited from the bottom of the column upward, a bottom mark
/// before a top mark on the same row. Each bottom mark at `y0` yields the
/// stub `[y0 - delta, y0)`; when the next mark above is a top mark at `y1`
/// with `y0 - y1 < max_gap`, it also yields `[y1, y0)`.
///
/// Ranges are half-open and may overlap.
pub fn column_seed_intervals(
    bottom: &[u8],
    top: &[u8],
    delta: usize,
    max_gap: f32,
) -> Vec<(usize, usize)> {
    let mut marks: Vec<(usize, bool)> = bottom
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != 0)
        .map(|(y, _)| (y, true))
        .chain(
            top.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(|(y, _)| (y, false)),
        )
        .collect();
    marks.sort_unstable_by(|a, b| b.cmp(a));

    let mut intervals = Vec::new();
    for (i, &(y0, is_bottom)) in marks.iter().enumerate() {
        if !is_bottom {
            continue;
        }
        intervals.push((y0.saturating_sub(delta), y0));
        if let Some(&(y1, false)) = marks.get(i + 1)
            && ((y0 - y1) as f32) < max_gap
        {
            intervals.push((y1, y0));
        }
    }
    intervals
}

fn column(bm: &Bitmap, x: u32) -> Vec<u8> {
    let w = bm.width() as usize;
    bm.data()
        .iter()
        .skip(x as usize)
        .step_by(w)
        .copied()
        .collect()
}

/// Label the line seeds of a page
///
/// Returns one label per seed; seeds never touch `colmask`.
pub fn compute_line_seeds(
    grad: &GradMaps,
    colmask: &Bitmap,
    scale: f32,
    options: &SeedOptions,
) -> LayoutResult<LabelMap> {
    let (w, h) = grad.bottom.dimensions();
    let vrange = px(options.vscale * scale);
    let t = options.threshold;

    let bmarked = mark_peaks(&grad.bottom, vrange, t, colmask)?;
    let tmarked = mark_peaks(&grad.top, vrange, t / 2.0, colmask)?;
    let tmarked = maximum_filter_bitmap(&tmarked, 20, 1)?;

    let delta = ((scale / 2.0) as usize).max(3);
    let max_gap = 5.0 * scale;
    let intervals: Vec<Vec<(usize, usize)>> = (0..w)
        .into_par_iter()
        .map(|x| {
            column_seed_intervals(&column(&bmarked, x), &column(&tmarked, x), delta, max_gap)
        })
        .collect();

    let mut seeds = BitmapMut::new(w, h)?;
    for (x, ranges) in intervals.iter().enumerate() {
        for &(y0, y1) in ranges {
            for y in y0..y1 {
                seeds.set_pixel_unchecked(x as u32, y as u32, true);
            }
        }
    }

    let seeds: Bitmap = seeds.into();
    let seeds = maximum_filter_bitmap(&seeds, px(1.0 + scale), 1)?;
    let seeds = seeds.subtract(colmask)?;
    let (labels, count) = label_connected_components(&seeds, ConnectivityType::FourWay)?;
    log::debug!("line seeds: {}", count);
    Ok(labels)
}
