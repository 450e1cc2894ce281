//! Region selection by extent
//!
//! Keeps the `n` best connected components of a binary image ranked by
//! width or height. Ties keep the component met first in raster order.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::error::RegionResult;
use crate::label::get_component_bounds;
use pageseg_core::{Bitmap, BitmapMut};

/// Bounding-box measure used to rank components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMeasure {
    Width,
    Height,
}

/// Keep at most `nbest` components whose measure is strictly greater than
/// `min`, preferring the largest.
pub fn select_regions(
    bm: &Bitmap,
    connectivity: ConnectivityType,
    measure: RegionMeasure,
    nbest: usize,
    min: f32,
) -> RegionResult<Bitmap> {
    let (labels, count) = label_connected_components(bm, connectivity)?;
    let bounds = get_component_bounds(&labels, count);

    let mut candidates: Vec<(u32, i32)> = bounds
        .iter()
        .enumerate()
        .filter_map(|(i, b)| {
            b.map(|b| {
                let m = match measure {
                    RegionMeasure::Width => b.w,
                    RegionMeasure::Height => b.h,
                };
                (i as u32 + 1, m)
            })
        })
        .filter(|&(_, m)| m as f32 > min)
        .collect();
    // Stable: equal measures stay in label order.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(nbest);

    let mut keep = vec![false; count as usize + 1];
    for (l, _) in candidates {
        keep[l as usize] = true;
    }

    let mut out = BitmapMut::new(bm.width(), bm.height())?;
    for (dst, &l) in out.data_mut().iter_mut().zip(labels.data()) {
        *dst = keep[l as usize] as u8;
    }
    Ok(out.into())
}
