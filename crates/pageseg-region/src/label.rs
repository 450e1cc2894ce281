//! Per-label measurements
//!
//! Functions that aggregate a [`LabelMap`] into per-label bounding boxes
//! and pixel counts. Results are indexed by `label - 1`.

use pageseg_core::{Box, LabelMap};

/// Bounding box of every label in `1..=count`
///
/// Labels with no pixels yield `None`. Labels above `count` are ignored.
pub fn get_component_bounds(labels: &LabelMap, count: u32) -> Vec<Option<Box>> {
    // (x0, y0, x1, y1), inclusive
    let mut ext: Vec<Option<(u32, u32, u32, u32)>> = vec![None; count as usize];
    let w = labels.width();
    for (y, row) in labels.data().chunks(w as usize).enumerate() {
        let y = y as u32;
        for (x, &l) in row.iter().enumerate() {
            if l == 0 || l > count {
                continue;
            }
            let x = x as u32;
            let e = &mut ext[l as usize - 1];
            *e = Some(match *e {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    ext.into_iter()
        .map(|e| {
            e.map(|(x0, y0, x1, y1)| {
                Box::from_extents(x0 as i32, y0 as i32, x1 as i32 + 1, y1 as i32 + 1)
            })
        })
        .collect()
}

/// Pixel count of every label in `1..=count`
pub fn get_component_sizes(labels: &LabelMap, count: u32) -> Vec<u32> {
    let mut sizes = vec![0u32; count as usize];
    for &l in labels.data() {
        if l != 0 && l <= count {
            sizes[l as usize - 1] += 1;
        }
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_and_sizes() {
        let labels = LabelMap::from_data(4, 3, vec![1, 1, 0, 0, 0, 1, 0, 3, 0, 0, 0, 3]).unwrap();
        let bounds = get_component_bounds(&labels, 3);
        assert_eq!(bounds[0], Some(Box::new_unchecked(0, 0, 2, 2)));
        assert_eq!(bounds[1], None);
        assert_eq!(bounds[2], Some(Box::new_unchecked(3, 1, 1, 2)));
        assert_eq!(get_component_sizes(&labels, 3), vec![3, 0, 2]);
    }

    #[test]
    fn test_labels_above_count_ignored() {
        let labels = LabelMap::from_data(2, 1, vec![1, 5]).unwrap();
        assert_eq!(get_component_sizes(&labels, 1), vec![1]);
        assert_eq!(get_component_bounds(&labels, 1).len(), 1);
    }
}
