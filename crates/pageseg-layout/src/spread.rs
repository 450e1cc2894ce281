//! Growing line seeds into a full labeling
//!
//! Whole box-map components take the seed they touch. Everything else,
//! including components touching several seeds, takes the nearest seed
//! within one scale unit.

use crate::LayoutResult;
use pageseg_core::{Bitmap, LabelMap, check_same_size};
use pageseg_region::{ConnectivityType, propagate_labels};

/// Label every ink pixel of `binary` with a line seed
///
/// Pixels off `binary` are always 0; ink pixels with no seed in reach
/// stay 0.
pub fn spread_labels(
    boxmap: &Bitmap,
    seeds: &LabelMap,
    binary: &Bitmap,
    scale: f32,
) -> LayoutResult<LabelMap> {
    check_same_size(binary.dimensions(), boxmap.dimensions())?;
    let propagated = propagate_labels(boxmap, seeds, ConnectivityType::FourWay)?;
    let conflicts = propagated.conflicts();
    if conflicts > 0 {
        log::debug!("{} box map components touch several seeds", conflicts);
    }
    let nearest = pageseg_region::spread_labels(seeds, scale)?;

    let mut out = propagated.to_label_map();
    for ((l, &s), &ink) in out
        .data_mut()
        .iter_mut()
        .zip(nearest.data())
        .zip(binary.data())
    {
        if ink == 0 {
            *l = 0;
        } else if *l == 0 {
            *l = s;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageseg_core::{BitmapMut, Box};

    fn rect_map(width: u32, height: u32, rects: &[Box]) -> Bitmap {
        let mut bm = BitmapMut::new(width, height).unwrap();
        for &r in rects {
            bm.fill_rect(r, true);
        }
        bm.into()
    }

    fn seeds() -> LabelMap {
        let mut lm = LabelMap::new(60, 20).unwrap();
        for x in 0..10 {
            lm.set_unchecked(x, 10, 1);
        }
        for x in 30..40 {
            lm.set_unchecked(x, 10, 2);
        }
        lm
    }

    #[test]
    fn test_component_label_beats_nearest_seed() {
        let boxmap = rect_map(60, 20, &[Box::from_extents(5, 5, 28, 15)]);
        let binary = rect_map(60, 20, &[Box::from_extents(0, 0, 60, 20)]);
        let seg = spread_labels(&boxmap, &seeds(), &binary, 12.0).unwrap();
        // (27, 10) is 3 px from seed 2 but inside the component of seed 1.
        assert_eq!(seg.get(27, 10), Some(1));
        assert_eq!(seg.get(29, 10), Some(2));
    }

    #[test]
    fn test_conflicted_component_falls_back_to_nearest() {
        let boxmap = rect_map(60, 20, &[Box::from_extents(0, 5, 60, 15)]);
        let binary = rect_map(60, 20, &[Box::from_extents(0, 0, 60, 20)]);
        let seg = spread_labels(&boxmap, &seeds(), &binary, 12.0).unwrap();
        assert_eq!(seg.get(14, 10), Some(1));
        assert_eq!(seg.get(20, 10), Some(2));
        // Out of reach of both seeds
        assert_eq!(seg.get(20, 0), Some(0));
    }

    #[test]
    fn test_labels_only_on_ink() {
        let boxmap = rect_map(60, 20, &[Box::from_extents(5, 5, 28, 15)]);
        let binary = rect_map(60, 20, &[Box::from_extents(0, 8, 60, 12)]);
        let seg = spread_labels(&boxmap, &seeds(), &binary, 12.0).unwrap();
        for y in 0..20 {
            for x in 0..60 {
                if binary.get_pixel(x, y) == Some(0) {
                    assert_eq!(seg.get(x, y), Some(0));
                }
            }
        }
        assert!(seg.count_labeled() > 0);
    }
}
