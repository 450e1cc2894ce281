//! Distance-limited nearest-label spreading
//!
//! Every pixel takes the label of the nearest labeled pixel (Euclidean
//! distance), provided that distance is below a limit. The nearest
//! labeled pixel comes from an exact feature transform computed in two
//! separable passes:
//!
//! 1. down each column, the nearest labeled row in that column;
//! 2. along each row, the lower envelope of parabolas
//!    `(x - x')^2 + dy(x')^2` over the columns `x'`.
//!
//! Ties between equidistant labeled pixels resolve to the lower column,
//! then to the upper row.

use crate::error::{RegionError, RegionResult};
use pageseg_core::LabelMap;

/// Spread labels to every pixel within `max_dist` of a labeled pixel
///
/// Pixels at distance `>= max_dist` from every labeled pixel stay 0.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `max_dist` is NaN or negative.
pub fn spread_labels(labels: &LabelMap, max_dist: f32) -> RegionResult<LabelMap> {
    if max_dist.is_nan() || max_dist < 0.0 {
        return Err(RegionError::InvalidParameters(format!(
            "max_dist must be >= 0, got {}",
            max_dist
        )));
    }
    let (w, h) = (labels.width() as usize, labels.height() as usize);
    let src = labels.data();

    // Pass 1: nearest labeled row per column, or None.
    let mut near_row: Vec<Option<u32>> = vec![None; w * h];
    for x in 0..w {
        let mut last: Option<usize> = None;
        for y in 0..h {
            if src[y * w + x] != 0 {
                last = Some(y);
            }
            near_row[y * w + x] = last.map(|r| r as u32);
        }
        let mut next: Option<usize> = None;
        for y in (0..h).rev() {
            if src[y * w + x] != 0 {
                next = Some(y);
            }
            let cur = near_row[y * w + x];
            near_row[y * w + x] = match (cur, next) {
                (Some(a), Some(b)) => {
                    // Prefer the upper row on a tie.
                    if (b as usize - y) < (y - a as usize) {
                        Some(b as u32)
                    } else {
                        Some(a)
                    }
                }
                (None, Some(b)) => Some(b as u32),
                (a, None) => a,
            };
        }
    }

    // Pass 2: lower envelope along each row.
    let limit = max_dist as f64 * max_dist as f64;
    let mut out = LabelMap::new(labels.width(), labels.height())?;
    let mut g = vec![0.0f64; w];
    let mut v: Vec<usize> = Vec::with_capacity(w);
    let mut z: Vec<f64> = Vec::with_capacity(w + 1);
    for y in 0..h {
        v.clear();
        z.clear();
        for x in 0..w {
            let Some(r) = near_row[y * w + x] else {
                continue;
            };
            let dy = r as f64 - y as f64;
            g[x] = dy * dy;
            let q = x as f64;
            loop {
                let Some(&p) = v.last() else {
                    v.push(x);
                    z.push(f64::NEG_INFINITY);
                    break;
                };
                let pf = p as f64;
                let s = ((g[x] + q * q) - (g[p] + pf * pf)) / (2.0 * (q - pf));
                if s <= z[v.len() - 1] {
                    v.pop();
                    z.pop();
                } else {
                    v.push(x);
                    z.push(s);
                    break;
                }
            }
        }
        if v.is_empty() {
            continue;
        }
        z.push(f64::INFINITY);

        let mut k = 0usize;
        for x in 0..w {
            let xf = x as f64;
            while z[k + 1] < xf {
                k += 1;
            }
            let p = v[k];
            let d = (xf - p as f64).powi(2) + g[p];
            if d < limit
                && let Some(r) = near_row[y * w + p]
            {
                out.set_unchecked(x as u32, y as u32, src[r as usize * w + p]);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_within_distance() {
        let mut data = vec![0u32; 9 * 9];
        data[4 * 9 + 4] = 3;
        let labels = LabelMap::from_data(9, 9, data).unwrap();
        let s = spread_labels(&labels, 2.5).unwrap();
        assert_eq!(s.get(4, 4), Some(3));
        assert_eq!(s.get(6, 4), Some(3));
        assert_eq!(s.get(5, 5), Some(3));
        // (6, 6) is at distance sqrt(8) > 2.5
        assert_eq!(s.get(6, 6), Some(0));
        assert_eq!(s.get(0, 0), Some(0));
    }

    #[test]
    fn test_spread_nearest_wins() {
        let mut data = vec![0u32; 10];
        data[0] = 1;
        data[9] = 2;
        let labels = LabelMap::from_data(10, 1, data).unwrap();
        let s = spread_labels(&labels, 100.0).unwrap();
        assert_eq!(s.data(), &[1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_spread_vertical_and_diagonal() {
        // Seeds at (0, 0) label 1 and (3, 4) label 2.
        let mut data = vec![0u32; 4 * 5];
        data[0] = 1;
        data[4 * 4 + 3] = 2;
        let labels = LabelMap::from_data(4, 5, data).unwrap();
        let s = spread_labels(&labels, 100.0).unwrap();
        assert_eq!(s.get(0, 1), Some(1));
        assert_eq!(s.get(3, 3), Some(2));
        assert_eq!(s.get(0, 4), Some(2));
        assert_eq!(s.get(3, 0), Some(1));
    }

    #[test]
    fn test_spread_no_labels() {
        let labels = LabelMap::new(3, 3).unwrap();
        let s = spread_labels(&labels, 10.0).unwrap();
        assert_eq!(s.count_labeled(), 0);
        assert!(spread_labels(&labels, f32::NAN).is_err());
    }
}
