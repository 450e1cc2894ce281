//! Connected component analysis
//!
//! Labels connected ink regions of a [`Bitmap`] with a two-pass
//! Union-Find (disjoint set) scan. Final labels are numbered 1, 2, ...
//! in the raster order in which each component is first met, so the
//! labeling is a pure function of the image.

use crate::error::RegionResult;
use crate::label::{get_component_bounds, get_component_sizes};
use pageseg_core::{Bitmap, BitmapMut, Box, LabelMap};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component in the labeling it came from
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Slot 0 is the background.
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let (ra, rb) = (self.find(a), self.find(b));
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[hi as usize] = lo;
        lo
    }
}

/// Label all connected components in a binary image
///
/// Returns the label map and the number of components.
pub fn label_connected_components(
    bm: &Bitmap,
    connectivity: ConnectivityType,
) -> RegionResult<(LabelMap, u32)> {
    let (w, h) = bm.dimensions();
    let mut labels = LabelMap::new(w, h)?;
    let mut uf = UnionFind::new();

    {
        let data = bm.data();
        let out = labels.data_mut();
        let (w, h) = (w as usize, h as usize);
        for y in 0..h {
            for x in 0..w {
                let idx = y * w + x;
                if data[idx] == 0 {
                    continue;
                }
                let mut neighbors = [0u32; 4];
                let mut n = 0;
                if x > 0 && out[idx - 1] != 0 {
                    neighbors[n] = out[idx - 1];
                    n += 1;
                }
                if y > 0 {
                    let up = idx - w;
                    if out[up] != 0 {
                        neighbors[n] = out[up];
                        n += 1;
                    }
                    if connectivity == ConnectivityType::EightWay {
                        if x > 0 && out[up - 1] != 0 {
                            neighbors[n] = out[up - 1];
                            n += 1;
                        }
                        if x + 1 < w && out[up + 1] != 0 {
                            neighbors[n] = out[up + 1];
                            n += 1;
                        }
                    }
                }
                out[idx] = if n == 0 {
                    uf.make_set()
                } else {
                    let mut root = neighbors[0];
                    for &nb in &neighbors[1..n] {
                        root = uf.union(root, nb);
                    }
                    uf.find(root)
                };
            }
        }
    }

    // Renumber roots in order of first appearance.
    let mut final_id = vec![0u32; uf.parent.len()];
    let mut count = 0u32;
    for l in labels.data_mut().iter_mut() {
        if *l == 0 {
            continue;
        }
        let root = uf.find(*l) as usize;
        if final_id[root] == 0 {
            count += 1;
            final_id[root] = count;
        }
        *l = final_id[root];
    }

    Ok((labels, count))
}

/// Find all connected components in a binary image
///
/// Components are returned in label order, each with its pixel count and
/// bounding box.
pub fn find_connected_components(
    bm: &Bitmap,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let (labels, count) = label_connected_components(bm, connectivity)?;
    let bounds = get_component_bounds(&labels, count);
    let sizes = get_component_sizes(&labels, count);
    Ok(bounds
        .into_iter()
        .zip(sizes)
        .enumerate()
        .filter_map(|(i, (b, n))| b.map(|b| ConnectedComponent::new(i as u32 + 1, n, b)))
        .collect())
}

/// Remove components with fewer than `min_size` pixels
///
/// Returns the cleaned image and the number of ink pixels removed.
pub fn remove_small_components(
    bm: &Bitmap,
    connectivity: ConnectivityType,
    min_size: u32,
) -> RegionResult<(Bitmap, usize)> {
    let (labels, count) = label_connected_components(bm, connectivity)?;
    let sizes = get_component_sizes(&labels, count);
    let mut out = BitmapMut::new(bm.width(), bm.height())?;
    let mut removed = 0usize;
    for (dst, &l) in out.data_mut().iter_mut().zip(labels.data()) {
        if l == 0 {
            continue;
        }
        if sizes[l as usize - 1] >= min_size {
            *dst = 1;
        } else {
            removed += 1;
        }
    }
    Ok((out.into(), removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&str]) -> Bitmap {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| (b == b'#') as u8))
            .collect();
        Bitmap::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_four_vs_eight_way() {
        let bm = from_rows(&["#...", ".#..", "..##"]);
        let (_, n4) = label_connected_components(&bm, ConnectivityType::FourWay).unwrap();
        let (_, n8) = label_connected_components(&bm, ConnectivityType::EightWay).unwrap();
        assert_eq!(n4, 3);
        assert_eq!(n8, 1);
    }

    #[test]
    fn test_u_shape_merges() {
        // Two arms meet only at the bottom row.
        let bm = from_rows(&["#..#", "#..#", "####"]);
        let (labels, n) = label_connected_components(&bm, ConnectivityType::FourWay).unwrap();
        assert_eq!(n, 1);
        assert_eq!(labels.max_label(), 1);
    }

    #[test]
    fn test_labels_in_scan_order() {
        let bm = from_rows(&["..#", "#..", "#.#"]);
        let (labels, n) = label_connected_components(&bm, ConnectivityType::FourWay).unwrap();
        assert_eq!(n, 3);
        assert_eq!(labels.get(2, 0), Some(1));
        assert_eq!(labels.get(0, 1), Some(2));
        assert_eq!(labels.get(2, 2), Some(3));
    }

    #[test]
    fn test_find_components_bounds() {
        let bm = from_rows(&["##...", "##...", "....#"]);
        let comps = find_connected_components(&bm, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].bounds, Box::new_unchecked(0, 0, 2, 2));
        assert_eq!(comps[0].pixel_count, 4);
        assert_eq!(comps[1].bounds, Box::new_unchecked(4, 2, 1, 1));
    }

    #[test]
    fn test_remove_small_components() {
        let bm = from_rows(&["##..#", "##...", "....."]);
        let (clean, removed) =
            remove_small_components(&bm, ConnectivityType::EightWay, 2).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(clean.count_pixels(), 4);
    }
}
