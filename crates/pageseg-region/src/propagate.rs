//! Label propagation through connected components
//!
//! Every connected component of an image takes the seed label it
//! overlaps. Components overlapping no seed stay unlabeled; components
//! overlapping two or more distinct seeds are reported as conflicted
//! instead of being assigned to either.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::error::RegionResult;
use pageseg_core::{Bitmap, LabelMap, check_same_size};

/// Outcome of propagation for one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLabel {
    /// Background, or a component that touched no seed
    #[default]
    Unlabeled,
    /// A component that touched exactly one seed label
    Labeled(u32),
    /// A component that touched several seed labels
    Conflicted,
}

impl PixelLabel {
    fn absorb(self, seed: u32) -> Self {
        match self {
            PixelLabel::Unlabeled => PixelLabel::Labeled(seed),
            PixelLabel::Labeled(l) if l == seed => self,
            _ => PixelLabel::Conflicted,
        }
    }

    /// The label, if there is exactly one.
    pub fn label(self) -> Option<u32> {
        match self {
            PixelLabel::Labeled(l) => Some(l),
            _ => None,
        }
    }
}

/// Result of [`propagate_labels`]
#[derive(Debug, Clone)]
pub struct PropagatedLabels {
    /// Component labeling of the image propagated through
    pub components: LabelMap,
    /// Outcome per component, indexed by component label (slot 0 is background)
    pub outcomes: Vec<PixelLabel>,
}

impl PropagatedLabels {
    /// Outcome at pixel (x, y).
    pub fn at(&self, x: u32, y: u32) -> PixelLabel {
        self.components
            .get(x, y)
            .map(|c| self.outcomes[c as usize])
            .unwrap_or_default()
    }

    /// Number of conflicted components.
    pub fn conflicts(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == PixelLabel::Conflicted)
            .count()
    }

    /// Per-pixel labels, with unlabeled and conflicted pixels set to 0.
    pub fn to_label_map(&self) -> LabelMap {
        let table: Vec<u32> = self
            .outcomes
            .iter()
            .map(|o| o.label().unwrap_or(0))
            .collect();
        self.components.relabel(&table)
    }
}

/// Propagate `seeds` through the connected components of `image`
///
/// Seed pixels that fall on background of `image` are ignored.
pub fn propagate_labels(
    image: &Bitmap,
    seeds: &LabelMap,
    connectivity: ConnectivityType,
) -> RegionResult<PropagatedLabels> {
    check_same_size(image.dimensions(), seeds.dimensions())?;
    let (components, count) = label_connected_components(image, connectivity)?;
    let mut outcomes = vec![PixelLabel::Unlabeled; count as usize + 1];
    for (&c, &s) in components.data().iter().zip(seeds.data()) {
        if c != 0 && s != 0 {
            outcomes[c as usize] = outcomes[c as usize].absorb(s);
        }
    }
    Ok(PropagatedLabels {
        components,
        outcomes,
    })
}
