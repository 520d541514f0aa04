//! Connected components and per-region measurements.
//!
//! The shape policies only see two narrow capabilities:
//!
//! - [`ComponentLabeler`]: binary mask → label image numbered `1..=n`.
//! - [`RegionMeasurer`]: label image → `id → {area, centroid}`.
//!
//! [`TwoPassLabeler`] (backed by `imageproc`) and [`MomentMeasurer`] are the
//! default implementations; tests substitute fakes to exercise the policies
//! in isolation.

pub mod labeling;
pub mod measure;

pub use labeling::TwoPassLabeler;
pub use measure::MomentMeasurer;

use crate::image::{LabelImage, Mask};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pixel adjacency used for labeling and perimeter extraction.
///
/// Defaults to [`Connectivity::Four`], the usual cross-shaped structuring
/// element of binary labeling; diagonal touches split components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Horizontal and vertical neighbours.
    #[default]
    Four,
    /// Adds the diagonal neighbours.
    Eight,
}

impl Connectivity {
    /// Neighbour offsets `(dx, dy)`.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        const EIGHT: [(isize, isize); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Area and centroid of one labelled region.
///
/// The centroid is the mean pixel position in local `(x, y)` pixel indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionProps {
    pub area: usize,
    pub centroid: Point2<f64>,
}

pub type RegionTable = BTreeMap<u32, RegionProps>;

/// Binary mask → locally numbered components (0 background).
pub trait ComponentLabeler: Sync {
    fn label(&self, mask: &Mask) -> LabelImage;
}

/// Label image → per-id measurements. Ids absent from the image are absent
/// from the table.
pub trait RegionMeasurer: Sync {
    fn properties(&self, labels: &LabelImage) -> RegionTable;
}
