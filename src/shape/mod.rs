//! Per-cell shape synthesis.
//!
//! [`ShapeKind`] is the configured token; [`ShapePolicy`] is the resolved
//! policy carrying whatever inputs it needs (disk element, guide objects and
//! region capabilities). Given a cell extent and the cell id, a policy returns
//! the pixel content of that extent as a local label patch.

pub mod circle;
pub mod natural;
pub mod rectangle;

pub use circle::DiskElement;
pub use natural::EDGE_MARGIN;

use crate::error::{GridError, Result};
use crate::grid::CellExtent;
use crate::image::LabelImage;
use crate::regions::{ComponentLabeler, RegionMeasurer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configured shape policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShapeKind {
    /// Keep the guide objects' own shape inside each cell.
    Natural,
    /// Stamp a disk centred in each cell.
    Circle,
    /// Fill the whole cell.
    Rectangle,
}

impl ShapeKind {
    pub fn needs_guide_objects(self) -> bool {
        matches!(self, ShapeKind::Natural)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Natural => "Natural Shape",
            ShapeKind::Circle => "Circle",
            ShapeKind::Rectangle => "Rectangle",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = GridError;

    /// Exact, case-sensitive tokens: `NaturalShape` (also spelled
    /// `Natural Shape`), `Circle` and `Rectangle`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NaturalShape" | "Natural Shape" => Ok(ShapeKind::Natural),
            "Circle" => Ok(ShapeKind::Circle),
            "Rectangle" => Ok(ShapeKind::Rectangle),
            _ => Err(GridError::UnknownShape(s.to_string())),
        }
    }
}

impl TryFrom<String> for ShapeKind {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guide objects plus the two region capabilities the natural policy uses.
#[derive(Clone, Copy)]
pub struct NaturalInputs<'a> {
    pub guide: &'a LabelImage,
    pub labeler: &'a dyn ComponentLabeler,
    pub measurer: &'a dyn RegionMeasurer,
}

impl fmt::Debug for NaturalInputs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalInputs")
            .field("guide_w", &self.guide.w)
            .field("guide_h", &self.guide.h)
            .finish()
    }
}

/// Resolved policy, selected once per invocation.
#[derive(Clone, Debug)]
pub enum ShapePolicy<'a> {
    Rectangle,
    Circle(DiskElement),
    Natural(NaturalInputs<'a>),
}

/// Output of one policy call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContent {
    /// Local patch sized like the cell extent.
    pub pixels: LabelImage,
    /// Natural components relabelled to the cell id.
    pub kept: usize,
    /// Natural components dropped by the centroid margin test.
    pub rejected: usize,
    /// Natural cell fell back to a single centre pixel.
    pub fallback: bool,
}

impl CellContent {
    fn plain(pixels: LabelImage) -> Self {
        Self {
            pixels,
            kept: 0,
            rejected: 0,
            fallback: false,
        }
    }
}

impl<'a> ShapePolicy<'a> {
    /// Build the policy for `kind`.
    ///
    /// `radius` is only read for circles; `natural` must be present for the
    /// natural policy.
    pub fn resolve(
        kind: ShapeKind,
        radius: Option<u32>,
        natural: Option<NaturalInputs<'a>>,
    ) -> Result<Self> {
        match kind {
            ShapeKind::Rectangle => Ok(ShapePolicy::Rectangle),
            ShapeKind::Circle => {
                let radius =
                    radius.ok_or_else(|| GridError::InvalidDiameter("<unset>".to_string()))?;
                Ok(ShapePolicy::Circle(DiskElement::new(radius)))
            }
            ShapeKind::Natural => natural
                .map(ShapePolicy::Natural)
                .ok_or(GridError::MissingGuideObjects("natural shape")),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapePolicy::Rectangle => ShapeKind::Rectangle,
            ShapePolicy::Circle(_) => ShapeKind::Circle,
            ShapePolicy::Natural(_) => ShapeKind::Natural,
        }
    }

    /// Pixel content of one cell.
    pub fn synthesize(&self, extent: &CellExtent, id: u32) -> CellContent {
        match self {
            ShapePolicy::Rectangle => CellContent::plain(rectangle::fill(extent, id)),
            ShapePolicy::Circle(disk) => CellContent::plain(circle::stamp(disk, extent, id)),
            ShapePolicy::Natural(inputs) => natural::extract(inputs, extent, id),
        }
    }
}
