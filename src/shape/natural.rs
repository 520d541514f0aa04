//! Natural-shape extraction with centroid edge-margin rejection.
//!
//! The guide objects under a cell are binarized and split into local
//! components. A component whose centroid lies in the outer [`EDGE_MARGIN`]
//! band of the cell (on either axis) belongs to a neighbouring cell and is
//! dropped. Survivors are merged under the cell id. When nothing survives the
//! cell still gets one pixel at its centre.
use super::{CellContent, NaturalInputs};
use crate::grid::CellExtent;
use crate::image::{ImageViewMut, LabelImage};
use crate::regions::RegionProps;
use log::debug;

/// Fraction of the cell width/height treated as border on each side.
pub const EDGE_MARGIN: f64 = 0.1;

/// Centroid position as a fraction of the cell span, in continuous
/// coordinates (pixel `i` covers `[i, i + 1)`).
fn fraction(centroid: f64, span: usize) -> f64 {
    (centroid + 0.5) / span as f64
}

fn inside_margin(props: &RegionProps, extent: &CellExtent) -> bool {
    let band = EDGE_MARGIN..=1.0 - EDGE_MARGIN;
    band.contains(&fraction(props.centroid.x, extent.width()))
        && band.contains(&fraction(props.centroid.y, extent.height()))
}

pub fn extract(inputs: &NaturalInputs<'_>, extent: &CellExtent, id: u32) -> CellContent {
    let local = inputs.guide.crop(extent);
    let components = inputs.labeler.label(&local.foreground());
    let props = inputs.measurer.properties(&components);

    let mut keep = vec![false; components.max_label() as usize + 1];
    let mut kept = 0usize;
    let mut rejected = 0usize;
    for (&component, p) in &props {
        if inside_margin(p, extent) {
            if let Some(slot) = keep.get_mut(component as usize) {
                *slot = true;
            }
            kept += 1;
        } else {
            rejected += 1;
        }
    }

    if kept == 0 {
        let mut pixels = LabelImage::new(extent.width(), extent.height());
        if let Some((cx, cy)) = extent.center() {
            pixels.set(cx, cy, id);
        }
        if rejected > 0 {
            debug!(
                "cell id {id}: all {rejected} components on the border, marking centre only"
            );
        }
        return CellContent {
            pixels,
            kept,
            rejected,
            fallback: true,
        };
    }

    let pixels = components.map(|c| if keep[c as usize] { id } else { 0 });
    CellContent {
        pixels,
        kept,
        rejected,
        fallback: false,
    }
}
