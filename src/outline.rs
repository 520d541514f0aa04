//! Outline overlay for visually auditing grid alignment.
//!
//! Four binary masks are derived from the assembled labels and their
//! perimeters OR-ed together:
//!
//! 1. `label mod 2` (alternates with every id),
//! 2. `floor(label / rows) mod 2`,
//! 3. `floor(label / cols) mod 2`,
//! 4. `label > 0` (plain object boundary).
//!
//! A perimeter pixel is a set pixel with at least one unset neighbour inside
//! the image; the canvas edge does not count as background.
use crate::image::{ImageView, LabelImage, Mask};
use crate::regions::Connectivity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineMasks {
    pub id_parity: Mask,
    pub row_band: Mask,
    pub col_band: Mask,
    pub object: Mask,
}

impl OutlineMasks {
    /// Logical OR of the four perimeter masks.
    pub fn overlay(&self) -> Mask {
        let mut out = self.object.clone();
        for (i, px) in out.data.iter_mut().enumerate() {
            *px |= self.id_parity.data[i] || self.row_band.data[i] || self.col_band.data[i];
        }
        out
    }
}

/// Set pixels adjacent to at least one unset pixel.
pub fn perimeter(mask: &Mask, connectivity: Connectivity) -> Mask {
    let (w, h) = (mask.width(), mask.height());
    let mut out = Mask::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if !mask.get(x, y) {
                continue;
            }
            let edge = connectivity.offsets().iter().any(|&(dx, dy)| {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                nx >= 0
                    && ny >= 0
                    && (nx as usize) < w
                    && (ny as usize) < h
                    && !mask.get(nx as usize, ny as usize)
            });
            if edge {
                let i = out.idx(x, y);
                out.data[i] = true;
            }
        }
    }
    out
}

/// Encode the four perimeter masks using 4-connected perimeters.
pub fn encode_outline(labels: &LabelImage, rows: usize, cols: usize) -> OutlineMasks {
    encode_outline_with(labels, rows, cols, Connectivity::Four)
}

pub fn encode_outline_with(
    labels: &LabelImage,
    rows: usize,
    cols: usize,
    connectivity: Connectivity,
) -> OutlineMasks {
    let rows = rows.max(1) as u32;
    let cols = cols.max(1) as u32;
    let band = |f: &dyn Fn(u32) -> bool| perimeter(&labels.map(f), connectivity);
    OutlineMasks {
        id_parity: band(&|v| v % 2 == 1),
        row_band: band(&|v| (v / rows) % 2 == 1),
        col_band: band(&|v| (v / cols) % 2 == 1),
        object: band(&|v| v > 0),
    }
}

/// Overlay only, for callers that do not need the individual masks.
pub fn outline_overlay(labels: &LabelImage, rows: usize, cols: usize) -> Mask {
    encode_outline(labels, rows, cols).overlay()
}
