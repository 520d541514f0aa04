//! Flat disk structuring element and cell stamping.
use crate::grid::CellExtent;
use crate::image::{ImageViewMut, LabelImage};

/// Flat disk of all offsets `(dx, dy)` with `dx² + dy² <= r²`.
///
/// Only the radius is stored; stamping walks the rows of the target cell, so
/// the cost follows the cell size however large the radius is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiskElement {
    radius: u32,
}

/// Largest `s` with `s * s <= n`.
fn isqrt(n: u64) -> u64 {
    let mut s = (n as f64).sqrt() as u64;
    while s.checked_mul(s).map_or(true, |sq| sq > n) {
        s -= 1;
    }
    while (s + 1).checked_mul(s + 1).is_some_and(|sq| sq <= n) {
        s += 1;
    }
    s
}

impl DiskElement {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Horizontal half-width of the disk at vertical offset `dy`, `None`
    /// outside the disk.
    pub fn half_width(&self, dy: u64) -> Option<u64> {
        let r2 = u64::from(self.radius).pow(2);
        let dy2 = dy.checked_mul(dy)?;
        (dy2 <= r2).then(|| isqrt(r2 - dy2))
    }

    /// Number of pixels in the unclipped disk.
    pub fn pixel_count(&self) -> usize {
        let row = |dy| 2 * self.half_width(dy).unwrap_or(0) as usize + 1;
        row(0) + 2 * (1..=u64::from(self.radius)).map(row).sum::<usize>()
    }
}

/// Stamp `disk` valued `id` at the centre of the extent.
///
/// Parts of the disk outside the extent are clipped; the disk is never shrunk.
pub fn stamp(disk: &DiskElement, extent: &CellExtent, id: u32) -> LabelImage {
    let mut patch = LabelImage::new(extent.width(), extent.height());
    let Some((cx, cy)) = extent.center() else {
        return patch;
    };
    let w = patch.w;
    for y in 0..patch.h {
        let Some(hw) = disk.half_width(y.abs_diff(cy) as u64) else {
            continue;
        };
        let hw = usize::try_from(hw).unwrap_or(usize::MAX);
        let x0 = cx.saturating_sub(hw);
        let x1 = cx.saturating_add(hw).saturating_add(1).min(w);
        patch.row_mut(y)[x0..x1].fill(id);
    }
    patch
}
