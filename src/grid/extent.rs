//! Cell extent calculator.
//!
//! Cell `(row, col)` (0-based) covers the half-open pixel ranges
//!
//! ```text
//! y: [topmost  - floor(y_div/2) + row*y_div, topmost  - floor(y_div/2) + (row+1)*y_div)
//! x: [leftmost - floor(x_div/2) + col*x_div, leftmost - floor(x_div/2) + (col+1)*x_div)
//! ```
//!
//! clamped to the canvas. Clamping shrinks edge cells, it never grows them,
//! so extents of distinct cells are always disjoint.
use super::GridGeometry;

/// Pixel sub-rectangle `[x0, x1) × [y0, y1)` of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellExtent {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl CellExtent {
    #[inline]
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 == self.x0 || self.y1 == self.y0
    }

    /// Local center pixel, `None` for an empty extent.
    ///
    /// For even sizes the lower of the two middle pixels is used.
    pub fn center(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        Some(((self.width() - 1) / 2, (self.height() - 1) / 2))
    }
}

/// Clamp one axis of a cell to `[0, limit]`, keeping `start <= end`.
fn axis_span(origin: i64, pitch: usize, index: usize, limit: usize) -> (usize, usize) {
    let pitch = pitch as i64;
    let base = origin - pitch / 2;
    let start = base + index as i64 * pitch;
    let end = start + pitch;
    let limit = limit as i64;
    let start = start.clamp(0, limit);
    let end = end.clamp(start, limit);
    (start as usize, end as usize)
}

/// Pixel extent of cell `(row, col)` within the canvas.
///
/// Never fails; cells outside the canvas come back empty.
pub fn cell_extent(grid: &GridGeometry, row: usize, col: usize) -> CellExtent {
    let (y0, y1) = axis_span(grid.topmost, grid.y_div, row, grid.canvas_height);
    let (x0, x1) = axis_span(grid.leftmost, grid.x_div, col, grid.canvas_width);
    CellExtent { x0, y0, x1, y1 }
}
