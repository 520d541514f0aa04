//! Rectilinear grid geometry.
//!
//! A grid tiles a `canvas_width × canvas_height` canvas into `rows × cols`
//! cells of pitch `(x_div, y_div)`. `(leftmost, topmost)` is the centre of the
//! first cell, and `spot_table[row][col]` the object id assigned to each cell.
//! Grids are produced by an upstream stage; this module only reads, validates
//! and measures them.

pub mod extent;

pub use extent::{cell_extent, CellExtent};

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub rows: usize,
    pub cols: usize,
    /// Horizontal pitch in pixels.
    pub x_div: usize,
    /// Vertical pitch in pixels.
    pub y_div: usize,
    pub leftmost: i64,
    pub topmost: i64,
    /// `rows` rows of `cols` positive, distinct ids.
    pub spot_table: Vec<Vec<u32>>,
}

/// Order in which [`GridGeometry::new`] hands out ids, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotNumbering {
    /// Left to right, then top to bottom.
    RowsFirst,
    /// Top to bottom, then left to right.
    ColumnsFirst,
}

impl SpotNumbering {
    pub fn table(self, rows: usize, cols: usize) -> Vec<Vec<u32>> {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| match self {
                        SpotNumbering::RowsFirst => (r * cols + c + 1) as u32,
                        SpotNumbering::ColumnsFirst => (c * rows + r + 1) as u32,
                    })
                    .collect()
            })
            .collect()
    }
}

/// One cell of the sweep: position, assigned id and pixel extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub id: u32,
    pub extent: CellExtent,
}

/// Cell boundary coordinates for overlay drawing.
///
/// `x` holds `cols + 1` vertical lines and `y` holds `rows + 1` horizontal
/// lines, in pixel coordinates that may fall outside the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gridlines {
    pub x: Vec<i64>,
    pub y: Vec<i64>,
}

impl GridGeometry {
    /// Regular grid with a generated id table.
    pub fn new(
        canvas: (usize, usize),
        shape: (usize, usize),
        pitch: (usize, usize),
        origin: (i64, i64),
        numbering: SpotNumbering,
    ) -> Self {
        let (rows, cols) = shape;
        Self {
            canvas_width: canvas.0,
            canvas_height: canvas.1,
            rows,
            cols,
            x_div: pitch.0,
            y_div: pitch.1,
            leftmost: origin.0,
            topmost: origin.1,
            spot_table: numbering.table(rows, cols),
        }
    }

    /// Check the id table against the declared shape and the id invariants.
    pub fn validate(&self) -> Result<()> {
        if self.x_div == 0 || self.y_div == 0 {
            return Err(GridError::InvalidGrid(format!(
                "pitch must be positive, got {}x{}",
                self.x_div, self.y_div
            )));
        }
        if self.spot_table.len() != self.rows {
            return Err(GridError::InvalidGrid(format!(
                "spot table has {} rows, expected {}",
                self.spot_table.len(),
                self.rows
            )));
        }
        let mut seen = HashSet::with_capacity(self.rows * self.cols);
        for (r, row) in self.spot_table.iter().enumerate() {
            if row.len() != self.cols {
                return Err(GridError::InvalidGrid(format!(
                    "spot table row {r} has {} entries, expected {}",
                    row.len(),
                    self.cols
                )));
            }
            for (c, &id) in row.iter().enumerate() {
                if id == 0 {
                    return Err(GridError::InvalidGrid(format!(
                        "cell ({r}, {c}) has id 0; ids must be positive"
                    )));
                }
                if !seen.insert(id) {
                    return Err(GridError::InvalidGrid(format!(
                        "id {id} assigned to more than one cell"
                    )));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn spot_id(&self, row: usize, col: usize) -> u32 {
        self.spot_table[row][col]
    }

    pub fn extent(&self, row: usize, col: usize) -> CellExtent {
        cell_extent(self, row, col)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| GridCell {
                row,
                col,
                id: self.spot_id(row, col),
                extent: self.extent(row, col),
            })
        })
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn gridlines(&self) -> Gridlines {
        let lines = |origin: i64, pitch: usize, n: usize| -> Vec<i64> {
            let pitch = pitch as i64;
            let base = origin - pitch / 2;
            (0..=n as i64).map(|k| base + k * pitch).collect()
        };
        Gridlines {
            x: lines(self.leftmost, self.x_div, self.cols),
            y: lines(self.topmost, self.y_div, self.rows),
        }
    }
}
