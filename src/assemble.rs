//! Cell assembler: one policy call per grid cell, written into a fresh
//! canvas-sized label image.
//!
//! Cell extents are disjoint, so cells are synthesized independently (in
//! parallel with the `parallel` feature) and then copied into their own
//! sub-rectangles. The result is identical with or without the feature.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{GridError, Result};
use crate::grid::{GridCell, GridGeometry};
use crate::image::LabelImage;
use crate::shape::{CellContent, ShapePolicy};
use log::{debug, warn};
use serde::Serialize;

/// Per-invocation counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyStats {
    pub cells: usize,
    /// Cells whose extent fell entirely outside the canvas.
    pub empty_cells: usize,
    pub components_kept: usize,
    pub components_rejected: usize,
    pub fallback_cells: usize,
    /// Non-background pixels in the output.
    pub labelled_pixels: usize,
}

#[derive(Clone, Debug)]
pub struct Assembly {
    pub labels: LabelImage,
    pub stats: AssemblyStats,
}

fn check_inputs(grid: &GridGeometry, policy: &ShapePolicy<'_>) -> Result<()> {
    grid.validate()?;
    if let ShapePolicy::Natural(inputs) = policy {
        let (w, h) = (inputs.guide.w, inputs.guide.h);
        if w != grid.canvas_width || h != grid.canvas_height {
            return Err(GridError::CanvasMismatch {
                canvas_w: grid.canvas_width,
                canvas_h: grid.canvas_height,
                actual_w: w,
                actual_h: h,
            });
        }
    }
    Ok(())
}

fn synthesize_cells(cells: &[GridCell], policy: &ShapePolicy<'_>) -> Vec<CellContent> {
    #[cfg(feature = "parallel")]
    {
        cells
            .par_iter()
            .map(|cell| policy.synthesize(&cell.extent, cell.id))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        cells
            .iter()
            .map(|cell| policy.synthesize(&cell.extent, cell.id))
            .collect()
    }
}

/// Sweep every cell of `grid` with `policy`.
///
/// Fails before producing output if the grid is malformed or the guide
/// objects do not match the canvas.
pub fn assemble(grid: &GridGeometry, policy: &ShapePolicy<'_>) -> Result<Assembly> {
    check_inputs(grid, policy)?;

    let cells: Vec<GridCell> = grid.cells().collect();
    let contents = synthesize_cells(&cells, policy);

    let mut labels = LabelImage::new(grid.canvas_width, grid.canvas_height);
    let mut stats = AssemblyStats {
        cells: cells.len(),
        ..Default::default()
    };
    for (cell, content) in cells.iter().zip(&contents) {
        if cell.extent.is_empty() {
            stats.empty_cells += 1;
            continue;
        }
        labels.blit(&cell.extent, &content.pixels);
        stats.components_kept += content.kept;
        stats.components_rejected += content.rejected;
        stats.fallback_cells += usize::from(content.fallback);
    }
    if stats.empty_cells > 0 {
        warn!(
            "{} of {} cells lie outside the {}x{} canvas",
            stats.empty_cells, stats.cells, grid.canvas_width, grid.canvas_height
        );
    }
    stats.labelled_pixels = labels.count_where(|v| v > 0);
    debug!(
        "assembled {} cells with {:?}: {} labelled px, {} fallback",
        stats.cells,
        policy.kind(),
        stats.labelled_pixels,
        stats.fallback_cells
    );

    Ok(Assembly { labels, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SpotNumbering;
    use crate::image::{ImageView, Mask};
    use crate::regions::{
        ComponentLabeler, MomentMeasurer, RegionMeasurer, RegionProps, RegionTable,
        TwoPassLabeler,
    };
    use crate::shape::{DiskElement, NaturalInputs, ShapeKind};
    use nalgebra::Point2;

    fn grid_2x3() -> GridGeometry {
        GridGeometry::new((30, 20), (2, 3), (10, 10), (5, 5), SpotNumbering::RowsFirst)
    }

    #[test]
    fn rectangles_cover_every_cell() {
        let grid = grid_2x3();
        let out = assemble(&grid, &ShapePolicy::Rectangle).unwrap();
        for cell in grid.cells() {
            for y in cell.extent.y0..cell.extent.y1 {
                for x in cell.extent.x0..cell.extent.x1 {
                    assert_eq!(out.labels.get(x, y), cell.id);
                }
            }
        }
        assert_eq!(out.stats.labelled_pixels, 600);
    }

    #[test]
    fn circles_have_the_same_footprint_in_every_interior_cell() {
        let grid = GridGeometry::new(
            (60, 60),
            (3, 3),
            (20, 20),
            (10, 10),
            SpotNumbering::ColumnsFirst,
        );
        let disk = DiskElement::new(4);
        let expected = disk.pixel_count();
        let out = assemble(&grid, &ShapePolicy::Circle(disk)).unwrap();
        for cell in grid.cells() {
            assert_eq!(out.labels.count_where(|v| v == cell.id), expected);
        }
    }

    #[test]
    fn natural_requires_matching_canvas() {
        let grid = grid_2x3();
        let guide = LabelImage::new(10, 10);
        let labeler = TwoPassLabeler::default();
        let policy = ShapePolicy::resolve(
            ShapeKind::Natural,
            None,
            Some(NaturalInputs {
                guide: &guide,
                labeler: &labeler,
                measurer: &MomentMeasurer,
            }),
        )
        .unwrap();
        assert!(matches!(
            assemble(&grid, &policy),
            Err(GridError::CanvasMismatch { .. })
        ));
    }

    #[test]
    fn malformed_grid_produces_no_output() {
        let mut grid = grid_2x3();
        grid.spot_table[1][2] = grid.spot_table[0][0];
        assert!(matches!(
            assemble(&grid, &ShapePolicy::Rectangle),
            Err(GridError::InvalidGrid(_))
        ));
    }

    /// Labeler that reports the whole foreground as one component.
    struct OneBlob;

    impl ComponentLabeler for OneBlob {
        fn label(&self, mask: &Mask) -> LabelImage {
            mask.map(u32::from)
        }
    }

    /// Measurer that places every component at a fixed cell fraction.
    struct FixedCentroid {
        x: f64,
    }

    impl RegionMeasurer for FixedCentroid {
        fn properties(&self, labels: &LabelImage) -> RegionTable {
            let area = labels.count_where(|v| v > 0);
            if area == 0 {
                return RegionTable::new();
            }
            let mut table = RegionTable::new();
            table.insert(
                1,
                RegionProps {
                    area,
                    centroid: Point2::new(
                        self.x * labels.width() as f64,
                        labels.height() as f64 / 2.0,
                    ),
                },
            );
            table
        }
    }

    fn assemble_natural(
        grid: &GridGeometry,
        guide: &LabelImage,
        measurer: &dyn RegionMeasurer,
    ) -> Assembly {
        let policy = ShapePolicy::Natural(NaturalInputs {
            guide,
            labeler: &OneBlob,
            measurer,
        });
        assemble(grid, &policy).unwrap()
    }

    #[test]
    fn natural_policy_only_depends_on_the_region_interfaces() {
        let grid = grid_2x3();
        let mut guide = LabelImage::new(30, 20);
        guide.data.fill(1);

        let kept = assemble_natural(&grid, &guide, &FixedCentroid { x: 0.5 });
        assert_eq!(kept.stats.components_kept, 6);
        assert_eq!(kept.stats.labelled_pixels, 600);

        let dropped = assemble_natural(&grid, &guide, &FixedCentroid { x: 0.02 });
        assert_eq!(dropped.stats.components_rejected, 6);
        assert_eq!(dropped.stats.fallback_cells, 6);
        assert_eq!(dropped.stats.labelled_pixels, 6);
    }

    #[test]
    fn rectangle_assembly_is_deterministic() {
        let grid = grid_2x3();
        let a = assemble(&grid, &ShapePolicy::Rectangle).unwrap();
        let b = assemble(&grid, &ShapePolicy::Rectangle).unwrap();
        assert_eq!(a.labels, b.labels);
    }
}
