use grid_objects::image::{ImageViewMut, LabelImage};
use grid_objects::{GridGeometry, SpotNumbering};

/// Regular grid whose cells tile `[0, cols*pitch) × [0, rows*pitch)` exactly.
pub fn tiled_grid(rows: usize, cols: usize, pitch: usize) -> GridGeometry {
    let half = (pitch / 2) as i64;
    GridGeometry::new(
        (cols * pitch, rows * pitch),
        (rows, cols),
        (pitch, pitch),
        (half, half),
        SpotNumbering::RowsFirst,
    )
}

/// Paint a filled square of side `size` with top-left corner `(x, y)`.
pub fn paint_square(labels: &mut LabelImage, x: usize, y: usize, size: usize, id: u32) {
    for yy in y..(y + size).min(labels.h) {
        for xx in x..(x + size).min(labels.w) {
            labels.set(xx, yy, id);
        }
    }
}

/// One `size`-pixel square centred in every cell of `grid`, numbered 1.. .
pub fn centred_blobs(grid: &GridGeometry, size: usize) -> LabelImage {
    let mut labels = LabelImage::new(grid.canvas_width, grid.canvas_height);
    for (n, cell) in grid.cells().enumerate() {
        let e = cell.extent;
        let x = e.x0 + (e.width() - size) / 2;
        let y = e.y0 + (e.height() - size) / 2;
        paint_square(&mut labels, x, y, size, n as u32 + 1);
    }
    labels
}
