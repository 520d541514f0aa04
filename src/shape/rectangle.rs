use crate::grid::CellExtent;
use crate::image::LabelImage;

/// Fill the whole extent with `id`.
pub fn fill(extent: &CellExtent, id: u32) -> LabelImage {
    let mut patch = LabelImage::new(extent.width(), extent.height());
    patch.data.fill(id);
    patch
}
