//! Owned single-channel raster in row-major layout (stride == width).
//!
//! `Plane<u32>` is the label image used throughout the crate (0 is
//! background, every positive value one object) and `Plane<bool>` the binary
//! mask. Sub-rectangles are addressed with [`CellExtent`] in 0-based,
//! half-open pixel coordinates.
use crate::grid::CellExtent;
use crate::image::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane<T> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

/// Integer label image: 0 is background, `> 0` an object id.
pub type LabelImage = Plane<u32>;

/// Binary mask.
pub type Mask = Plane<bool>;

impl<T: Copy + Default> Plane<T> {
    /// Construct a default-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![T::default(); w * h],
        }
    }

    /// Wrap existing row-major storage; `None` when the length does not match.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Build from nested rows, mostly for fixtures. Ragged input yields `None`.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != w) {
            return None;
        }
        Self::from_vec(w, h, rows.concat())
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    /// Copy out the pixels under `extent`. The extent must lie inside the plane.
    pub fn crop(&self, extent: &CellExtent) -> Self {
        let mut out = Self::new(extent.width(), extent.height());
        for (dy, y) in (extent.y0..extent.y1).enumerate() {
            let src = &self.row(y)[extent.x0..extent.x1];
            out.row_mut(dy).copy_from_slice(src);
        }
        out
    }

    /// Write `patch` into the sub-rectangle `extent`; sizes must agree.
    pub fn blit(&mut self, extent: &CellExtent, patch: &Self) {
        debug_assert_eq!(patch.w, extent.width());
        debug_assert_eq!(patch.h, extent.height());
        for (dy, y) in (extent.y0..extent.y1).enumerate() {
            let dst = &mut self.row_mut(y)[extent.x0..extent.x1];
            dst.copy_from_slice(patch.row(dy));
        }
    }

    /// Pixel-wise conversion into a plane of another element type.
    pub fn map<U, F>(&self, f: F) -> Plane<U>
    where
        U: Copy + Default,
        F: Fn(T) -> U,
    {
        Plane {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn count_where<F: Fn(T) -> bool>(&self, pred: F) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }
}

impl LabelImage {
    /// Foreground mask (`label > 0`).
    pub fn foreground(&self) -> Mask {
        self.map(|v| v > 0)
    }

    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

impl<T: Copy> ImageView for Plane<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl<T: Copy> ImageViewMut for Plane<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
