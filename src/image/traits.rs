/// Read-only access to a row-major single-channel raster.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    #[inline]
    fn get(&self, x: usize, y: usize) -> Self::Pixel {
        self.row(y)[x]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Mutable row access on top of [`ImageView`].
pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    #[inline]
    fn set(&mut self, x: usize, y: usize, v: Self::Pixel) {
        self.row_mut(y)[x] = v;
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}
