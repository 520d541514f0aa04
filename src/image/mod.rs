pub mod io;
pub mod plane;
pub mod render;
pub mod traits;

pub use self::plane::{LabelImage, Mask, Plane};
pub use self::traits::{ImageView, ImageViewMut, Rows};
