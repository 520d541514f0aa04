//! Connected component labeling on top of `imageproc::region_labelling`.
//!
//! `imageproc` runs a two-pass union-find and numbers the resulting
//! components consecutively in raster order of first appearance, which is
//! exactly the [`ComponentLabeler`] contract.
use super::{ComponentLabeler, Connectivity};
use crate::image::render::mask_to_gray;
use crate::image::{ImageView, LabelImage, Mask};
use image::Luma;
use imageproc::region_labelling::{self, connected_components};

#[derive(Clone, Copy, Debug, Default)]
pub struct TwoPassLabeler {
    pub connectivity: Connectivity,
}

impl TwoPassLabeler {
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }
}

impl From<Connectivity> for region_labelling::Connectivity {
    fn from(c: Connectivity) -> Self {
        match c {
            Connectivity::Four => region_labelling::Connectivity::Four,
            Connectivity::Eight => region_labelling::Connectivity::Eight,
        }
    }
}

impl ComponentLabeler for TwoPassLabeler {
    fn label(&self, mask: &Mask) -> LabelImage {
        let (w, h) = (mask.width(), mask.height());
        if mask.is_empty() {
            return LabelImage::new(w, h);
        }
        let gray = mask_to_gray(mask);
        let components = connected_components(&gray, self.connectivity.into(), Luma([0u8]));
        LabelImage {
            w,
            h,
            stride: w,
            data: components.into_raw(),
        }
    }
}
