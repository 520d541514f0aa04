//! Conversions from label images and masks to displayable images.
//!
//! - `render_label_matrix`: RGB palette lookup or raw 16-bit grayscale.
//! - `render_overlay`: RGB composite of labels, outline pixels and gridlines.
use super::{ImageView, LabelImage, Mask};
use crate::grid::Gridlines;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// How a label matrix artifact is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    #[serde(alias = "rgb", alias = "RGB")]
    Rgb,
    #[serde(alias = "grayscale", alias = "Gray")]
    Grayscale,
}

const OUTLINE: [u8; 3] = [255, 255, 255];
const GRIDLINE: [u8; 3] = [220, 40, 40];

/// Stable colour for an object id; background is black.
pub fn label_color(id: u32) -> [u8; 3] {
    if id == 0 {
        return [0, 0, 0];
    }
    // Knuth multiplicative hash spreads neighbouring ids across the palette.
    let h = id.wrapping_mul(2_654_435_761);
    let channel = |shift: u32| 64 + ((h >> shift) & 0xff) as u8 % 192;
    [channel(0), channel(8), channel(16)]
}

/// Mask as an 8-bit image, 255 for set pixels.
pub fn mask_to_gray(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.w as u32, mask.h as u32, |x, y| {
        Luma([if mask.get(x as usize, y as usize) { 255 } else { 0 }])
    })
}

pub fn render_label_matrix(labels: &LabelImage, mode: RenderMode) -> DynamicImage {
    let (w, h) = (labels.w as u32, labels.h as u32);
    match mode {
        RenderMode::Rgb => DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            Rgb(label_color(labels.get(x as usize, y as usize)))
        })),
        RenderMode::Grayscale => {
            let gray: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(w, h, |x, y| {
                let v = labels.get(x as usize, y as usize);
                Luma([v.min(u16::MAX as u32) as u16])
            });
            DynamicImage::ImageLuma16(gray)
        }
    }
}

/// Labels at half intensity with outline pixels and gridlines on top.
pub fn render_overlay(labels: &LabelImage, outline: &Mask, gridlines: &Gridlines) -> RgbImage {
    let (w, h) = (labels.w, labels.h);
    let mut out = RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let [r, g, b] = label_color(labels.get(x as usize, y as usize));
        Rgb([r / 2, g / 2, b / 2])
    });
    for &gx in &gridlines.x {
        if (0..w as i64).contains(&gx) {
            for y in 0..h as u32 {
                out.put_pixel(gx as u32, y, Rgb(GRIDLINE));
            }
        }
    }
    for &gy in &gridlines.y {
        if (0..h as i64).contains(&gy) {
            for x in 0..w as u32 {
                out.put_pixel(x, gy as u32, Rgb(GRIDLINE));
            }
        }
    }
    for (y, row) in outline.rows().enumerate() {
        for (x, &on) in row.iter().enumerate() {
            if on {
                out.put_pixel(x as u32, y as u32, Rgb(OUTLINE));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_keeps_raw_ids() {
        let labels = LabelImage::from_rows(&[vec![0, 3], vec![700, 1]]).unwrap();
        let DynamicImage::ImageLuma16(img) = render_label_matrix(&labels, RenderMode::Grayscale)
        else {
            panic!("expected 16-bit grayscale");
        };
        assert_eq!(img.get_pixel(1, 0).0, [3]);
        assert_eq!(img.get_pixel(0, 1).0, [700]);
    }

    #[test]
    fn rgb_background_is_black_and_ids_are_coloured() {
        let labels = LabelImage::from_rows(&[vec![0, 3]]).unwrap();
        let img = render_label_matrix(&labels, RenderMode::Rgb).to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, label_color(3));
        assert!(label_color(3).iter().all(|&c| c >= 64));
    }

    #[test]
    fn overlay_draws_outline_over_gridlines() {
        let labels = LabelImage::new(4, 4);
        let mut outline = Mask::new(4, 4);
        let i = outline.idx(1, 1);
        outline.data[i] = true;
        let lines = Gridlines {
            x: vec![-3, 1],
            y: vec![2, 9],
        };
        let img = render_overlay(&labels, &outline, &lines);
        assert_eq!(img.get_pixel(1, 1).0, OUTLINE);
        assert_eq!(img.get_pixel(1, 3).0, GRIDLINE);
        assert_eq!(img.get_pixel(3, 2).0, GRIDLINE);
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0]);
    }
}
