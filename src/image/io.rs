//! File I/O for label images, masks and JSON.
//!
//! - `load_label_image`: read an 8- or 16-bit gray PNG into labels, raw ids.
//! - `save_label_image`: write labels as a 16-bit grayscale PNG.
//! - `save_mask`: write a mask as an 8-bit 0/255 PNG.
//! - `save_image`: write any rendered image.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::render::{mask_to_gray, render_label_matrix, RenderMode};
use super::{LabelImage, Mask};
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and interpret each gray level as an object id.
///
/// Only single-channel 8- or 16-bit images are accepted; values are taken
/// as-is, never rescaled. Colour images are rejected because collapsing them
/// to luminance can merge distinct objects.
pub fn load_label_image(path: &Path) -> Result<LabelImage, String> {
    let img =
        image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let data: Vec<u32> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(u32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(u32::from).collect(),
        other => {
            return Err(format!(
                "{} is not a grayscale label image (found {:?})",
                path.display(),
                other.color()
            ))
        }
    };
    LabelImage::from_vec(w, h, data)
        .ok_or_else(|| format!("Unexpected buffer size in {}", path.display()))
}

pub fn save_label_image(labels: &LabelImage, path: &Path) -> Result<(), String> {
    save_image(&render_label_matrix(labels, RenderMode::Grayscale), path)
}

pub fn save_mask(mask: &Mask, path: &Path) -> Result<(), String> {
    save_image(&DynamicImage::ImageLuma8(mask_to_gray(mask)), path)
}

pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
