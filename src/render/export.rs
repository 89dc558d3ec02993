//! One-shot compositing of a finished mark list into the photo.

use std::path::Path;

use bevy::log::info;
use image::RgbaImage;

use crate::annotate::AnnotationMark;
use crate::constants::EXPORT_JPEG_QUALITY;
use crate::error::Result;
use crate::photo::{SourcePhoto, encode_jpeg};

use super::surface::DrawingSurface;

/// Flatten `marks` onto a fresh copy of `source` at native resolution.
pub fn export_composite(source: &SourcePhoto, marks: &[AnnotationMark]) -> Result<RgbaImage> {
    let mut surface = DrawingSurface::for_photo(source)?;
    surface.paint(source, marks, None)?;
    Ok(surface.to_rgba())
}

/// Write a composite to `path` as JPEG, creating parent directories as needed.
pub fn write_export(path: &Path, image: &RgbaImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = encode_jpeg(image, EXPORT_JPEG_QUALITY)?;
    std::fs::write(path, &bytes)?;
    info!(
        "Exported {}x{} composite to {:?} ({} bytes)",
        image.width(),
        image.height(),
        path,
        bytes.len()
    );
    Ok(())
}
