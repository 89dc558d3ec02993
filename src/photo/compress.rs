//! Downscaling and JPEG re-encoding of captured photos.

use std::io::Cursor;
use std::path::Path;

use bevy::log::info;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::error::{AnnotateError, Result};

/// Target size for a photo `width` x `height` capped at `max_width`. Never upscales.
pub fn scaled_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scale = max_width as f64 / width as f64;
    let scaled_height = ((height as f64 * scale).round() as u32).max(1);
    (max_width, scaled_height)
}

/// Encode as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Downscale `source` to at most `max_width` and write it to `dest` as JPEG.
///
/// Returns the stored size.
pub fn compress_photo(source: &Path, dest: &Path, max_width: u32, quality: u8) -> Result<(u32, u32)> {
    let decoded =
        image::open(source).map_err(|e| AnnotateError::source_unavailable(source, e))?;
    let (width, height) = scaled_size(decoded.width(), decoded.height(), max_width);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded.to_rgba8()
    } else {
        decoded
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8()
    };

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = encode_jpeg(&resized, quality)?;
    std::fs::write(dest, &bytes)?;

    info!(
        "Compressed {:?} ({}x{}) to {:?} ({}x{}, {} bytes)",
        source,
        decoded.width(),
        decoded.height(),
        dest,
        width,
        height,
        bytes.len()
    );
    Ok((width, height))
}
