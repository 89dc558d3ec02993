//! The decoded source photo that every render starts from.

use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use bevy::math::UVec2;
use image::RgbaImage;
use tiny_skia::{Pixmap, PixmapRef};

use crate::error::{AnnotateError, Result};
use crate::render::raster::rgba_to_pixmap;

/// A photo decoded at its native resolution. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct SourcePhoto {
    path: Option<PathBuf>,
    pixmap: Pixmap,
}

impl SourcePhoto {
    /// Decode a photo from disk.
    ///
    /// Any failure (missing file, unknown format, corrupt data) is reported as
    /// [`AnnotateError::SourceUnavailable`].
    pub fn load(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|e| {
            warn!("Failed to load photo {:?}: {}", path, e);
            AnnotateError::source_unavailable(path, e)
        })?;
        let mut photo = Self::from_rgba(&decoded.to_rgba8())
            .map_err(|e| AnnotateError::source_unavailable(path, e))?;
        photo.path = Some(path.to_path_buf());
        info!("Loaded photo {:?} ({}x{})", path, photo.width(), photo.height());
        Ok(photo)
    }

    /// Wrap an already decoded image.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        Ok(Self {
            path: None,
            pixmap: rgba_to_pixmap(image)?,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Canonical drawing-space size.
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width(), self.height())
    }

    pub(crate) fn pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_keeps_native_size() {
        let photo = SourcePhoto::from_rgba(&RgbaImage::new(640, 480)).unwrap();
        assert_eq!(photo.size(), UVec2::new(640, 480));
        assert!(photo.path().is_none());
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let path = std::env::temp_dir().join(format!("eyeagle-missing-{}.jpg", uuid::Uuid::now_v7()));
        let err = SourcePhoto::load(&path).unwrap_err();
        assert!(err.is_source_unavailable(), "unexpected error: {}", err);
    }

    #[test]
    fn test_corrupt_file_is_source_unavailable() {
        let path = std::env::temp_dir().join(format!("eyeagle-corrupt-{}.png", uuid::Uuid::now_v7()));
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = SourcePhoto::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.unwrap_err().is_source_unavailable());
    }

    #[test]
    fn test_load_round_trips_png() {
        let path = std::env::temp_dir().join(format!("eyeagle-photo-{}.png", uuid::Uuid::now_v7()));
        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(1, 1, image::Rgba([9, 8, 7, 255]));
        image.save(&path).unwrap();

        let photo = SourcePhoto::load(&path);
        std::fs::remove_file(&path).ok();

        let photo = photo.unwrap();
        assert_eq!(photo.size(), UVec2::new(4, 3));
        assert_eq!(photo.path(), Some(path.as_path()));
    }
}
