use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::annotate::AnnotationMark;
use crate::error::Result;
use crate::photo::SourcePhoto;

use super::draw::{draw_mark, draw_marks};
use super::raster::{new_pixmap, pixmap_to_rgba};

/// Backing store sized to a photo's native resolution.
///
/// Both the interactive canvas and the export compositor render through
/// [`DrawingSurface::paint`].
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    pixmap: Pixmap,
}

impl DrawingSurface {
    pub fn for_photo(source: &SourcePhoto) -> Result<Self> {
        Ok(Self {
            pixmap: new_pixmap(source.width(), source.height())?,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Redraw from scratch: the photo 1:1, then committed marks in order, then the
    /// in-progress mark on top.
    pub fn paint(
        &mut self,
        source: &SourcePhoto,
        marks: &[AnnotationMark],
        in_progress: Option<&AnnotationMark>,
    ) -> Result<()> {
        if (self.width(), self.height()) != (source.width(), source.height()) {
            self.pixmap = new_pixmap(source.width(), source.height())?;
        }
        self.pixmap.data_mut().copy_from_slice(source.pixmap().data());

        draw_marks(&mut self.pixmap, marks);
        if let Some(mark) = in_progress {
            draw_mark(&mut self.pixmap, mark);
        }
        Ok(())
    }

    pub fn to_rgba(&self) -> RgbaImage {
        pixmap_to_rgba(&self.pixmap)
    }
}
