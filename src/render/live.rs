//! Interactive canvas for the open session.

use bevy::log::trace;
use bevy::math::UVec2;
use image::RgbaImage;

use crate::annotate::AnnotationSession;
use crate::error::Result;
use crate::photo::SourcePhoto;

use super::surface::DrawingSurface;

/// Owns the loaded photo and the backing store for one session.
///
/// [`LiveCanvas::refresh`] redraws only when the session's revision has moved since the
/// last draw.
#[derive(Debug)]
pub struct LiveCanvas {
    source: SourcePhoto,
    surface: DrawingSurface,
    drawn_revision: Option<u64>,
}

impl LiveCanvas {
    pub fn new(source: SourcePhoto) -> Result<Self> {
        let surface = DrawingSurface::for_photo(&source)?;
        Ok(Self {
            source,
            surface,
            drawn_revision: None,
        })
    }

    pub fn source(&self) -> &SourcePhoto {
        &self.source
    }

    /// Canonical drawing-space size.
    pub fn size(&self) -> UVec2 {
        self.source.size()
    }

    /// Bring the backing store up to date. Returns true when it was redrawn.
    pub fn refresh(&mut self, session: &AnnotationSession) -> Result<bool> {
        if self.drawn_revision == Some(session.revision()) {
            return Ok(false);
        }
        self.surface
            .paint(&self.source, session.marks(), session.in_progress())?;
        self.drawn_revision = Some(session.revision());
        trace!("Canvas redrawn at revision {}", session.revision());
        Ok(true)
    }

    /// Force the next [`LiveCanvas::refresh`] to redraw.
    pub fn invalidate(&mut self) {
        self.drawn_revision = None;
    }

    /// Current backing store contents.
    pub fn snapshot(&self) -> RgbaImage {
        self.surface.to_rgba()
    }
}
