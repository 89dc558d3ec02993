//! Resources describing the photo being annotated and where it sits on screen.

use bevy::prelude::*;

use crate::annotate::{AnnotationSession, PhotoKey, SurfaceLayout};
use crate::render::LiveCanvas;

/// A loaded photo together with its editing session.
pub struct OpenPhoto {
    pub session: AnnotationSession,
    pub canvas: LiveCanvas,
}

/// The photo currently open for annotation, if any.
///
/// Pointer input is only wired while this holds a photo, which is only after the
/// source image has loaded and sized the canvas.
#[derive(Resource, Default)]
pub struct ActiveSession {
    pub open: Option<OpenPhoto>,
}

impl ActiveSession {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn photo(&self) -> Option<&PhotoKey> {
        self.open.as_ref().map(|o| o.session.photo())
    }

    pub fn session(&self) -> Option<&AnnotationSession> {
        self.open.as_ref().map(|o| &o.session)
    }

    pub fn session_mut(&mut self) -> Option<&mut AnnotationSession> {
        self.open.as_mut().map(|o| &mut o.session)
    }
}

/// Screen area left free by the egui panels, in logical window pixels.
#[derive(Resource, Default)]
pub struct CanvasViewport {
    pub available: Option<Rect>,
}

/// Where the canvas was placed this frame. `None` until a photo is open and laid out.
#[derive(Resource, Default)]
pub struct CanvasLayout {
    pub layout: Option<SurfaceLayout>,
}
