//! The editing context for one photo.
//!
//! A session owns the working mark list exclusively. It is seeded from the store when a
//! photo is opened, mutated only by gestures and undo, and either committed back as a
//! single replace or dropped.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use super::gesture::{GestureBuilder, GestureEnd};
use super::marks::{AnnotationMark, HexColor, MarkTool, Swatch};

/// Identifies a photo inside the audit store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoKey {
    pub area_id: String,
    pub photo_id: String,
}

impl PhotoKey {
    pub fn new(area_id: impl Into<String>, photo_id: impl Into<String>) -> Self {
        Self {
            area_id: area_id.into(),
            photo_id: photo_id.into(),
        }
    }
}

impl std::fmt::Display for PhotoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.area_id, self.photo_id)
    }
}

/// Final state handed to the audit store when a session is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCommit {
    pub photo: PhotoKey,
    pub marks: Vec<AnnotationMark>,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct AnnotationSession {
    photo: PhotoKey,
    marks: Vec<AnnotationMark>,
    gesture: GestureBuilder,
    tool: MarkTool,
    color: HexColor,
    comment: String,
    /// Bumped on every change that affects the rendered output
    revision: u64,
}

impl AnnotationSession {
    /// Open a session seeded with a photo's previously saved marks and comment.
    pub fn open(
        photo: PhotoKey,
        prior_marks: Vec<AnnotationMark>,
        prior_comment: impl Into<String>,
    ) -> Self {
        info!("Opened annotation session for {} ({} marks)", photo, prior_marks.len());
        Self {
            photo,
            marks: prior_marks,
            gesture: GestureBuilder::default(),
            tool: MarkTool::default(),
            color: HexColor::default(),
            comment: prior_comment.into(),
            revision: 0,
        }
    }

    pub fn photo(&self) -> &PhotoKey {
        &self.photo
    }

    /// Committed marks in z-order.
    pub fn marks(&self) -> &[AnnotationMark] {
        &self.marks
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn in_progress(&self) -> Option<&AnnotationMark> {
        self.gesture.in_progress()
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn tool(&self) -> MarkTool {
        self.tool
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Tool for the next gesture. Never touches existing marks.
    pub fn select_tool(&mut self, tool: MarkTool) {
        self.tool = tool;
    }

    /// Color for the next gesture, taken from the palette. Never touches existing marks.
    pub fn select_color(&mut self, swatch: Swatch) {
        self.color = swatch.color();
    }

    pub fn set_comment(&mut self, text: impl Into<String>) {
        self.comment = text.into();
    }

    /// Mutable access for text widgets that edit the comment in place.
    pub fn comment_mut(&mut self) -> &mut String {
        &mut self.comment
    }

    /// Pointer pressed at a canonical-space position.
    pub fn begin_gesture(&mut self, at: Vec2) {
        self.gesture.begin(self.tool, self.color.clone(), at);
        self.revision += 1;
    }

    /// Pointer moved while pressed.
    pub fn move_gesture(&mut self, to: Vec2) {
        if self.gesture.update(to) {
            self.revision += 1;
        }
    }

    /// Pointer released. Returns true when a mark was committed.
    pub fn end_gesture(&mut self) -> bool {
        match self.gesture.finish() {
            GestureEnd::Finished(mark) => {
                debug!("Added {} mark to {}", mark.tool().display_name(), self.photo);
                self.marks.push(mark);
                self.revision += 1;
                true
            }
            GestureEnd::Degenerate => {
                debug!("Dropped freehand path with fewer than two points");
                self.revision += 1;
                false
            }
            GestureEnd::NotActive => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Remove the most recently committed mark. The in-progress mark is untouched.
    pub fn undo(&mut self) -> Option<AnnotationMark> {
        let removed = self.marks.pop()?;
        debug!("Undid {} mark on {}", removed.tool().display_name(), self.photo);
        self.revision += 1;
        Some(removed)
    }

    /// End the session, yielding what the store should persist.
    ///
    /// An unfinished gesture is not part of the commit.
    pub fn commit(self) -> SessionCommit {
        info!("Committing {} marks for {}", self.marks.len(), self.photo);
        SessionCommit {
            photo: self.photo,
            marks: self.marks,
            comment: self.comment,
        }
    }

    /// End the session without saving anything.
    pub fn discard(self) {
        info!(
            "Discarded annotation session for {} ({} unsaved marks)",
            self.photo,
            self.marks.len()
        );
    }
}
