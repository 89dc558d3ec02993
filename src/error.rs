//! Error type shared by the annotation engine, photo loading and the audit store.
//!
//! Only [`AnnotateError::SourceUnavailable`] is meant to reach the editor shell as a
//! session-terminal condition. Malformed gesture sequences, empty undo and degenerate
//! freehand paths are not errors at all; they are absorbed by the engine.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("Photo unavailable: {path:?} ({reason})")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Photo {photo_id} not found in area {area_id}")]
    PhotoNotFound { area_id: String, photo_id: String },

    #[error("Area not found: {0}")]
    AreaNotFound(String),

    #[error("Cannot allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnnotateError {
    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures the shell must treat as "photo unavailable".
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
