//! Outcomes handed back by async audit tasks.

use std::path::PathBuf;

use crate::annotate::PhotoKey;
use crate::error::Result;
use crate::photo::SourcePhoto;

pub struct LoadPhotoResult {
    pub photo: PhotoKey,
    pub source: Result<SourcePhoto>,
}

pub struct ExportResult {
    pub photo: PhotoKey,
    pub outcome: Result<PathBuf>,
}

pub enum ImportResult {
    /// The file picker was dismissed
    Cancelled,
    Compressed {
        area_id: String,
        stored_path: PathBuf,
        size: (u32, u32),
    },
    Failed(String),
}
