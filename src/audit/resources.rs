//! Resource and task types for audit state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::{ExportResult, ImportResult, LoadPhotoResult};

/// Shown when a photo cannot be opened. The session is never started.
#[derive(Resource, Default)]
pub struct PhotoUnavailable {
    pub message: Option<String>,
}

/// Store, import and export failures for display to the user.
#[derive(Resource, Default)]
pub struct AuditError {
    pub message: Option<String>,
}

/// Confirmation of a finished export
#[derive(Resource, Default)]
pub struct ExportNotice {
    pub path: Option<PathBuf>,
}

/// Resource tracking async audit operations for the busy modal
#[derive(Resource, Default)]
pub struct AsyncAuditOperation {
    /// A photo is being decoded for a new session
    pub is_loading: bool,
    /// A composite is being rendered and encoded
    pub is_exporting: bool,
    /// A photo is being picked and compressed
    pub is_importing: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncAuditOperation {
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_exporting || self.is_importing
    }

    pub(crate) fn finish(&mut self) {
        self.is_loading = false;
        self.is_exporting = false;
        self.is_importing = false;
        self.operation_description = None;
    }
}

#[derive(Component)]
pub struct LoadPhotoTask(pub Task<LoadPhotoResult>);

#[derive(Component)]
pub struct ExportTask(pub Task<ExportResult>);

#[derive(Component)]
pub struct ImportPhotoTask(pub Task<ImportResult>);
