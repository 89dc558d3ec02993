//! Audit workflow: opening photos for annotation, saving, exporting and capture.
//!
//! Photo decode, export and import run on task pools and are polled each frame, so the
//! UI stays responsive while a large photo is processed.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for audit operations
//! - [`resources`] - Error, notice and async-state resources
//! - [`results`] - Result types for async operations
//! - [`setup`] - Opens the configured audit store at startup
//! - [`open`] - Photo load and session start
//! - [`save`] - Commit or discard of the open session
//! - [`export`] - Annotated JPEG export
//! - [`capture`] - Add, delete and describe photos

mod capture;
mod export;
mod messages;
mod open;
mod resources;
mod results;
mod save;
mod setup;

#[cfg(test)]
mod tests;

pub use messages::{
    AddPhotoRequest, DeletePhotoRequest, DiscardSessionRequest, ExportPhotoRequest,
    OpenPhotoRequest, SaveSessionRequest, UpdateAuditDetailsRequest,
};
pub use resources::{AsyncAuditOperation, AuditError, ExportNotice, PhotoUnavailable};

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::store::ActiveStore;

pub struct AuditPlugin;

impl Plugin for AuditPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveStore>()
            .init_resource::<PhotoUnavailable>()
            .init_resource::<AuditError>()
            .init_resource::<ExportNotice>()
            .init_resource::<AsyncAuditOperation>()
            .add_message::<OpenPhotoRequest>()
            .add_message::<SaveSessionRequest>()
            .add_message::<DiscardSessionRequest>()
            .add_message::<ExportPhotoRequest>()
            .add_message::<AddPhotoRequest>()
            .add_message::<DeletePhotoRequest>()
            .add_message::<UpdateAuditDetailsRequest>()
            .add_systems(Startup, setup::open_store_system.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    capture::update_details_system.run_if(on_message::<UpdateAuditDetailsRequest>),
                    // Export reads the session before save/discard can close it
                    export::export_photo_system.run_if(on_message::<ExportPhotoRequest>),
                    save::save_session_system.run_if(on_message::<SaveSessionRequest>),
                    save::discard_session_system.run_if(on_message::<DiscardSessionRequest>),
                    capture::delete_photo_system.run_if(on_message::<DeletePhotoRequest>),
                    capture::add_photo_system.run_if(on_message::<AddPhotoRequest>),
                    open::open_photo_system.run_if(on_message::<OpenPhotoRequest>),
                    open::poll_load_tasks,
                    export::poll_export_tasks,
                    capture::poll_import_tasks,
                )
                    .chain(),
            );
    }
}
