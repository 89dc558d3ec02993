//! Adding, removing and describing photos in the audit.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use futures_lite::future;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::editor::ActiveSession;
use crate::photo::compress_photo;
use crate::store::ActiveStore;

use super::messages::{
    AddPhotoRequest, DeletePhotoRequest, OpenPhotoRequest, UpdateAuditDetailsRequest,
};
use super::resources::{AsyncAuditOperation, AuditError, ImportPhotoTask};
use super::results::ImportResult;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff", "gif"];

/// Compress a picked photo into the audit's photo folder under a fresh name.
pub fn import_photo(
    picked: &Path,
    area_id: String,
    photo_dir: &Path,
    max_width: u32,
    quality: u8,
) -> ImportResult {
    let stored_path = photo_dir.join(format!("{}.jpg", Uuid::now_v7()));
    match compress_photo(picked, &stored_path, max_width, quality) {
        Ok(size) => ImportResult::Compressed {
            area_id,
            stored_path,
            size,
        },
        Err(e) => ImportResult::Failed(e.to_string()),
    }
}

/// Opens the file picker, then compresses the chosen photo off the main thread
pub fn add_photo_system(
    mut commands: Commands,
    mut events: MessageReader<AddPhotoRequest>,
    config: Res<AppConfig>,
    mut async_op: ResMut<AsyncAuditOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Cannot add a photo while another operation is running");
            continue;
        }

        let area_id = if event.area_id.trim().is_empty() {
            config.data.default_area.clone()
        } else {
            event.area_id.trim().to_string()
        };
        let photo_dir = config.data.photo_dir();
        let max_width = config.data.compress_max_width;
        let quality = config.data.compress_quality;

        async_op.is_importing = true;
        async_op.operation_description = Some("Adding photo...".to_string());

        let task = AsyncComputeTaskPool::get().spawn(async move {
            let picked = rfd::AsyncFileDialog::new()
                .set_title("Add Photo")
                .add_filter("Images", PHOTO_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf());
            match picked {
                Some(path) => import_photo(&path, area_id, &photo_dir, max_width, quality),
                None => ImportResult::Cancelled,
            }
        });
        commands.spawn(ImportPhotoTask(task));
    }
}

/// Records imported photos and opens them for annotation
pub fn poll_import_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ImportPhotoTask)>,
    mut async_op: ResMut<AsyncAuditOperation>,
    mut store: ResMut<ActiveStore>,
    mut audit_error: ResMut<AuditError>,
    mut open_events: MessageWriter<OpenPhotoRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        async_op.finish();

        match result {
            ImportResult::Cancelled => {
                debug!("Photo import cancelled");
            }
            ImportResult::Compressed {
                area_id,
                stored_path,
                size,
            } => match store.0.add_photo(&area_id, stored_path.clone()) {
                Ok(photo) => {
                    info!("Added {} ({}x{}) at {:?}", photo, size.0, size.1, stored_path);
                    open_events.write(OpenPhotoRequest { photo });
                }
                Err(e) => {
                    remove_stored_photo(&stored_path);
                    error!("Failed to record photo: {}", e);
                    audit_error.message = Some(format!("Failed to add photo: {}", e));
                }
            },
            ImportResult::Failed(reason) => {
                error!("Photo import failed: {}", reason);
                audit_error.message = Some(format!("Failed to add photo: {}", reason));
            }
        }
    }
}

fn remove_stored_photo(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Could not remove {:?}: {}", path, e);
    }
}

/// Photos the app compressed itself are removed with their record; anything else is left alone.
fn owned_photo(image_path: &Path, photo_dir: &Path) -> Option<PathBuf> {
    image_path
        .starts_with(photo_dir)
        .then(|| image_path.to_path_buf())
}

pub fn delete_photo_system(
    mut events: MessageReader<DeletePhotoRequest>,
    active: Res<ActiveSession>,
    config: Res<AppConfig>,
    mut store: ResMut<ActiveStore>,
    mut audit_error: ResMut<AuditError>,
) {
    for event in events.read() {
        if active.photo() == Some(&event.photo) {
            warn!("Cannot delete {} while it is open", event.photo);
            continue;
        }

        let owned = store
            .0
            .record()
            .photo(&event.photo)
            .ok()
            .and_then(|p| owned_photo(&p.image_path, &config.data.photo_dir()));

        match store.0.delete_photo(&event.photo) {
            Ok(()) => {
                info!("Deleted {}", event.photo);
                if let Some(path) = owned {
                    remove_stored_photo(&path);
                }
            }
            Err(e) => {
                error!("Failed to delete {}: {}", event.photo, e);
                audit_error.message = Some(format!("Failed to delete photo: {}", e));
            }
        }
    }
}

pub fn update_details_system(
    mut events: MessageReader<UpdateAuditDetailsRequest>,
    mut store: ResMut<ActiveStore>,
    mut audit_error: ResMut<AuditError>,
) {
    for event in events.read() {
        if let Err(e) = store
            .0
            .set_details(event.client_name.clone(), event.bathroom_type)
        {
            error!("Failed to update audit details: {}", e);
            audit_error.message = Some(format!("Failed to update audit details: {}", e));
        }
    }
}
