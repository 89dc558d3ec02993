//! Photo load and session start.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::annotate::{AnnotationSession, PhotoKey};
use crate::editor::{ActiveSession, OpenPhoto};
use crate::error::Result;
use crate::photo::SourcePhoto;
use crate::render::LiveCanvas;
use crate::store::{ActiveStore, AuditStore};

use super::messages::OpenPhotoRequest;
use super::resources::{AsyncAuditOperation, AuditError, LoadPhotoTask, PhotoUnavailable};
use super::results::LoadPhotoResult;

/// Seed a session from the store and size a canvas to the decoded photo.
pub fn start_session(
    store: &dyn AuditStore,
    photo: PhotoKey,
    source: SourcePhoto,
) -> Result<OpenPhoto> {
    let (marks, comment) = store.annotation_state(&photo)?;
    debug!(
        "Sizing canvas for {} from {:?} ({}x{})",
        photo,
        source.path(),
        source.width(),
        source.height()
    );
    let canvas = LiveCanvas::new(source)?;
    Ok(OpenPhoto {
        session: AnnotationSession::open(photo, marks, comment),
        canvas,
    })
}

/// Starts an async photo decode
pub fn open_photo_system(
    mut commands: Commands,
    mut events: MessageReader<OpenPhotoRequest>,
    store: Res<ActiveStore>,
    active: Res<ActiveSession>,
    mut async_op: ResMut<AsyncAuditOperation>,
    mut unavailable: ResMut<PhotoUnavailable>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Cannot open {} while another operation is running", event.photo);
            continue;
        }
        if let Some(current) = active.photo() {
            warn!("Cannot open {} while {} is open", event.photo, current);
            continue;
        }

        let path = match store.0.record().photo(&event.photo) {
            Ok(record) => record.image_path.clone(),
            Err(e) => {
                unavailable.message = Some(e.to_string());
                error!("{}", e);
                continue;
            }
        };

        async_op.is_loading = true;
        async_op.operation_description = Some("Loading photo...".to_string());

        let photo = event.photo.clone();
        let task = IoTaskPool::get().spawn(async move {
            LoadPhotoResult {
                photo,
                source: SourcePhoto::load(&path),
            }
        });
        commands.spawn(LoadPhotoTask(task));
    }
}

/// Polls photo loads and opens the session once the canvas can be sized
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadPhotoTask)>,
    mut async_op: ResMut<AsyncAuditOperation>,
    store: Res<ActiveStore>,
    mut active: ResMut<ActiveSession>,
    mut unavailable: ResMut<PhotoUnavailable>,
    mut audit_error: ResMut<AuditError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        async_op.finish();

        let opened = result
            .source
            .and_then(|source| start_session(store.0.as_ref(), result.photo.clone(), source));
        match opened {
            Ok(open) => {
                active.open = Some(open);
            }
            Err(e) if e.is_source_unavailable() => {
                error!("Cannot annotate {}: {}", result.photo, e);
                unavailable.message = Some(e.to_string());
            }
            Err(e) => {
                error!("Failed to open {}: {}", result.photo, e);
                audit_error.message = Some(format!("Failed to open photo: {}", e));
            }
        }
    }
}
