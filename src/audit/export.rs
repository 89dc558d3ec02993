//! Annotated JPEG export.
//!
//! The open photo is exported from its session (committed marks only, never the
//! in-progress gesture). Any other photo is decoded again and exported with the marks
//! last saved to the store.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use futures_lite::future;

use crate::annotate::{AnnotationMark, PhotoKey};
use crate::config::AppConfig;
use crate::editor::ActiveSession;
use crate::error::Result;
use crate::photo::SourcePhoto;
use crate::render::{export_composite, write_export};
use crate::store::ActiveStore;

use super::messages::ExportPhotoRequest;
use super::resources::{AsyncAuditOperation, AuditError, ExportNotice, ExportTask};
use super::results::ExportResult;

/// Replace anything that is not safe in a file name.
fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<area>-<photo>.jpg`
pub fn export_file_name(photo: &PhotoKey) -> String {
    format!(
        "{}-{}.jpg",
        sanitize_file_stem(&photo.area_id),
        sanitize_file_stem(&photo.photo_id)
    )
}

/// Render and write one composite.
pub fn run_export(source: &SourcePhoto, marks: &[AnnotationMark], dest: &Path) -> Result<PathBuf> {
    let composite = export_composite(source, marks)?;
    write_export(dest, &composite)?;
    Ok(dest.to_path_buf())
}

/// Where the composite pixels come from
enum ExportSource {
    Decoded(SourcePhoto),
    File(PathBuf),
}

pub fn export_photo_system(
    mut commands: Commands,
    mut events: MessageReader<ExportPhotoRequest>,
    active: Res<ActiveSession>,
    store: Res<ActiveStore>,
    config: Res<AppConfig>,
    mut async_op: ResMut<AsyncAuditOperation>,
    mut audit_error: ResMut<AuditError>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Cannot export {} while another operation is running", event.photo);
            continue;
        }

        let (source, marks) = match active.open.as_ref() {
            Some(open) if open.session.photo() == &event.photo => (
                ExportSource::Decoded(open.canvas.source().clone()),
                open.session.marks().to_vec(),
            ),
            _ => match store.0.record().photo(&event.photo) {
                Ok(record) => (
                    ExportSource::File(record.image_path.clone()),
                    record.annotations.clone(),
                ),
                Err(e) => {
                    audit_error.message = Some(format!("Cannot export: {}", e));
                    continue;
                }
            },
        };

        let dest = config.data.export_dir().join(export_file_name(&event.photo));
        info!("Exporting {} to {:?}", event.photo, dest);

        async_op.is_exporting = true;
        async_op.operation_description = Some("Exporting photo...".to_string());

        let photo = event.photo.clone();
        let task = AsyncComputeTaskPool::get().spawn(async move {
            let outcome = match source {
                ExportSource::Decoded(source) => run_export(&source, &marks, &dest),
                ExportSource::File(path) => SourcePhoto::load(&path)
                    .and_then(|source| run_export(&source, &marks, &dest)),
            };
            ExportResult { photo, outcome }
        });
        commands.spawn(ExportTask(task));
    }
}

pub fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportTask)>,
    mut async_op: ResMut<AsyncAuditOperation>,
    mut notice: ResMut<ExportNotice>,
    mut audit_error: ResMut<AuditError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        async_op.finish();

        match result.outcome {
            Ok(path) => {
                notice.path = Some(path);
            }
            Err(e) => {
                error!("Export of {} failed: {}", result.photo, e);
                audit_error.message = Some(format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_export_file_name_replaces_separators() {
        let key = PhotoKey::new("shower/tray", "0192 a");
        assert_eq!(export_file_name(&key), "shower_tray-0192_a.jpg");
    }

    #[test]
    fn test_run_export_writes_into_missing_directory() {
        let dir = std::env::temp_dir()
            .join(format!("eyeagle-export-{}", uuid::Uuid::now_v7()))
            .join("nested");
        let dest = dir.join("general-1.jpg");
        let source =
            SourcePhoto::from_rgba(&RgbaImage::from_pixel(20, 10, Rgba([200, 200, 200, 255])))
                .unwrap();

        let written = run_export(&source, &[], &dest).unwrap();
        assert_eq!(written, dest);

        let decoded = image::open(&dest).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
