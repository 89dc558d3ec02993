//! Audit store persisted as a single JSON document.

use std::path::{Path, PathBuf};

use bevy::log::{debug, info};

use crate::annotate::{AnnotationMark, PhotoKey};
use crate::error::Result;

use super::AuditStore;
use super::record::{AuditRecord, BathroomType};

/// Every mutation is applied to a copy of the record, written to a temp file and
/// renamed over the previous document. A failed write leaves both the file and the
/// in-memory record as they were.
#[derive(Debug)]
pub struct JsonAuditStore {
    path: PathBuf,
    record: AuditRecord,
}

impl JsonAuditStore {
    /// Open the store at `path`, starting a fresh audit when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            let record: AuditRecord = serde_json::from_str(&json)?;
            info!(
                "Opened audit {} from {:?} ({} photos)",
                record.id,
                path,
                record.total_photos()
            );
            record
        } else {
            info!("No audit at {:?}, starting a new one", path);
            AuditRecord::default()
        };
        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn apply<T>(&mut self, change: impl FnOnce(&mut AuditRecord) -> Result<T>) -> Result<T> {
        let mut next = self.record.clone();
        let value = change(&mut next)?;
        write_atomic(&self.path, &next)?;
        self.record = next;
        Ok(value)
    }
}

fn write_atomic(path: &Path, record: &AuditRecord) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(record)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    debug!("Audit written to {:?}", path);
    Ok(())
}

impl AuditStore for JsonAuditStore {
    fn record(&self) -> &AuditRecord {
        &self.record
    }

    fn set_details(&mut self, client_name: String, bathroom_type: BathroomType) -> Result<()> {
        self.apply(|record| {
            record.set_details(client_name, bathroom_type);
            Ok(())
        })
    }

    fn add_photo(&mut self, area_id: &str, image_path: PathBuf) -> Result<PhotoKey> {
        self.apply(|record| Ok(record.add_photo(area_id, image_path)))
    }

    fn delete_photo(&mut self, photo: &PhotoKey) -> Result<()> {
        self.apply(|record| record.delete_photo(photo).map(|_| ()))
    }

    fn commit_session(
        &mut self,
        photo: &PhotoKey,
        marks: Vec<AnnotationMark>,
        comment: String,
    ) -> Result<()> {
        self.apply(|record| record.save_annotations(photo, marks, comment))?;
        info!("Saved annotations for {} to {:?}", photo, self.path);
        Ok(())
    }
}
