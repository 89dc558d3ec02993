use std::path::PathBuf;

use crate::annotate::{AnnotationMark, PhotoKey};
use crate::error::Result;

use super::AuditStore;
use super::record::{AuditRecord, BathroomType};

/// Audit store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    record: AuditRecord,
}

impl AuditStore for MemoryAuditStore {
    fn record(&self) -> &AuditRecord {
        &self.record
    }

    fn set_details(&mut self, client_name: String, bathroom_type: BathroomType) -> Result<()> {
        self.record.set_details(client_name, bathroom_type);
        Ok(())
    }

    fn add_photo(&mut self, area_id: &str, image_path: PathBuf) -> Result<PhotoKey> {
        Ok(self.record.add_photo(area_id, image_path))
    }

    fn delete_photo(&mut self, photo: &PhotoKey) -> Result<()> {
        self.record.delete_photo(photo).map(|_| ())
    }

    fn commit_session(
        &mut self,
        photo: &PhotoKey,
        marks: Vec<AnnotationMark>,
        comment: String,
    ) -> Result<()> {
        self.record.save_annotations(photo, marks, comment)
    }
}
