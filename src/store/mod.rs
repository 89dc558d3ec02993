//! Audit storage.
//!
//! The annotation engine only needs two things from storage: the saved state of a photo
//! when a session opens, and a single replace when it is committed. [`AuditStore`] is
//! that seam; the rest of the trait serves the photo list.
//!
//! - [`record`] - [`AuditRecord`] and [`PhotoRecord`]
//! - [`memory`] - [`MemoryAuditStore`], process-lifetime storage
//! - [`file`] - [`JsonAuditStore`], a JSON document replaced atomically on every change

pub mod file;
pub mod memory;
pub mod record;


use std::path::PathBuf;

use bevy::prelude::Resource;

use crate::annotate::{AnnotationMark, PhotoKey, SessionCommit};
use crate::error::Result;

pub use file::JsonAuditStore;
pub use memory::MemoryAuditStore;
pub use record::{AuditRecord, BathroomType, PhotoRecord};

pub trait AuditStore: Send + Sync {
    fn record(&self) -> &AuditRecord;

    fn set_details(&mut self, client_name: String, bathroom_type: BathroomType) -> Result<()>;

    fn add_photo(&mut self, area_id: &str, image_path: PathBuf) -> Result<PhotoKey>;

    fn delete_photo(&mut self, photo: &PhotoKey) -> Result<()>;

    /// Replace a photo's marks and comment. Either both change or neither does.
    fn commit_session(
        &mut self,
        photo: &PhotoKey,
        marks: Vec<AnnotationMark>,
        comment: String,
    ) -> Result<()>;

    /// Marks and comment to seed a new session with.
    fn annotation_state(&self, photo: &PhotoKey) -> Result<(Vec<AnnotationMark>, String)> {
        let record = self.record().photo(photo)?;
        Ok((record.annotations.clone(), record.comment.clone()))
    }

    fn commit(&mut self, commit: SessionCommit) -> Result<()> {
        self.commit_session(&commit.photo, commit.marks, commit.comment)
    }
}

/// The store backing the running application.
#[derive(Resource)]
pub struct ActiveStore(pub Box<dyn AuditStore>);

impl Default for ActiveStore {
    fn default() -> Self {
        Self(Box::new(MemoryAuditStore::default()))
    }
}
