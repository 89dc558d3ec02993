//! The audit record: every photo taken in one bathroom, grouped by area.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotate::{AnnotationMark, PhotoKey};
use crate::error::{AnnotateError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BathroomType {
    #[default]
    Main,
    Ensuite,
    Wetroom,
    Other,
}

impl BathroomType {
    pub fn all() -> &'static [BathroomType] {
        &[
            BathroomType::Main,
            BathroomType::Ensuite,
            BathroomType::Wetroom,
            BathroomType::Other,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BathroomType::Main => "Main",
            BathroomType::Ensuite => "Ensuite",
            BathroomType::Wetroom => "Wetroom",
            BathroomType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    /// Compressed photo on disk
    pub image_path: PathBuf,
    #[serde(default)]
    pub annotations: Vec<AnnotationMark>,
    #[serde(default)]
    pub comment: String,
    pub captured_at: DateTime<Utc>,
}

impl PhotoRecord {
    pub fn new(image_path: PathBuf) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            image_path,
            annotations: Vec::new(),
            comment: String::new(),
            captured_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub bathroom_type: BathroomType,
    /// Photos keyed by area id, in capture order within each area
    #[serde(default)]
    pub area_photos: BTreeMap<String, Vec<PhotoRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for AuditRecord {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            client_name: String::new(),
            bathroom_type: BathroomType::default(),
            area_photos: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl AuditRecord {
    pub fn set_details(&mut self, client_name: String, bathroom_type: BathroomType) {
        self.client_name = client_name;
        self.bathroom_type = bathroom_type;
        self.touch();
    }

    /// Append a freshly captured photo with no marks and an empty comment.
    pub fn add_photo(&mut self, area_id: &str, image_path: PathBuf) -> PhotoKey {
        let photo = PhotoRecord::new(image_path);
        let key = PhotoKey::new(area_id, photo.id.clone());
        self.area_photos
            .entry(area_id.to_string())
            .or_default()
            .push(photo);
        self.touch();
        key
    }

    pub fn photo(&self, key: &PhotoKey) -> Result<&PhotoRecord> {
        self.area_photos
            .get(&key.area_id)
            .ok_or_else(|| AnnotateError::AreaNotFound(key.area_id.clone()))?
            .iter()
            .find(|p| p.id == key.photo_id)
            .ok_or_else(|| photo_not_found(key))
    }

    fn photo_mut(&mut self, key: &PhotoKey) -> Result<&mut PhotoRecord> {
        self.area_photos
            .get_mut(&key.area_id)
            .ok_or_else(|| AnnotateError::AreaNotFound(key.area_id.clone()))?
            .iter_mut()
            .find(|p| p.id == key.photo_id)
            .ok_or_else(|| photo_not_found(key))
    }

    /// Remove a photo. An area left without photos is dropped too.
    pub fn delete_photo(&mut self, key: &PhotoKey) -> Result<PhotoRecord> {
        let photos = self
            .area_photos
            .get_mut(&key.area_id)
            .ok_or_else(|| AnnotateError::AreaNotFound(key.area_id.clone()))?;
        let index = photos
            .iter()
            .position(|p| p.id == key.photo_id)
            .ok_or_else(|| photo_not_found(key))?;
        let removed = photos.remove(index);
        if photos.is_empty() {
            self.area_photos.remove(&key.area_id);
        }
        self.touch();
        Ok(removed)
    }

    /// Replace a photo's marks and comment in one step.
    pub fn save_annotations(
        &mut self,
        key: &PhotoKey,
        marks: Vec<AnnotationMark>,
        comment: String,
    ) -> Result<()> {
        let photo = self.photo_mut(key)?;
        photo.annotations = marks;
        photo.comment = comment;
        self.touch();
        Ok(())
    }

    pub fn total_photos(&self) -> usize {
        self.area_photos.values().map(Vec::len).sum()
    }

    pub fn total_annotations(&self) -> usize {
        self.area_photos
            .values()
            .flatten()
            .map(|p| p.annotations.len())
            .sum()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn photo_not_found(key: &PhotoKey) -> AnnotateError {
    AnnotateError::PhotoNotFound {
        area_id: key.area_id.clone(),
        photo_id: key.photo_id.clone(),
    }
}
