//! Message types for audit operations.

use bevy::prelude::*;

use crate::annotate::PhotoKey;
use crate::store::BathroomType;

/// Load a photo and open an annotation session on it
#[derive(Message)]
pub struct OpenPhotoRequest {
    pub photo: PhotoKey,
}

/// Commit the open session to the store and close it
#[derive(Message)]
pub struct SaveSessionRequest;

/// Close the open session without saving
#[derive(Message)]
pub struct DiscardSessionRequest;

/// Flatten a photo's marks into a JPEG in the export folder
#[derive(Message)]
pub struct ExportPhotoRequest {
    pub photo: PhotoKey,
}

/// Pick a photo file, compress it and file it under an area
#[derive(Message)]
pub struct AddPhotoRequest {
    pub area_id: String,
}

#[derive(Message)]
pub struct DeletePhotoRequest {
    pub photo: PhotoKey,
}

#[derive(Message)]
pub struct UpdateAuditDetailsRequest {
    pub client_name: String,
    pub bathroom_type: BathroomType,
}
