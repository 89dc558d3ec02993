//! Ending a session: commit or discard.

use bevy::prelude::*;

use crate::editor::ActiveSession;
use crate::error::Result;
use crate::store::{ActiveStore, AuditStore};

use super::messages::{DiscardSessionRequest, SaveSessionRequest};
use super::resources::AuditError;

/// Commit the open session. The session stays open if the store rejects the write.
pub fn save_open_photo(active: &mut ActiveSession, store: &mut dyn AuditStore) -> Result<bool> {
    let Some(open) = active.open.as_ref() else {
        return Ok(false);
    };
    store.commit(open.session.clone().commit())?;
    active.open = None;
    Ok(true)
}

pub fn save_session_system(
    mut events: MessageReader<SaveSessionRequest>,
    mut active: ResMut<ActiveSession>,
    mut store: ResMut<ActiveStore>,
    mut audit_error: ResMut<AuditError>,
) {
    for _ in events.read() {
        if let Err(e) = save_open_photo(&mut active, store.0.as_mut()) {
            error!("Failed to save annotations: {}", e);
            audit_error.message = Some(format!("Failed to save annotations: {}", e));
        }
    }
}

pub fn discard_session_system(
    mut events: MessageReader<DiscardSessionRequest>,
    mut active: ResMut<ActiveSession>,
) {
    for _ in events.read() {
        if let Some(open) = active.open.take() {
            open.session.discard();
        }
    }
}
