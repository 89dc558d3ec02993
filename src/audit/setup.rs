//! Opens the audit store named in the config.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::store::{ActiveStore, JsonAuditStore};

use super::resources::AuditError;

/// Startup system: replace the in-memory default store with the JSON document on disk.
///
/// A corrupt or unreadable document is reported and the in-memory store is kept, so
/// the file is never overwritten with an empty audit.
pub fn open_store_system(
    config: Res<AppConfig>,
    mut store: ResMut<ActiveStore>,
    mut audit_error: ResMut<AuditError>,
) {
    let path = config.data.store_path();
    match JsonAuditStore::open(&path) {
        Ok(opened) => {
            info!("Using audit store {:?}", opened.path());
            store.0 = Box::new(opened);
        }
        Err(e) => {
            let message = format!("Could not open audit at {:?}: {}", path, e);
            error!("{}", message);
            audit_error.message = Some(format!(
                "{}\nChanges this session will not be saved to disk.",
                message
            ));
        }
    }
}
