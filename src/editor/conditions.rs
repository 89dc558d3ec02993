//! Run conditions for controlling when editor systems execute.

use bevy::prelude::*;

use crate::ui::DialogState;

use super::state::ActiveSession;

/// Run condition: returns true while a photo is open for annotation.
///
/// Usage: `.run_if(session_is_open)`
pub fn session_is_open(active: Res<ActiveSession>) -> bool {
    active.is_open()
}

/// Run condition: returns true when no modal dialog is open.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}
