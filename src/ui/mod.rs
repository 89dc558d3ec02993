mod comment_panel;
mod dialogs;
mod photo_list;
mod settings_dialog;
mod toolbar;
mod viewport;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::audit::{AsyncAuditOperation, AuditError, ExportNotice, PhotoUnavailable};
use crate::config::ConfigResetNotification;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input handlers should check this to avoid drawing while the
/// technician is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block canvas input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
#[allow(clippy::too_many_arguments)]
fn update_dialog_state(
    photo_list: Res<photo_list::PhotoListState>,
    settings: Res<settings_dialog::SettingsDialogState>,
    config_reset: Res<ConfigResetNotification>,
    unavailable: Res<PhotoUnavailable>,
    audit_error: Res<AuditError>,
    export_notice: Res<ExportNotice>,
    async_op: Res<AsyncAuditOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = photo_list.pending_delete.is_some()
        || settings.is_open
        || settings.pending_browse.is_some()
        || config_reset.show
        || unavailable.message.is_some()
        || audit_error.message.is_some()
        || export_notice.path.is_some()
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<photo_list::PhotoListState>()
            .init_resource::<settings_dialog::SettingsDialogState>()
            // Side panel must render first so the top and bottom panels fit beside it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    photo_list::photo_list_ui,
                    toolbar::toolbar_ui,
                    comment_panel::comment_panel_ui,
                    // Whatever the panels leave is where the photo goes
                    viewport::record_canvas_viewport,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    photo_list::delete_confirmation_ui,
                    dialogs::photo_unavailable_ui,
                    dialogs::audit_error_ui,
                    dialogs::export_notice_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::async_operation_modal_ui,
                    settings_dialog::settings_dialog_ui,
                )
                    .after(viewport::record_canvas_viewport),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
