//! Small helpers shared by editor input systems.
//!
//! - [`is_cursor_over_ui`]: Check if the pointer is over egui UI (for input gating)
//! - [`wants_keyboard`]: Check if an egui text field has keyboard focus

use bevy_egui::EguiContexts;

/// True when the pointer is over an egui panel or window.
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// True while the technician is typing into an egui widget.
pub fn wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
