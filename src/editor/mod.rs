//! The annotation canvas: sprite, pointer input and tool shortcuts.
//!
//! ## Module Structure
//!
//! - [`state`] - [`ActiveSession`] and where the canvas sits on screen
//! - [`camera`] - Camera and the sprite that displays the live canvas
//! - [`canvas`] - Redraw, upload and placement of the canvas sprite
//! - [`input`] - Mouse/touch to gesture events in canonical space
//! - [`tools`] - Keyboard shortcuts and cursor icon
//! - [`conditions`] - Run conditions
//! - [`params`] - egui input gating helpers

mod camera;
mod canvas;
pub mod conditions;
mod input;
pub mod params;
pub mod state;
pub mod tools;

pub use state::{ActiveSession, CanvasLayout, CanvasViewport, OpenPhoto};

use bevy::prelude::*;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveSession>()
            .init_resource::<CanvasViewport>()
            .init_resource::<CanvasLayout>()
            .add_systems(Startup, (camera::spawn_camera, camera::spawn_canvas_sprite))
            .add_systems(
                Update,
                (
                    canvas::place_canvas_sprite,
                    (
                        input::handle_pointer_input,
                        tools::handle_tool_shortcuts.run_if(conditions::no_dialog_open),
                    )
                        .run_if(conditions::session_is_open),
                    canvas::refresh_canvas_texture.run_if(conditions::session_is_open),
                    tools::update_cursor_icon,
                )
                    .chain(),
            );
    }
}
