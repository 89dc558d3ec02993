use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::annotate::{AnnotationSession, MarkTool};

use super::params::{is_cursor_over_ui, wants_keyboard};
use super::state::{ActiveSession, CanvasLayout};

/// Tool bound to a key, if any.
pub fn tool_for_key(key: KeyCode) -> Option<MarkTool> {
    match key {
        KeyCode::KeyE => Some(MarkTool::Ellipse),
        KeyCode::KeyR => Some(MarkTool::Rectangle),
        KeyCode::KeyD => Some(MarkTool::FreehandPath),
        KeyCode::KeyH => Some(MarkTool::HighlightBlock),
        _ => None,
    }
}

fn apply_shortcuts(session: &mut AnnotationSession, keyboard: &ButtonInput<KeyCode>) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft)
        || keyboard.pressed(KeyCode::ControlRight)
        || keyboard.pressed(KeyCode::SuperLeft)
        || keyboard.pressed(KeyCode::SuperRight);

    if ctrl {
        if keyboard.just_pressed(KeyCode::KeyZ) && session.undo().is_some() {
            debug!("Undo, {} marks left", session.mark_count());
        }
        return;
    }

    if let Some(tool) = keyboard.get_just_pressed().find_map(|key| tool_for_key(*key)) {
        session.select_tool(tool);
    }
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut active: ResMut<ActiveSession>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in the comment box
    if wants_keyboard(&mut contexts) {
        return;
    }
    if let Some(session) = active.session_mut() {
        apply_shortcuts(session, &keyboard);
    }
}

/// Crosshair over the photo, default cursor everywhere else.
pub fn update_cursor_icon(
    canvas_layout: Res<CanvasLayout>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, window)) = window_query.single_mut() else {
        return;
    };

    let over_canvas = match (canvas_layout.layout, window.cursor_position()) {
        (Some(layout), Some(cursor)) => layout.contains(cursor),
        _ => false,
    };

    let icon = if over_canvas && !is_cursor_over_ui(&mut contexts) {
        SystemCursorIcon::Crosshair
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(entity).insert(CursorIcon::System(icon));
}
