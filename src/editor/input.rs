//! Pointer and touch input for the annotation canvas.
//!
//! Mouse and touch are reduced to the same three events before they reach the session,
//! and every position is mapped into canonical space through the current
//! [`SurfaceLayout`].

use bevy::input::touch::{Touch, Touches};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::annotate::{AnnotationSession, PointerSample, SurfaceLayout};
use crate::ui::DialogState;

use super::params::is_cursor_over_ui;
use super::state::{ActiveSession, CanvasLayout};

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Press(PointerSample),
    Move(PointerSample),
    Release,
}

/// Touch state for one frame, as (touch id, window position).
#[derive(Debug, Clone, Default)]
pub struct TouchFrame {
    /// Fingers that went down this frame
    pub started: Vec<(u64, Vec2)>,
    /// Fingers currently down, including those that started this frame
    pub held: Vec<(u64, Vec2)>,
}

impl TouchFrame {
    pub fn from_touches(touches: &Touches) -> Self {
        let sample = |t: &Touch| (t.id(), t.position());
        Self {
            started: touches.iter_just_pressed().map(sample).collect(),
            held: touches.iter().map(sample).collect(),
        }
    }
}

/// Turns raw button and touch state into gesture events.
///
/// A move is only reported when the tracked position changed since the last event. A touch
/// gesture follows the finger that started it and ends when that finger lifts, whatever
/// the other fingers do.
#[derive(Debug, Default)]
pub struct PointerTracker {
    mouse: Option<Vec2>,
    touch: Option<(u64, Vec2)>,
}

impl PointerTracker {
    /// Events produced by the left mouse button this frame.
    pub fn mouse_events(
        &mut self,
        buttons: &ButtonInput<MouseButton>,
        cursor: Option<Vec2>,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        if buttons.just_pressed(MouseButton::Left) {
            if let Some(pos) = cursor {
                self.mouse = Some(pos);
                events.push(PointerEvent::Press(PointerSample::Mouse(pos)));
            }
        } else if buttons.pressed(MouseButton::Left)
            && let Some(pos) = cursor
            && self.mouse != Some(pos)
        {
            self.mouse = Some(pos);
            events.push(PointerEvent::Move(PointerSample::Mouse(pos)));
        }
        if buttons.just_released(MouseButton::Left) {
            self.mouse = None;
            events.push(PointerEvent::Release);
        }
        events
    }

    /// Events produced by touches this frame.
    pub fn touch_events(&mut self, frame: &TouchFrame) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        match self.touch {
            None => {
                if let Some(&(id, pos)) = frame.started.iter().min_by_key(|(id, _)| *id) {
                    self.touch = Some((id, pos));
                    events.push(PointerEvent::Press(PointerSample::Touch(vec![pos])));
                }
            }
            Some((id, last)) => {
                if let Some(&(_, pos)) = frame.held.iter().find(|(held, _)| *held == id)
                    && pos != last
                {
                    self.touch = Some((id, pos));
                    events.push(PointerEvent::Move(PointerSample::Touch(vec![pos])));
                }
            }
        }
        // Lifted or canceled fingers are no longer held
        if let Some((id, _)) = self.touch
            && !frame.held.iter().any(|(held, _)| *held == id)
        {
            self.touch = None;
            events.push(PointerEvent::Release);
        }
        events
    }
}

/// Feed one event to the session.
///
/// Presses only start a gesture on the canvas itself. Moves and releases are applied
/// wherever the pointer is, so dragging off the photo still tracks and a release
/// anywhere finishes the mark.
pub fn apply_pointer_event(
    session: &mut AnnotationSession,
    layout: &SurfaceLayout,
    event: &PointerEvent,
) {
    match event {
        PointerEvent::Press(sample) => {
            let on_canvas = sample.primary().is_some_and(|p| layout.contains(p));
            if on_canvas && let Some(at) = sample.to_canonical(layout) {
                session.begin_gesture(at);
            }
        }
        PointerEvent::Move(sample) => {
            if session.is_drawing()
                && let Some(at) = sample.to_canonical(layout)
            {
                session.move_gesture(at);
            }
        }
        PointerEvent::Release => {
            session.end_gesture();
        }
    }
}

pub fn handle_pointer_input(
    mut active: ResMut<ActiveSession>,
    canvas_layout: Res<CanvasLayout>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    dialog_state: Res<DialogState>,
    mut tracker: Local<PointerTracker>,
    mut contexts: EguiContexts,
) {
    // Track every frame so a release is never missed while no photo is open
    let cursor = window_query.single().ok().and_then(|w| w.cursor_position());
    let mut events = tracker.mouse_events(&mouse_button, cursor);
    events.extend(tracker.touch_events(&TouchFrame::from_touches(&touches)));

    let Some(session) = active.session_mut() else {
        return;
    };
    let Some(layout) = canvas_layout.layout else {
        return;
    };

    let blocked = dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts);
    for event in &events {
        if blocked && matches!(event, PointerEvent::Press(_)) {
            continue;
        }
        apply_pointer_event(session, &layout, event);
    }
}
