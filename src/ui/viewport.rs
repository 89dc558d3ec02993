use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{ActiveSession, CanvasViewport};

/// Record the screen area left free by the panels. The canvas sprite is fitted into it.
pub fn record_canvas_viewport(
    mut contexts: EguiContexts,
    active: Res<ActiveSession>,
    mut viewport: ResMut<CanvasViewport>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let free = ctx.available_rect();
    let available = Rect::new(free.min.x, free.min.y, free.max.x, free.max.y);
    if viewport.available != Some(available) {
        viewport.available = Some(available);
    }

    if !active.is_open() {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Open a photo from the audit to start marking hazards")
                            .weak()
                            .size(16.0),
                    );
                });
            });
    }

    Ok(())
}
