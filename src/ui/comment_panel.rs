use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::audit::{DiscardSessionRequest, ExportPhotoRequest, SaveSessionRequest};
use crate::editor::ActiveSession;

/// Comment box and the buttons that end a session
pub fn comment_panel_ui(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveSession>,
    mut save_events: MessageWriter<SaveSessionRequest>,
    mut discard_events: MessageWriter<DiscardSessionRequest>,
    mut export_events: MessageWriter<ExportPhotoRequest>,
) -> Result {
    let Some(session) = active.session_mut() else {
        return Ok(());
    };

    egui::TopBottomPanel::bottom("comment_panel")
        .resizable(false)
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(egui::RichText::new("Comments").strong());
            ui.add(
                egui::TextEdit::multiline(session.comment_mut())
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Describe the hazards marked on this photo"),
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save_events.write(SaveSessionRequest);
                }
                if ui
                    .button("Export")
                    .on_hover_text("Write a JPEG of the photo with its current marks")
                    .clicked()
                {
                    export_events.write(ExportPhotoRequest {
                        photo: session.photo().clone(),
                    });
                }
                if ui
                    .button("Back")
                    .on_hover_text("Close without saving")
                    .clicked()
                {
                    discard_events.write(DiscardSessionRequest);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} marks", session.mark_count()))
                            .weak(),
                    );
                });
            });
        });
    Ok(())
}
