use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::annotate::PhotoKey;
use crate::audit::{
    AddPhotoRequest, AsyncAuditOperation, DeletePhotoRequest, ExportPhotoRequest,
    OpenPhotoRequest, UpdateAuditDetailsRequest,
};
use crate::config::AppConfig;
use crate::editor::ActiveSession;
use crate::store::{ActiveStore, AuditRecord, BathroomType, PhotoRecord};

use super::settings_dialog::SettingsDialogState;

/// Edit buffers for the audit panel
#[derive(Resource, Default)]
pub struct PhotoListState {
    pub client_name: String,
    pub bathroom_type: BathroomType,
    /// Area the next added photo is filed under
    pub area_input: String,
    /// Buffers have been filled from the store
    pub loaded: bool,
    /// Photo waiting for delete confirmation
    pub pending_delete: Option<PhotoKey>,
}

impl PhotoListState {
    fn load_from_record(&mut self, record: &AuditRecord) {
        self.client_name = record.client_name.clone();
        self.bathroom_type = record.bathroom_type;
        self.loaded = true;
    }

    fn details_changed(&self, record: &AuditRecord) -> bool {
        self.client_name != record.client_name || self.bathroom_type != record.bathroom_type
    }
}

/// One-line summary of a photo for the list
fn photo_summary(index: usize, photo: &PhotoRecord) -> String {
    let marks = match photo.annotations.len() {
        0 => "no marks".to_string(),
        1 => "1 mark".to_string(),
        n => format!("{} marks", n),
    };
    format!("Photo {} · {}", index + 1, marks)
}

/// First line of a comment, shortened for the list
fn comment_preview(comment: &str) -> Option<String> {
    let line = comment.lines().find(|l| !l.trim().is_empty())?.trim();
    if line.chars().count() > 40 {
        Some(format!("{}...", line.chars().take(37).collect::<String>()))
    } else {
        Some(line.to_string())
    }
}

/// Left panel: audit details, capture and the photo list
#[allow(clippy::too_many_arguments)]
pub fn photo_list_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<PhotoListState>,
    mut settings: ResMut<SettingsDialogState>,
    store: Res<ActiveStore>,
    active: Res<ActiveSession>,
    config: Res<AppConfig>,
    async_op: Res<AsyncAuditOperation>,
    mut details_events: MessageWriter<UpdateAuditDetailsRequest>,
    mut add_events: MessageWriter<AddPhotoRequest>,
    mut open_events: MessageWriter<OpenPhotoRequest>,
    mut export_events: MessageWriter<ExportPhotoRequest>,
) -> Result {
    let record = store.0.record();
    if !state.loaded {
        state.load_from_record(record);
    }
    // Photo actions wait until the open session is saved or discarded
    let idle = !active.is_open() && !async_op.is_busy();

    egui::SidePanel::left("audit_panel")
        .default_width(260.0)
        .resizable(true)
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Audit");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("⚙").on_hover_text("Settings").clicked() {
                        settings.open(&config);
                    }
                });
            });
            ui.add_space(8.0);

            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Client:");
                    ui.add(
                        egui::TextEdit::singleline(&mut state.client_name)
                            .hint_text("Client name"),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Bathroom:");
                    egui::ComboBox::from_id_salt("bathroom_type_select")
                        .selected_text(state.bathroom_type.display_name())
                        .show_ui(ui, |ui| {
                            for bathroom in BathroomType::all() {
                                ui.selectable_value(
                                    &mut state.bathroom_type,
                                    *bathroom,
                                    bathroom.display_name(),
                                );
                            }
                        });
                });
                if ui
                    .add_enabled(
                        state.details_changed(record),
                        egui::Button::new("Update details"),
                    )
                    .clicked()
                {
                    details_events.write(UpdateAuditDetailsRequest {
                        client_name: state.client_name.trim().to_string(),
                        bathroom_type: state.bathroom_type,
                    });
                }
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.area_input)
                        .desired_width(120.0)
                        .hint_text(config.data.default_area.as_str()),
                );
                if ui
                    .add_enabled(idle, egui::Button::new("Add Photo"))
                    .clicked()
                {
                    add_events.write(AddPhotoRequest {
                        area_id: state.area_input.clone(),
                    });
                }
            });

            ui.add_space(8.0);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 32.0)
                .show(ui, |ui| {
                    if record.area_photos.is_empty() {
                        ui.label(egui::RichText::new("No photos yet").weak().italics());
                    }
                    for (area_id, photos) in &record.area_photos {
                        egui::CollapsingHeader::new(format!("{} ({})", area_id, photos.len()))
                            .id_salt(area_id)
                            .default_open(true)
                            .show(ui, |ui| {
                                for (index, photo) in photos.iter().enumerate() {
                                    let key = PhotoKey::new(area_id.as_str(), photo.id.as_str());
                                    let is_open = active.photo() == Some(&key);

                                    let label = egui::RichText::new(photo_summary(index, photo));
                                    let label = if is_open { label.strong() } else { label };
                                    ui.label(label);
                                    if let Some(preview) = comment_preview(&photo.comment) {
                                        ui.label(egui::RichText::new(preview).weak().small());
                                    }

                                    ui.horizontal(|ui| {
                                        if ui
                                            .add_enabled(idle, egui::Button::new("Open"))
                                            .clicked()
                                        {
                                            open_events.write(OpenPhotoRequest {
                                                photo: key.clone(),
                                            });
                                        }
                                        if ui
                                            .add_enabled(idle, egui::Button::new("Export"))
                                            .clicked()
                                        {
                                            export_events.write(ExportPhotoRequest {
                                                photo: key.clone(),
                                            });
                                        }
                                        if ui
                                            .add_enabled(idle, egui::Button::new("Delete"))
                                            .clicked()
                                        {
                                            state.pending_delete = Some(key.clone());
                                        }
                                    });
                                    ui.add_space(4.0);
                                }
                            });
                    }
                });

            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "{} photos · {} marks",
                    record.total_photos(),
                    record.total_annotations()
                ))
                .weak(),
            );
        });
    Ok(())
}

/// Confirmation before a photo and its marks are removed
pub fn delete_confirmation_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<PhotoListState>,
    mut delete_events: MessageWriter<DeletePhotoRequest>,
) -> Result {
    let Some(photo) = state.pending_delete.clone() else {
        return Ok(());
    };

    egui::Window::new("Delete Photo?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!(
                "Delete this photo from \"{}\" together with its marks and comment?",
                photo.area_id
            ));
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    delete_events.write(DeletePhotoRequest {
                        photo: photo.clone(),
                    });
                    state.pending_delete = None;
                }
                if ui.button("Cancel").clicked() {
                    state.pending_delete = None;
                }
            });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_photo_summary_counts_marks() {
        let mut photo = PhotoRecord::new(PathBuf::from("a.jpg"));
        assert_eq!(photo_summary(0, &photo), "Photo 1 · no marks");

        photo.annotations = vec![crate::annotate::AnnotationMark::seed(
            crate::annotate::MarkTool::Rectangle,
            bevy::math::Vec2::ZERO,
            crate::annotate::HexColor::default(),
        )];
        assert_eq!(photo_summary(2, &photo), "Photo 3 · 1 mark");
    }

    #[test]
    fn test_comment_preview_uses_first_nonblank_line() {
        assert_eq!(comment_preview(""), None);
        assert_eq!(
            comment_preview("\n  Loose grab rail \nand more"),
            Some("Loose grab rail".to_string())
        );
    }

    #[test]
    fn test_comment_preview_truncates_long_lines() {
        let long = "x".repeat(60);
        let preview = comment_preview(&long).unwrap();
        assert_eq!(preview.chars().count(), 40);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_details_changed_tracks_edits() {
        let record = AuditRecord {
            client_name: "Smith".to_string(),
            bathroom_type: BathroomType::Ensuite,
            ..Default::default()
        };
        let mut state = PhotoListState::default();
        state.load_from_record(&record);
        assert!(!state.details_changed(&record));

        state.bathroom_type = BathroomType::Wetroom;
        assert!(state.details_changed(&record));
    }
}
