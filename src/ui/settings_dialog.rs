use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::{AppConfig, SaveConfigRequest, SetExportDirRequest};

/// State for the settings dialog
#[derive(Resource, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open
    pub is_open: bool,
    /// Edited export folder (as string for text editing)
    pub export_dir: String,
    pub technician_name: String,
    pub default_area: String,
    pub compress_max_width: u32,
    pub compress_quality: u8,
    /// Whether changes have been made
    pub has_changes: bool,
    /// Pending async file dialog for browsing folders
    pub pending_browse: Option<Task<Option<PathBuf>>>,
}

impl SettingsDialogState {
    /// Initialize the dialog state from current config
    pub fn load_from_config(&mut self, config: &AppConfig) {
        self.export_dir = config.data.export_dir().to_string_lossy().to_string();
        self.technician_name = config.data.technician_name.clone();
        self.default_area = config.data.default_area.clone();
        self.compress_max_width = config.data.compress_max_width;
        self.compress_quality = config.data.compress_quality;
        self.has_changes = false;
    }

    pub fn open(&mut self, config: &AppConfig) {
        self.load_from_config(config);
        self.is_open = true;
    }

    /// Copy the edits into `config`. Returns the export folder when it changed.
    fn apply_to(&self, config: &mut AppConfig) -> Option<PathBuf> {
        config.data.technician_name = self.technician_name.trim().to_string();
        let area = self.default_area.trim();
        if !area.is_empty() {
            config.data.default_area = area.to_string();
        }
        config.data.compress_max_width = self.compress_max_width.max(1);
        config.data.compress_quality = self.compress_quality.clamp(1, 100);
        config.dirty = true;

        let export_dir = PathBuf::from(self.export_dir.trim());
        (!self.export_dir.trim().is_empty() && export_dir != config.data.export_dir())
            .then_some(export_dir)
    }
}

/// Renders the settings dialog
pub fn settings_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog_state: ResMut<SettingsDialogState>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut export_dir_events: MessageWriter<SetExportDirRequest>,
) -> Result {
    // Poll pending browse task (before early return so cleanup happens even if closed)
    if let Some(ref mut task) = dialog_state.pending_browse
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        dialog_state.pending_browse = None;
        if let Some(path) = result {
            dialog_state.export_dir = path.to_string_lossy().to_string();
            dialog_state.has_changes = true;
        }
    }

    if !dialog_state.is_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut should_save = false;
    let mut should_browse = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .min_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Settings");
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Audit").strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Store:");
                    ui.label(
                        egui::RichText::new(&*config.data.store_path().to_string_lossy()).weak(),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Technician:");
                    if ui
                        .text_edit_singleline(&mut dialog_state.technician_name)
                        .changed()
                    {
                        dialog_state.has_changes = true;
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Default area:");
                    if ui
                        .text_edit_singleline(&mut dialog_state.default_area)
                        .changed()
                    {
                        dialog_state.has_changes = true;
                    }
                });
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Photos").strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Max width:");
                    let response = ui.add(
                        egui::DragValue::new(&mut dialog_state.compress_max_width)
                            .range(320..=4096)
                            .suffix(" px"),
                    );
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("JPEG quality:");
                    let response = ui.add(egui::Slider::new(
                        &mut dialog_state.compress_quality,
                        1..=100,
                    ));
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }
                });
                ui.label(
                    egui::RichText::new("Applies to photos added from now on.")
                        .weak()
                        .small(),
                );
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Export Folder").strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut dialog_state.export_dir)
                            .desired_width(280.0),
                    );
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }

                    if ui.button("Browse...").clicked() {
                        should_browse = true;
                    }
                });
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(dialog_state.has_changes, egui::Button::new("Save"))
                    .clicked()
                {
                    should_save = true;
                }

                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    // Handle browse button - spawn async dialog
    if should_browse && dialog_state.pending_browse.is_none() {
        let task_pool = AsyncComputeTaskPool::get();
        dialog_state.pending_browse = Some(task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Select Export Folder")
                .pick_folder()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    if should_save {
        match dialog_state.apply_to(&mut config) {
            // The export folder request saves the config too
            Some(path) => {
                export_dir_events.write(SetExportDirRequest { path });
            }
            None => {
                save_events.write(SaveConfigRequest);
            }
        }
        should_close = true;
    }

    if should_close {
        dialog_state.is_open = false;
        dialog_state.pending_browse = None;
        dialog_state.load_from_config(&config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_clamps_and_keeps_area() {
        let mut config = AppConfig::default();
        let mut state = SettingsDialogState::default();
        state.load_from_config(&config);
        state.default_area = "   ".to_string();
        state.compress_quality = 0;
        state.technician_name = " Sam ".to_string();

        assert_eq!(state.apply_to(&mut config), None);
        assert_eq!(config.data.default_area, "general");
        assert_eq!(config.data.compress_quality, 1);
        assert_eq!(config.data.technician_name, "Sam");
        assert!(config.dirty);
    }

    #[test]
    fn test_apply_to_reports_new_export_dir() {
        let mut config = AppConfig::default();
        let mut state = SettingsDialogState::default();
        state.load_from_config(&config);
        state.export_dir = "/mnt/reports".to_string();

        assert_eq!(state.apply_to(&mut config), Some(PathBuf::from("/mnt/reports")));
    }
}
