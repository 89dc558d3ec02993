//! Notices and the busy modal.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::audit::{AsyncAuditOperation, AuditError, ExportNotice, PhotoUnavailable};
use crate::config::ConfigResetNotification;

/// Keep the tail of a long path, which is the part that identifies it.
fn shorten_path(path: &str) -> String {
    let count = path.chars().count();
    if count > 50 {
        let tail: String = path.chars().skip(count - 47).collect();
        format!("...{}", tail)
    } else {
        path.to_string()
    }
}

pub fn photo_unavailable_ui(
    mut contexts: EguiContexts,
    mut unavailable: ResMut<PhotoUnavailable>,
) -> Result {
    let Some(message) = unavailable.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Photo Unavailable")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("This photo cannot be opened for annotation:");
            ui.add_space(5.0);
            ui.label(egui::RichText::new(message).weak());
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                unavailable.message = None;
            }
        });

    Ok(())
}

pub fn audit_error_ui(mut contexts: EguiContexts, mut audit_error: ResMut<AuditError>) -> Result {
    let Some(message) = audit_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(egui::Color32::from_rgb(255, 100, 100), message);
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                audit_error.message = None;
            }
        });

    Ok(())
}

pub fn export_notice_ui(mut contexts: EguiContexts, mut notice: ResMut<ExportNotice>) -> Result {
    let Some(path) = notice.path.clone() else {
        return Ok(());
    };

    egui::Window::new("Export Complete")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The annotated photo was saved to:");
            ui.add_space(5.0);
            let path_str = path.to_string_lossy();
            ui.label(egui::RichText::new(shorten_path(&path_str)).weak())
                .on_hover_text(path_str.as_ref());
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notice.path = None;
            }
        });

    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be read and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason.as_str()).weak().small());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

/// Blocks the window while a photo is decoded, exported or imported
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncAuditOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let description = async_op
        .operation_description
        .as_deref()
        .unwrap_or("Working...");

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });

    Ok(())
}
