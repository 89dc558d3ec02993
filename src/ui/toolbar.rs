use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::annotate::{HexColor, MarkTool, PALETTE};
use crate::editor::ActiveSession;

fn swatch_color(color: &HexColor) -> egui::Color32 {
    let [r, g, b] = color.to_rgb().unwrap_or(crate::constants::DEFAULT_MARK_RGB);
    egui::Color32::from_rgb(r, g, b)
}

fn tool_button_label(tool: &MarkTool) -> &'static str {
    match tool {
        MarkTool::Ellipse => "○",
        MarkTool::Rectangle => "☐",
        MarkTool::FreehandPath => "✏",
        MarkTool::HighlightBlock => "■",
    }
}

/// Tool, color and undo controls for the open photo
pub fn toolbar_ui(mut contexts: EguiContexts, mut active: ResMut<ActiveSession>) -> Result {
    let Some(session) = active.session_mut() else {
        return Ok(());
    };

    egui::TopBottomPanel::top("annotation_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool in MarkTool::all() {
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(16.0).strong(),
                    )
                    .min_size(egui::vec2(32.0, 28.0))
                    .selected(session.tool() == *tool);

                    let response = ui.add(button);
                    if response.clicked() {
                        session.select_tool(*tool);
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                for swatch in PALETTE {
                    let color = swatch.color();
                    let selected = session.color() == &color;
                    let stroke = if selected {
                        egui::Stroke::new(2.0, egui::Color32::WHITE)
                    } else {
                        egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
                    };
                    let button = egui::Button::new("")
                        .fill(swatch_color(&color))
                        .stroke(stroke)
                        .min_size(egui::vec2(24.0, 24.0));

                    let response = ui.add(button);
                    if response.clicked() {
                        session.select_color(swatch);
                    }
                    response.on_hover_text(swatch.name);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let undo_label = format!("Undo ({})", session.mark_count());
                if ui
                    .add_enabled(session.can_undo(), egui::Button::new(undo_label))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    session.undo();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(session.photo().area_id.as_str())
                            .color(egui::Color32::LIGHT_GRAY),
                    );
                });
            });
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_color_matches_palette() {
        assert_eq!(
            swatch_color(&PALETTE[2].color()),
            egui::Color32::from_rgb(0x00, 0x7A, 0xFF)
        );
    }

    #[test]
    fn test_swatch_color_falls_back_to_default_red() {
        assert_eq!(
            swatch_color(&HexColor::new("nonsense")),
            egui::Color32::from_rgb(0xFF, 0x3B, 0x30)
        );
    }

    #[test]
    fn test_tool_labels_exist_in_bundled_fonts() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        let font = egui::FontId::proportional(16.0);
        ctx.fonts_mut(|fonts| {
            for tool in MarkTool::all() {
                let label = tool_button_label(tool);
                assert!(fonts.has_glyphs(&font, label), "{:?} label {} has no glyph", tool, label);
            }
        });
    }
}
