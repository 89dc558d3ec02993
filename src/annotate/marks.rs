//! Annotation mark types.
//!
//! Every coordinate is in canonical (source-photo pixel) space. A mark's color is chosen
//! from the palette when its gesture starts and never changes afterwards.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MARK_COLOR, DEFAULT_MARK_RGB};

/// A `#RRGGBB` color as stored on a mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        let digits = self.0.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::new(DEFAULT_MARK_COLOR)
    }
}

/// One entry of the fixed color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

impl Swatch {
    pub fn color(&self) -> HexColor {
        HexColor::new(self.hex)
    }
}

/// Palette offered by the toolbar; the first entry is the default.
pub const PALETTE: [Swatch; 5] = [
    Swatch { name: "Red", hex: "#FF3B30" },
    Swatch { name: "Yellow", hex: "#FFCC00" },
    Swatch { name: "Blue", hex: "#007AFF" },
    Swatch { name: "Green", hex: "#34C759" },
    Swatch { name: "White", hex: "#FFFFFF" },
];

/// The shape a gesture will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkTool {
    #[default]
    Ellipse,
    Rectangle,
    FreehandPath,
    HighlightBlock,
}

impl MarkTool {
    pub fn all() -> &'static [MarkTool] {
        &[
            MarkTool::Ellipse,
            MarkTool::Rectangle,
            MarkTool::FreehandPath,
            MarkTool::HighlightBlock,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MarkTool::Ellipse => "Circle (E)",
            MarkTool::Rectangle => "Square (R)",
            MarkTool::FreehandPath => "Draw (D)",
            MarkTool::HighlightBlock => "Hi-lite (H)",
        }
    }
}

/// A single annotation shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotationMark {
    Ellipse {
        center: Vec2,
        radii: Vec2,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<HexColor>,
    },
    #[serde(rename = "path")]
    FreehandPath {
        points: Vec<Vec2>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<HexColor>,
    },
    #[serde(rename = "rect")]
    Rectangle {
        corner1: Vec2,
        corner2: Vec2,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<HexColor>,
    },
    #[serde(rename = "highlight")]
    HighlightBlock {
        corner1: Vec2,
        corner2: Vec2,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<HexColor>,
    },
}

impl AnnotationMark {
    /// Initial shape for a gesture that starts at `start`.
    pub fn seed(tool: MarkTool, start: Vec2, color: HexColor) -> Self {
        let color = Some(color);
        match tool {
            MarkTool::Ellipse => AnnotationMark::Ellipse {
                center: start,
                radii: Vec2::ZERO,
                color,
            },
            MarkTool::FreehandPath => AnnotationMark::FreehandPath {
                points: vec![start],
                color,
            },
            MarkTool::Rectangle => AnnotationMark::Rectangle {
                corner1: start,
                corner2: start,
                color,
            },
            MarkTool::HighlightBlock => AnnotationMark::HighlightBlock {
                corner1: start,
                corner2: start,
                color,
            },
        }
    }

    pub fn tool(&self) -> MarkTool {
        match self {
            AnnotationMark::Ellipse { .. } => MarkTool::Ellipse,
            AnnotationMark::FreehandPath { .. } => MarkTool::FreehandPath,
            AnnotationMark::Rectangle { .. } => MarkTool::Rectangle,
            AnnotationMark::HighlightBlock { .. } => MarkTool::HighlightBlock,
        }
    }

    /// Stored color, if the mark has one. Marks saved before per-mark colors have none.
    pub fn color(&self) -> Option<&HexColor> {
        match self {
            AnnotationMark::Ellipse { color, .. }
            | AnnotationMark::FreehandPath { color, .. }
            | AnnotationMark::Rectangle { color, .. }
            | AnnotationMark::HighlightBlock { color, .. } => color.as_ref(),
        }
    }

    /// Color to draw with; falls back to the standard red.
    pub fn rgb(&self) -> [u8; 3] {
        self.color()
            .and_then(HexColor::to_rgb)
            .unwrap_or(DEFAULT_MARK_RGB)
    }

    /// A freehand path with fewer than two points has nothing to draw.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, AnnotationMark::FreehandPath { points, .. } if points.len() < 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parses() {
        assert_eq!(HexColor::new("#FF3B30").to_rgb(), Some([255, 59, 48]));
        assert_eq!(HexColor::new("007aff").to_rgb(), Some([0, 122, 255]));
    }

    #[test]
    fn test_hex_color_rejects_malformed() {
        assert_eq!(HexColor::new("#FFF").to_rgb(), None);
        assert_eq!(HexColor::new("#GG0000").to_rgb(), None);
        assert_eq!(HexColor::new("").to_rgb(), None);
    }

    #[test]
    fn test_palette_default_is_red() {
        assert_eq!(PALETTE[0].hex, DEFAULT_MARK_COLOR);
        assert_eq!(HexColor::default(), PALETTE[0].color());
        for swatch in PALETTE {
            assert!(swatch.color().to_rgb().is_some(), "{} should parse", swatch.name);
        }
    }

    #[test]
    fn test_default_tool_is_ellipse() {
        assert_eq!(MarkTool::default(), MarkTool::Ellipse);
        assert_eq!(MarkTool::all().len(), 4);
    }

    #[test]
    fn test_seed_matches_tool() {
        let start = Vec2::new(10.0, 20.0);
        for tool in MarkTool::all() {
            let mark = AnnotationMark::seed(*tool, start, HexColor::default());
            assert_eq!(mark.tool(), *tool);
            assert_eq!(mark.color(), Some(&HexColor::default()));
        }
    }

    #[test]
    fn test_missing_color_falls_back_to_red() {
        let mark = AnnotationMark::Rectangle {
            corner1: Vec2::ZERO,
            corner2: Vec2::ONE,
            color: None,
        };
        assert_eq!(mark.rgb(), [0xFF, 0x3B, 0x30]);
        assert_eq!(HexColor::default().to_rgb(), Some(DEFAULT_MARK_RGB));
    }

    #[test]
    fn test_degenerate_only_applies_to_short_paths() {
        let short = AnnotationMark::FreehandPath {
            points: vec![Vec2::ZERO],
            color: None,
        };
        let long = AnnotationMark::FreehandPath {
            points: vec![Vec2::ZERO, Vec2::ONE],
            color: None,
        };
        let dot = AnnotationMark::Ellipse {
            center: Vec2::ZERO,
            radii: Vec2::ZERO,
            color: None,
        };
        assert!(short.is_degenerate());
        assert!(!long.is_degenerate());
        assert!(!dot.is_degenerate());
    }

    #[test]
    fn test_mark_json_uses_type_tag() {
        let mark = AnnotationMark::Rectangle {
            corner1: Vec2::new(1.0, 2.0),
            corner2: Vec2::new(3.0, 4.0),
            color: Some(HexColor::new("#34C759")),
        };
        let json = serde_json::to_value(&mark).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["color"], "#34C759");

        let parsed: AnnotationMark = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, mark);
    }

    #[test]
    fn test_mark_without_color_deserializes() {
        let json = r#"{"type":"ellipse","center":[10.0,10.0],"radii":[4.0,2.0]}"#;
        let mark: AnnotationMark = serde_json::from_str(json).unwrap();
        assert_eq!(mark.color(), None);
        assert_eq!(mark.tool(), MarkTool::Ellipse);
    }
}
