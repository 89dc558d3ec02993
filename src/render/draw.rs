//! Per-variant mark drawing.
//!
//! This is the only place marks are turned into pixels. The live canvas and the export
//! compositor both go through [`draw_mark`], so they cannot drift apart.

use bevy::math::Vec2;
use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::annotate::AnnotationMark;
use crate::constants::{HIGHLIGHT_ALPHA, MARK_LINE_WIDTH};

fn mark_stroke() -> Stroke {
    Stroke {
        width: MARK_LINE_WIDTH,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn mark_paint(mark: &AnnotationMark, alpha: u8) -> Paint<'static> {
    let [r, g, b] = mark.rgb();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, alpha);
    paint.anti_alias = true;
    paint
}

fn highlight_alpha() -> u8 {
    (HIGHLIGHT_ALPHA * 255.0).round() as u8
}

fn ordered_rect(corner1: Vec2, corner2: Vec2) -> Option<Rect> {
    let min = corner1.min(corner2);
    let max = corner1.max(corner2);
    Rect::from_ltrb(min.x, min.y, max.x, max.y)
}

fn polyline(points: &[Vec2]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for point in rest {
        pb.line_to(point.x, point.y);
    }
    pb.finish()
}

/// Draw one mark onto a surface whose pixels are in canonical space.
///
/// Shapes that cannot produce a path (single-point paths, non-finite coordinates) are
/// skipped silently.
pub fn draw_mark(pixmap: &mut Pixmap, mark: &AnnotationMark) {
    match mark {
        AnnotationMark::Ellipse { center, radii, .. } => {
            let bounds = Rect::from_ltrb(
                center.x - radii.x,
                center.y - radii.y,
                center.x + radii.x,
                center.y + radii.y,
            );
            if let Some(path) = bounds.and_then(PathBuilder::from_oval) {
                let paint = mark_paint(mark, u8::MAX);
                pixmap.stroke_path(&path, &paint, &mark_stroke(), Transform::identity(), None);
            }
        }
        AnnotationMark::FreehandPath { points, .. } => {
            if let Some(path) = polyline(points) {
                let paint = mark_paint(mark, u8::MAX);
                pixmap.stroke_path(&path, &paint, &mark_stroke(), Transform::identity(), None);
            }
        }
        AnnotationMark::Rectangle {
            corner1, corner2, ..
        } => {
            if let Some(rect) = ordered_rect(*corner1, *corner2) {
                let path = PathBuilder::from_rect(rect);
                let paint = mark_paint(mark, u8::MAX);
                pixmap.stroke_path(&path, &paint, &mark_stroke(), Transform::identity(), None);
            }
        }
        AnnotationMark::HighlightBlock {
            corner1, corner2, ..
        } => {
            if let Some(rect) = ordered_rect(*corner1, *corner2) {
                let paint = mark_paint(mark, highlight_alpha());
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }
}

/// Draw marks in list order, so later marks sit on top.
pub fn draw_marks<'a>(pixmap: &mut Pixmap, marks: impl IntoIterator<Item = &'a AnnotationMark>) {
    for mark in marks {
        draw_mark(pixmap, mark);
    }
}
