use bevy::math::Vec2;
use image::{Rgba, RgbaImage};

use super::*;
use crate::annotate::{AnnotationMark, AnnotationSession, HexColor, MarkTool, PhotoKey, Swatch, PALETTE};
use crate::photo::SourcePhoto;

fn solid_photo(width: u32, height: u32, rgba: [u8; 4]) -> SourcePhoto {
    SourcePhoto::from_rgba(&RgbaImage::from_pixel(width, height, Rgba(rgba))).unwrap()
}

fn gradient_photo(width: u32, height: u32) -> SourcePhoto {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 3 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    SourcePhoto::from_rgba(&image).unwrap()
}

fn drag(session: &mut AnnotationSession, tool: MarkTool, swatch: Swatch, points: &[Vec2]) {
    session.select_tool(tool);
    session.select_color(swatch);
    let (first, rest) = points.split_first().unwrap();
    session.begin_gesture(*first);
    for point in rest {
        session.move_gesture(*point);
    }
    session.end_gesture();
}

fn assert_close(actual: &Rgba<u8>, expected: [u8; 4], tolerance: u8) {
    for (a, e) in actual.0.iter().zip(expected) {
        assert!(
            a.abs_diff(e) <= tolerance,
            "pixel {:?} not within {} of {:?}",
            actual.0,
            tolerance,
            expected
        );
    }
}

#[test]
fn test_export_without_marks_reproduces_photo() {
    let image = RgbaImage::from_fn(32, 24, |x, y| Rgba([x as u8 * 7, y as u8 * 9, 40, 255]));
    let photo = SourcePhoto::from_rgba(&image).unwrap();
    assert_eq!(export_composite(&photo, &[]).unwrap(), image);
}

#[test]
fn test_live_canvas_matches_export() {
    let photo = gradient_photo(120, 90);
    let mut session = AnnotationSession::open(PhotoKey::new("shower", "p1"), Vec::new(), "");
    drag(&mut session, MarkTool::Ellipse, PALETTE[0], &[Vec2::new(10.0, 10.0), Vec2::new(60.0, 40.0)]);
    drag(&mut session, MarkTool::Rectangle, PALETTE[2], &[Vec2::new(50.0, 20.0), Vec2::new(100.0, 80.0)]);
    drag(
        &mut session,
        MarkTool::FreehandPath,
        PALETTE[3],
        &[Vec2::new(5.0, 85.0), Vec2::new(30.0, 60.0), Vec2::new(70.0, 70.0)],
    );
    drag(&mut session, MarkTool::HighlightBlock, PALETTE[1], &[Vec2::new(20.0, 30.0), Vec2::new(90.0, 50.0)]);

    let mut canvas = LiveCanvas::new(photo.clone()).unwrap();
    assert!(canvas.refresh(&session).unwrap());
    let live = canvas.snapshot();

    let commit = session.commit();
    let exported = export_composite(&photo, &commit.marks).unwrap();
    assert_eq!(live, exported);
}

#[test]
fn test_reopened_session_renders_identically() {
    let photo = gradient_photo(64, 64);
    let mut session = AnnotationSession::open(PhotoKey::new("toilet", "p2"), Vec::new(), "");
    drag(&mut session, MarkTool::Rectangle, PALETTE[4], &[Vec2::new(4.0, 4.0), Vec2::new(40.0, 30.0)]);
    drag(
        &mut session,
        MarkTool::FreehandPath,
        PALETTE[0],
        &[Vec2::new(10.0, 50.0), Vec2::new(20.0, 55.0), Vec2::new(30.0, 45.5)],
    );
    let before = export_composite(&photo, session.marks()).unwrap();

    let commit = session.commit();
    let json = serde_json::to_string(&commit.marks).unwrap();
    let reloaded: Vec<AnnotationMark> = serde_json::from_str(&json).unwrap();
    let reopened = AnnotationSession::open(commit.photo, reloaded, commit.comment);

    let mut canvas = LiveCanvas::new(photo).unwrap();
    canvas.refresh(&reopened).unwrap();
    assert_eq!(canvas.snapshot(), before);
}

#[test]
fn test_refresh_skips_unchanged_revision() {
    let photo = solid_photo(16, 16, [0, 0, 0, 255]);
    let mut session = AnnotationSession::open(PhotoKey::new("a", "p"), Vec::new(), "");
    let mut canvas = LiveCanvas::new(photo).unwrap();

    assert!(canvas.refresh(&session).unwrap());
    assert!(!canvas.refresh(&session).unwrap());

    session.begin_gesture(Vec2::new(2.0, 2.0));
    assert!(canvas.refresh(&session).unwrap());

    canvas.invalidate();
    assert!(canvas.refresh(&session).unwrap());
}

#[test]
fn test_in_progress_mark_is_drawn_live_but_not_exported() {
    let photo = solid_photo(40, 40, [0, 0, 0, 255]);
    let mut session = AnnotationSession::open(PhotoKey::new("a", "p"), Vec::new(), "");
    session.select_tool(MarkTool::Rectangle);
    session.begin_gesture(Vec2::new(10.0, 10.0));
    session.move_gesture(Vec2::new(30.0, 30.0));

    let mut canvas = LiveCanvas::new(photo.clone()).unwrap();
    canvas.refresh(&session).unwrap();
    assert_close(canvas.snapshot().get_pixel(10, 20), [255, 59, 48, 255], 2);

    let commit = session.commit();
    let exported = export_composite(&photo, &commit.marks).unwrap();
    assert_eq!(exported.get_pixel(10, 20), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_colorless_mark_draws_standard_red() {
    let photo = solid_photo(40, 40, [0, 0, 0, 255]);
    let mark = AnnotationMark::Rectangle {
        corner1: Vec2::new(30.0, 30.0),
        corner2: Vec2::new(10.0, 10.0),
        color: None,
    };
    let composite = export_composite(&photo, &[mark]).unwrap();

    assert_close(composite.get_pixel(10, 20), [255, 59, 48, 255], 2);
    // Outline only; the interior keeps the photo.
    assert_eq!(composite.get_pixel(20, 20), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_highlight_is_translucent_fill() {
    let photo = solid_photo(20, 20, [255, 255, 255, 255]);
    let mark = AnnotationMark::HighlightBlock {
        corner1: Vec2::new(2.0, 2.0),
        corner2: Vec2::new(18.0, 18.0),
        color: Some(HexColor::new("#FFCC00")),
    };
    let composite = export_composite(&photo, &[mark]).unwrap();

    let center = composite.get_pixel(10, 10);
    assert_eq!(center.0[0], 255);
    assert!((225..=245).contains(&center.0[1]), "{:?}", center);
    assert!((150..=180).contains(&center.0[2]), "{:?}", center);
    assert_eq!(composite.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_later_marks_draw_on_top() {
    let photo = solid_photo(40, 40, [0, 0, 0, 255]);
    let blue = AnnotationMark::Rectangle {
        corner1: Vec2::new(10.0, 10.0),
        corner2: Vec2::new(30.0, 30.0),
        color: Some(HexColor::new("#007AFF")),
    };
    let green = AnnotationMark::FreehandPath {
        points: vec![Vec2::new(10.0, 0.0), Vec2::new(10.0, 40.0)],
        color: Some(HexColor::new("#34C759")),
    };

    let blue_then_green = export_composite(&photo, &[blue.clone(), green.clone()]).unwrap();
    assert_close(blue_then_green.get_pixel(10, 20), [0x34, 0xC7, 0x59, 255], 2);

    let green_then_blue = export_composite(&photo, &[green, blue]).unwrap();
    assert_close(green_then_blue.get_pixel(10, 20), [0x00, 0x7A, 0xFF, 255], 2);
}

#[test]
fn test_single_point_path_is_skipped() {
    let photo = gradient_photo(16, 16);
    let dot = AnnotationMark::FreehandPath {
        points: vec![Vec2::new(8.0, 8.0)],
        color: None,
    };
    assert_eq!(
        export_composite(&photo, &[dot]).unwrap(),
        export_composite(&photo, &[]).unwrap()
    );
}

#[test]
fn test_write_export_produces_decodable_jpeg() {
    let photo = gradient_photo(48, 32);
    let composite = export_composite(&photo, &[]).unwrap();
    let path = std::env::temp_dir()
        .join(format!("eyeagle-export-{}", uuid::Uuid::now_v7()))
        .join("shower-p1.jpg");

    write_export(&path, &composite).unwrap();
    let decoded = image::open(&path);
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }

    let decoded = decoded.unwrap();
    assert_eq!((decoded.width(), decoded.height()), (48, 32));
}
