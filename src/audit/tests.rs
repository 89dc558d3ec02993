//! Unit tests for session start and save.

use std::path::PathBuf;

use bevy::math::Vec2;
use image::{Rgba, RgbaImage};

use super::open::start_session;
use super::save::save_open_photo;
use crate::annotate::{AnnotationMark, HexColor, PhotoKey};
use crate::editor::ActiveSession;
use crate::error::AnnotateError;
use crate::photo::SourcePhoto;
use crate::store::{AuditStore, MemoryAuditStore};

fn photo() -> SourcePhoto {
    SourcePhoto::from_rgba(&RgbaImage::from_pixel(40, 30, Rgba([240, 240, 240, 255]))).unwrap()
}

fn rect() -> AnnotationMark {
    AnnotationMark::Rectangle {
        corner1: Vec2::new(2.0, 2.0),
        corner2: Vec2::new(12.0, 9.0),
        color: Some(HexColor::new("#007AFF")),
    }
}

fn store_with_photo() -> (MemoryAuditStore, PhotoKey) {
    let mut store = MemoryAuditStore::default();
    let key = store.add_photo("bath", PathBuf::from("bath.jpg")).unwrap();
    store
        .commit_session(&key, vec![rect()], "Grab rail loose".to_string())
        .unwrap();
    (store, key)
}

#[test]
fn test_start_session_seeds_saved_state() {
    let (store, key) = store_with_photo();

    let open = start_session(&store, key.clone(), photo()).unwrap();

    assert_eq!(open.session.photo(), &key);
    assert_eq!(open.session.marks(), &[rect()]);
    assert_eq!(open.session.comment(), "Grab rail loose");
    assert_eq!(open.canvas.size(), bevy::math::UVec2::new(40, 30));
}

#[test]
fn test_start_session_unknown_photo_fails() {
    let (store, _) = store_with_photo();

    let result = start_session(&store, PhotoKey::new("bath", "nope"), photo());

    assert!(matches!(result, Err(AnnotateError::PhotoNotFound { .. })));
}

#[test]
fn test_save_open_photo_commits_and_closes() {
    let (mut store, key) = store_with_photo();
    let mut active = ActiveSession {
        open: Some(start_session(&store, key.clone(), photo()).unwrap()),
    };
    if let Some(session) = active.session_mut() {
        session.begin_gesture(Vec2::new(5.0, 5.0));
        session.move_gesture(Vec2::new(15.0, 15.0));
        session.end_gesture();
        session.set_comment("Rail and floor");
    }

    assert!(save_open_photo(&mut active, &mut store).unwrap());

    assert!(!active.is_open());
    let (marks, comment) = store.annotation_state(&key).unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(comment, "Rail and floor");
}

#[test]
fn test_save_without_open_session_is_noop() {
    let (mut store, key) = store_with_photo();
    let mut active = ActiveSession::default();

    assert!(!save_open_photo(&mut active, &mut store).unwrap());
    assert_eq!(store.annotation_state(&key).unwrap().0, vec![rect()]);
}

#[test]
fn test_failed_save_keeps_session_open() {
    let (mut store, key) = store_with_photo();
    let mut active = ActiveSession {
        open: Some(start_session(&store, key.clone(), photo()).unwrap()),
    };
    if let Some(session) = active.session_mut() {
        session.set_comment("edited");
    }
    store.delete_photo(&key).unwrap();

    assert!(save_open_photo(&mut active, &mut store).is_err());

    assert!(active.is_open());
    assert_eq!(active.session().map(|s| s.comment()), Some("edited"));
}
