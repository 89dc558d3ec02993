//! Keeps the canvas sprite in step with the open session.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::annotate::{fit_into, SurfaceLayout};

use super::camera::{rgba_image, CanvasSprite, CanvasTexture};
use super::state::{ActiveSession, CanvasLayout, CanvasViewport};

/// Redraw the live canvas when the session changed and upload it to the sprite texture.
pub fn refresh_canvas_texture(
    mut active: ResMut<ActiveSession>,
    texture: Option<Res<CanvasTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(texture) = texture else {
        return;
    };
    let Some(open) = active.open.as_mut() else {
        return;
    };

    match open.canvas.refresh(&open.session) {
        Ok(true) => {
            let snapshot = open.canvas.snapshot();
            let (width, height) = snapshot.dimensions();
            match images.get_mut(&texture.handle) {
                Some(mut image) => *image = rgba_image(width, height, snapshot.into_raw()),
                // Try again next frame
                None => open.canvas.invalidate(),
            }
        }
        Ok(false) => {}
        Err(e) => error!("Failed to redraw canvas: {}", e),
    }
}

/// Convert a point in window space (top-left origin, y down) to world space for a
/// camera centred on the origin.
pub fn window_to_world(window_size: Vec2, point: Vec2) -> Vec2 {
    Vec2::new(point.x - window_size.x / 2.0, window_size.y / 2.0 - point.y)
}

/// Fit the canvas into the free screen area and record the resulting layout.
pub fn place_canvas_sprite(
    active: Res<ActiveSession>,
    viewport: Res<CanvasViewport>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut canvas_layout: ResMut<CanvasLayout>,
    mut sprite_query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<CanvasSprite>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = sprite_query.single_mut() else {
        return;
    };
    let Ok(window) = window_query.single() else {
        return;
    };

    let layout = active.open.as_ref().and_then(|open| {
        let window_size = Vec2::new(window.width(), window.height());
        let available = viewport
            .available
            .unwrap_or_else(|| Rect::from_corners(Vec2::ZERO, window_size));
        let canonical = open.canvas.size();
        fit_into(available, canonical).map(|display| SurfaceLayout::new(display, canonical))
    });

    let Some(layout) = layout else {
        canvas_layout.layout = None;
        if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
        return;
    };

    let window_size = Vec2::new(window.width(), window.height());
    let center = window_to_world(window_size, layout.display.center());
    sprite.custom_size = Some(layout.display.size());
    transform.translation = center.extend(0.0);
    if *visibility != Visibility::Inherited {
        *visibility = Visibility::Inherited;
    }
    canvas_layout.layout = Some(layout);
}
