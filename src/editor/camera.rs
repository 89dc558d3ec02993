use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

#[derive(Component)]
pub struct EditorCamera;

/// Sprite that shows the live canvas.
#[derive(Component)]
pub struct CanvasSprite;

/// Texture the live canvas is copied into.
#[derive(Resource)]
pub struct CanvasTexture {
    pub handle: Handle<Image>,
}

/// Wrap straight-alpha RGBA bytes as a sprite texture.
pub fn rgba_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn spawn_canvas_sprite(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let handle = images.add(rgba_image(1, 1, vec![0, 0, 0, 0]));
    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::default(),
        Visibility::Hidden,
        CanvasSprite,
    ));
    commands.insert_resource(CanvasTexture { handle });
}
