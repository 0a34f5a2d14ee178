//! The UI camera draws menus and the HUD on top of whatever the world camera
//! renders. It lives for the whole app, so menus work before any run starts.

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<UiCamera>();
    app.add_systems(Startup, spawn_ui_camera);
}

/// Marker for the global UI camera.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct UiCamera;

fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("UI Camera"),
        UiCamera,
        Camera2d,
        Camera {
            // Above the first-person camera, and without clearing its image.
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}
