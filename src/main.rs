//! Arena survival entry point.

use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena Survival".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(arena_survival::theme::palette::SKY))
        .add_plugins((
            arena_survival::plugin,
            arena_survival::gameplay::visuals::plugin,
        ))
        .run();
}
