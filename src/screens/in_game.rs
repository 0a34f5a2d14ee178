//! In-game screen: opens the pause overlay on Escape and clears the run on exit.
//!
//! Simulation and presentation are owned by the gameplay plugins; this
//! plugin only handles the keybinding that leaves the running state.

use bevy::prelude::*;

use super::GameState;
use crate::menus::Menu;
use crate::{GameSet, gameplay_running};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnExit(GameState::InGame), clear_run_entities);
    app.add_systems(
        Update,
        open_pause_menu
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
}

fn open_pause_menu(keyboard: Res<ButtonInput<KeyCode>>, mut next_menu: ResMut<NextState<Menu>>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::Pause);
    }
}

/// Removes everything scoped to the run. Play Again re-enters `InGame` from
/// `InGame`, so this also covers the same-state transition.
fn clear_run_entities(
    mut commands: Commands,
    scoped: Query<Entity, With<DespawnOnExit<GameState>>>,
) {
    for entity in &scoped {
        commands.entity(entity).try_despawn();
    }
}
