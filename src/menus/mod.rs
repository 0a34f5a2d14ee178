//! Menu overlays that can appear on top of any screen.
//!
//! `Menu` is orthogonal to `GameState`: `Menu::Pause` and the endgame overlays
//! sit on top of `GameState::InGame`, while `Menu::Main` and `Menu::Controls`
//! sit on top of `GameState::MainMenu`. Any overlay other than `Menu::None`
//! pauses virtual time, which stops the fixed-step simulation.

mod controls;
mod endgame;
mod main_menu;
mod pause;

use bevy::prelude::*;

/// Menu overlay states. Orthogonal to `GameState`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum Menu {
    /// No overlay; gameplay runs if `GameState::InGame`.
    #[default]
    None,
    Main,
    /// Key and touch bindings, reached from the main menu.
    Controls,
    Pause,
    /// Every wave cleared.
    Victory,
    /// The player died.
    GameOver,
}

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Menu>();
    app.add_plugins((
        main_menu::plugin,
        controls::plugin,
        pause::plugin,
        endgame::plugin,
    ));

    app.add_systems(OnExit(Menu::None), pause_virtual_time);
    app.add_systems(OnEnter(Menu::None), unpause_virtual_time);
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn unpause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
