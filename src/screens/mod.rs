//! Top-level screens. Menus are overlays on top of these (see [`crate::menus`]).

mod in_game;
mod loading;
mod main_menu;

use bevy::prelude::*;

/// Primary game screens.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum GameState {
    /// Initial loading state.
    #[default]
    Loading,
    /// Title screen; the main menu overlay is shown on top.
    MainMenu,
    /// A run is in progress. Entering it (again) starts a fresh run.
    InGame,
}

pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();
    app.add_plugins((loading::plugin, main_menu::plugin, in_game::plugin));
}
