//! Arena survival: a first-person wave-survival shooter built on Bevy.
//!
//! The simulation runs in `FixedUpdate` (see [`simulation`]); everything that
//! needs a GPU or a window lives in [`gameplay::visuals`] and is only added by
//! the binary.

#[cfg(feature = "dev")]
mod dev_tools;
pub mod gameplay;
pub mod menus;
pub mod screens;
pub mod simulation;
#[cfg(test)]
pub(crate) mod testing;
pub mod theme;
pub mod ui_camera;

use bevy::prelude::*;

use crate::menus::Menu;
use crate::screens::GameState;

/// Frame-rate systems run in a fixed order each `Update`.
/// Simulation systems use [`simulation::SimSet`] instead.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Sample keyboard, pointer and joystick into input resources.
    Input,
    /// Apply pointer look and move the camera.
    Camera,
    /// Refresh HUD text from the latest snapshot.
    Ui,
}

/// Run condition: the game is in `InGame` and no menu overlay is open.
#[must_use]
pub fn gameplay_running(
    game_state: Option<Res<State<GameState>>>,
    menu: Option<Res<State<Menu>>>,
) -> bool {
    matches!(
        (game_state.as_deref(), menu.as_deref()),
        (Some(game), Some(menu)) if *game.get() == GameState::InGame && *menu.get() == Menu::None
    )
}

/// Headless game plugin: states, simulation, HUD and menus.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (GameSet::Input, GameSet::Camera, GameSet::Ui).chain(),
    );

    app.add_plugins((
        screens::plugin,
        menus::plugin,
        theme::plugin,
        ui_camera::plugin,
        simulation::plugin,
        gameplay::plugin,
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn create_condition_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<GameState>();
        app.init_state::<Menu>();
        app.init_resource::<Flag>();
        app.add_systems(Update, raise_flag.run_if(gameplay_running));
        app
    }

    #[derive(Resource, Default)]
    struct Flag(bool);

    fn raise_flag(mut flag: ResMut<Flag>) {
        flag.0 = true;
    }

    #[test]
    fn gameplay_not_running_outside_in_game() {
        let mut app = create_condition_app();
        app.update();
        assert!(!app.world().resource::<Flag>().0);
    }

    #[test]
    fn gameplay_running_in_game_without_menu() {
        let mut app = create_condition_app();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        assert!(app.world().resource::<Flag>().0);
    }

    #[test]
    fn gameplay_stops_while_paused() {
        let mut app = create_condition_app();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Pause);
        app.update();
        assert!(!app.world().resource::<Flag>().0);
    }
}
