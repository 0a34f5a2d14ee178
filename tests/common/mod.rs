//! Shared setup for the cross-module tests: the headless game on a manual clock.

#![allow(dead_code)]

use std::time::Duration;

use arena_survival::gameplay::GameRng;
use arena_survival::gameplay::waves::WaveRules;
use arena_survival::menus::Menu;
use arena_survival::screens::GameState;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const SEED: u64 = 11;

/// Full headless game, settled on the main menu with the clock frozen.
pub fn create_game_app(rules: WaveRules) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin));
    app.add_plugins(arena_survival::plugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.insert_resource(GameRng::seeded(SEED));
    app.insert_resource(rules);
    app.update();
    app.update();
    app
}

/// Does what the Start/Play Again buttons do.
pub fn start_run(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.world_mut()
        .resource_mut::<NextState<Menu>>()
        .set(Menu::None);
    app.update();
    app.update();
}

/// Feeds exactly `steps` fixed timesteps through the frame loop.
pub fn run_steps(app: &mut App, steps: u32) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(timestep));
    for _ in 0..steps {
        app.update();
    }
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
}

pub fn menu(app: &App) -> Menu {
    *app.world().resource::<State<Menu>>().get()
}

pub fn game_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<(), F>();
    query.iter(app.world()).count()
}
