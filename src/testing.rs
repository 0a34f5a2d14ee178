//! Shared helpers for unit and integration tests inside the crate.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::touch::{TouchInput, Touches, touch_screen_input_system};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::gameplay::GameRng;
use crate::gameplay::enemies::{EnemyKind, enemy_bundle};
use crate::gameplay::player::player_bundle;
use crate::gameplay::waves::WaveBonus;
use crate::menus::Menu;
use crate::screens::GameState;

/// Seed used by every test that needs randomness.
pub const TEST_SEED: u64 = 7;

/// Minimal app with states and a frozen clock. There is no `InputPlugin`, so
/// pressed keys stay `just_pressed` until the test releases them.
///
/// Time only advances through [`set_frame_delta`] or [`run_fixed_steps`].
pub fn create_base_test_app_no_input() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.insert_resource(GameRng::seeded(TEST_SEED));
    app
}

/// Inserts the input resources `InputPlugin` would normally provide.
pub fn init_input_resources(app: &mut App) {
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app.init_resource::<AccumulatedMouseMotion>();
}

/// Feeds `TouchInput` messages into `Touches` the way `InputPlugin` does.
pub fn init_touch_input(app: &mut App) {
    app.init_resource::<Touches>();
    app.add_message::<TouchInput>();
    app.add_systems(PreUpdate, touch_screen_input_system);
}

/// Enters `GameState::InGame` and lets the transition settle.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app.update();
}

/// Every following `app.update()` advances real time by `delta`.
pub fn set_frame_delta(app: &mut App, delta: Duration) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(delta));
}

/// Runs exactly `steps` fixed steps, one frame per step, then freezes the clock again.
pub fn run_fixed_steps(app: &mut App, steps: u32) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    set_frame_delta(app, timestep);
    for _ in 0..steps {
        app.update();
    }
    set_frame_delta(app, Duration::ZERO);
}

/// App with a 60 Hz fixed clock for driving individual `FixedUpdate` systems.
pub fn create_fixed_test_app() -> App {
    let mut app = create_base_test_app_no_input();
    app.insert_resource(Time::<Fixed>::from_hz(crate::simulation::STEP_HZ));
    app.update();
    app
}

pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let mut query = app.world_mut().query_filtered::<(), F>();
    let actual = query.iter(app.world()).count();
    assert_eq!(
        actual, expected,
        "expected {expected} entities matching filter, found {actual}"
    );
}

pub fn spawn_test_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn(player_bundle(position)).id()
}

/// Spawns an enemy with base stats and no wave bonus.
pub fn spawn_test_enemy(world: &mut World, kind: EnemyKind, position: Vec3) -> Entity {
    world
        .spawn(enemy_bundle(kind, position, WaveBonus::default(), 0.0))
        .id()
}
