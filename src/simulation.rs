//! Fixed-timestep simulation clock.
//!
//! Bevy's `RunFixedMainLoop` accumulates `Time<Virtual>` and runs
//! `FixedUpdate` once per whole timestep. The virtual clock's max delta caps
//! how much wall time a single frame can feed the accumulator, so a long stall
//! costs at most [`MAX_FRAME_DELTA`] worth of steps. Opening a menu pauses the
//! virtual clock, so no steps run while paused and nothing is owed on resume.

use std::time::Duration;

use bevy::prelude::*;

use crate::gameplay_running;
use crate::screens::GameState;

// === Constants ===

/// Simulation steps per second.
pub const STEP_HZ: f64 = 60.0;

/// Largest frame delta fed into the accumulator.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

// === Sets ===

/// Ordered phases of one simulation step. Chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Step bookkeeping.
    Tick,
    /// Player actions, movement and regeneration.
    Player,
    /// Weapon cooldown and hit-scan resolution.
    Combat,
    /// Enemies at zero health are removed and counted.
    Death,
    /// Enemy and dragon behaviour.
    Enemies,
    /// Ammo pickup animation and collection.
    Pickups,
    /// Wave countdown and respawn.
    Waves,
    /// Cosmetic effect lifetimes.
    Effects,
    /// Read-only snapshot for the HUD.
    Snapshot,
}

// === Resources ===

/// Number of simulation steps completed in the current run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct SimTick(pub u64);

// === Systems ===

fn configure_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.set_max_delta(MAX_FRAME_DELTA);
}

fn reset_tick(mut tick: ResMut<SimTick>) {
    tick.0 = 0;
}

fn count_tick(mut tick: ResMut<SimTick>) {
    tick.0 += 1;
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<SimTick>();
    app.init_resource::<SimTick>();
    app.insert_resource(Time::<Fixed>::from_hz(STEP_HZ));

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Tick,
            SimSet::Player,
            SimSet::Combat,
            SimSet::Death,
            SimSet::Enemies,
            SimSet::Pickups,
            SimSet::Waves,
            SimSet::Effects,
            SimSet::Snapshot,
        )
            .chain(),
    );

    app.add_systems(Startup, configure_virtual_time);
    app.add_systems(OnEnter(GameState::InGame), reset_tick);
    app.add_systems(
        FixedUpdate,
        count_tick.in_set(SimSet::Tick).run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menus::Menu;
    use crate::testing::{create_base_test_app_no_input, set_frame_delta, transition_to_ingame};
    use pretty_assertions::assert_eq;

    fn create_clock_test_app() -> App {
        let mut app = create_base_test_app_no_input();
        app.add_plugins(plugin);
        transition_to_ingame(&mut app);
        app
    }

    fn timestep(app: &App) -> Duration {
        app.world().resource::<Time<Fixed>>().timestep()
    }

    fn ticks(app: &App) -> u64 {
        app.world().resource::<SimTick>().0
    }

    #[test]
    fn one_frame_of_three_timesteps_runs_three_steps() {
        let mut app = create_clock_test_app();
        let before = ticks(&app);

        let delta = timestep(&app) * 3;
        set_frame_delta(&mut app, delta);
        app.update();

        assert_eq!(ticks(&app) - before, 3);
    }

    #[test]
    fn step_count_is_deterministic_for_equal_elapsed_time() {
        let mut split = create_clock_test_app();
        let mut whole = create_clock_test_app();
        let step = timestep(&split);

        set_frame_delta(&mut split, step * 2);
        for _ in 0..5 {
            split.update();
        }
        set_frame_delta(&mut whole, step * 10);
        whole.update();

        assert_eq!(ticks(&split), ticks(&whole));
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut app = create_clock_test_app();
        let before = ticks(&app);

        set_frame_delta(&mut app, Duration::from_secs(5));
        app.update();

        let ran = ticks(&app) - before;
        // 0.25 s at 60 Hz, allowing for timestep rounding.
        assert!((14..=15).contains(&ran), "expected ~15 steps, got {ran}");
    }

    #[test]
    fn paused_clock_runs_no_steps_and_resumes_without_burst() {
        let mut app = create_clock_test_app();
        let step = timestep(&app);

        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        set_frame_delta(&mut app, Duration::from_secs(2));
        app.update();
        app.update();
        let paused_at = ticks(&app);

        app.world_mut().resource_mut::<Time<Virtual>>().unpause();
        set_frame_delta(&mut app, step);
        app.update();

        assert_eq!(ticks(&app) - paused_at, 1);
    }

    #[test]
    fn menu_overlay_stops_steps() {
        let mut app = create_clock_test_app();
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Pause);
        app.update();
        let before = ticks(&app);

        let delta = timestep(&app) * 4;
        set_frame_delta(&mut app, delta);
        app.update();

        assert_eq!(ticks(&app), before);
    }

    #[test]
    fn entering_game_resets_tick() {
        let mut app = create_clock_test_app();
        app.world_mut().resource_mut::<SimTick>().0 = 99;

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();

        assert_eq!(ticks(&app), 0);
    }
}
