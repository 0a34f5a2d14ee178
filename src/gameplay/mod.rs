//! Gameplay domain: the player, enemies, combat, pickups and wave progression.
//!
//! Everything here except [`visuals`] is headless and runs under `MinimalPlugins`.

pub mod arena;
pub mod combat;
pub mod effects;
pub mod enemies;
pub mod hud;
pub mod input;
pub mod pickups;
pub mod player;
pub mod touch;
pub mod visuals;
pub mod waves;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// === Shared Components ===

/// Hit points. `current` never leaves `0.0..=max`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtracts `amount`, stopping at zero.
    ///
    /// Returns `true` only for the hit that takes a living entity to zero, so
    /// callers can fire death handling exactly once.
    pub fn damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        !self.is_alive()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

// === Shared Resources ===

/// Random source for spawning and patrol wander. Seedable for tests.
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>();
    app.init_resource::<GameRng>();

    app.add_plugins((
        input::plugin,
        touch::plugin,
        player::plugin,
        combat::plugin,
        enemies::plugin,
        pickups::plugin,
        waves::plugin,
        effects::plugin,
        hud::plugin,
    ));
}
