//! Arena geometry: flat terrain, hard bounds and spawn placement.

use bevy::prelude::*;
use rand::Rng;

/// Half-width of the playable square. Every entity is clamped to `±ARENA_HALF_EXTENT`.
pub const ARENA_HALF_EXTENT: f32 = 95.0;

/// Half-width of the square random spawns are drawn from.
pub const SPAWN_HALF_EXTENT: f32 = 80.0;

/// Ground height at `(x, z)`. The arena is flat.
#[must_use]
pub const fn terrain_height(_x: f32, _z: f32) -> f32 {
    0.0
}

/// Clamps `x` and `z` into the arena. Height is left alone.
pub fn clamp_to_arena(position: &mut Vec3) {
    position.x = position.x.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
    position.z = position.z.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
}

/// Uniform random `(x, z)` inside the spawn square.
pub fn random_spawn_point(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(-SPAWN_HALF_EXTENT..=SPAWN_HALF_EXTENT),
        rng.random_range(-SPAWN_HALF_EXTENT..=SPAWN_HALF_EXTENT),
    )
}
