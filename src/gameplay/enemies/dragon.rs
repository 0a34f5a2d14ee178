//! Dragon behaviour: hover, pursue, breathe fire.

use bevy::prelude::*;

use super::{Brain, DETECTION_RANGE, Enemy, StepClock};
use crate::gameplay::arena::clamp_to_arena;

pub const HOVER_BASE_HEIGHT: f32 = 5.0;
pub const HOVER_AMPLITUDE: f32 = 1.5;
pub const HOVER_FREQUENCY: f32 = 2.0;

pub const DRAGON_ATTACK_COOLDOWN: f32 = 2.0;

/// Height of the hover wave at `elapsed` seconds.
#[must_use]
pub fn hover_height(elapsed: f32, phase: f32) -> f32 {
    elapsed
        .mul_add(HOVER_FREQUENCY, phase)
        .sin()
        .mul_add(HOVER_AMPLITUDE, HOVER_BASE_HEIGHT)
}

pub(super) fn step(
    enemy: &mut Enemy,
    transform: &mut Transform,
    player: Vec3,
    clock: StepClock,
) -> Option<f32> {
    let Brain::Flying { float_phase } = enemy.brain else {
        return None;
    };

    transform.translation.y = hover_height(clock.elapsed, float_phase);
    let distance = transform.translation.distance(player);

    if distance < DETECTION_RANGE {
        let toward = (player - transform.translation).with_y(0.0).normalize_or_zero();
        transform.translation += toward * enemy.speed * clock.dt;
        let level = player.with_y(transform.translation.y);
        transform.look_at(level, Vec3::Y);
    }

    let mut strike = None;
    if distance < enemy.attack_range && enemy.attack_cooldown <= 0.0 {
        strike = Some(enemy.damage);
        enemy.attack_cooldown = DRAGON_ATTACK_COOLDOWN;
    }

    enemy.attack_cooldown = (enemy.attack_cooldown - clock.dt).max(0.0);
    clamp_to_arena(&mut transform.translation);

    strike
}
