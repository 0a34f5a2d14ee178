//! Ground walker behaviour: patrol, chase, melee.

use bevy::prelude::*;
use rand::Rng;

use super::{Brain, CHASE_RANGE, Enemy};
use crate::gameplay::arena::{clamp_to_arena, terrain_height};

/// Patrol moves at this fraction of full speed.
pub const PATROL_SPEED_FACTOR: f32 = 0.3;

/// Largest heading change per step while patrolling, in radians.
pub const PATROL_TURN: f32 = 0.05;

pub const GROUND_ATTACK_COOLDOWN: f32 = 1.5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GroundState {
    #[default]
    Patrol,
    Chase,
    Attack,
}

impl GroundState {
    /// Picks the state for a given distance to the player. No hysteresis:
    /// an enemy sitting on a boundary may flip every step.
    #[must_use]
    pub fn from_distance(distance: f32, attack_range: f32) -> Self {
        if distance < attack_range {
            Self::Attack
        } else if distance < CHASE_RANGE {
            Self::Chase
        } else {
            Self::Patrol
        }
    }
}

pub(super) fn step(
    enemy: &mut Enemy,
    transform: &mut Transform,
    player: Vec3,
    dt: f32,
    rng: &mut impl Rng,
) -> Option<f32> {
    let Brain::Ground {
        state,
        patrol_heading,
    } = &mut enemy.brain
    else {
        return None;
    };

    *state = GroundState::from_distance(transform.translation.distance(player), enemy.attack_range);
    let mut strike = None;

    match *state {
        GroundState::Patrol => {
            *patrol_heading += rng.random_range(-PATROL_TURN..PATROL_TURN);
            let heading = Vec3::new(patrol_heading.cos(), 0.0, patrol_heading.sin());
            transform.translation += heading * enemy.speed * PATROL_SPEED_FACTOR * dt;
        }
        GroundState::Chase => {
            let toward = (player - transform.translation).with_y(0.0).normalize_or_zero();
            transform.translation += toward * enemy.speed * dt;
            let eye_level = player.with_y(transform.translation.y);
            transform.look_at(eye_level, Vec3::Y);
        }
        GroundState::Attack => {
            if enemy.attack_cooldown <= 0.0
                && transform.translation.distance(player) < enemy.attack_range
            {
                strike = Some(enemy.damage);
                enemy.attack_cooldown = GROUND_ATTACK_COOLDOWN;
            }
        }
    }

    let position = transform.translation;
    transform.translation.y = terrain_height(position.x, position.z);
    enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
    clamp_to_arena(&mut transform.translation);

    strike
}
