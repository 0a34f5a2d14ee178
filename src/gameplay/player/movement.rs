//! Player locomotion: walking, sprinting, gravity, jumping and dodging.

use bevy::prelude::*;

use super::{
    DODGE_DISTANCE, DODGE_STAMINA_COST, JUMP_VELOCITY, LookAngles, MOVE_SPEED, Player,
    SPRINT_DRAIN, SPRINT_MULTIPLIER, STAND_OFFSET, Stamina, VerticalMotion,
};
use crate::gameplay::Health;
use crate::gameplay::arena::{clamp_to_arena, terrain_height};
use crate::gameplay::input::{PendingActions, PlayerInput};
use crate::gameplay_running;
use crate::simulation::SimSet;

/// Consumes latched jump and dodge requests.
///
/// Jump only leaves the ground when grounded. Dodge pays its stamina cost
/// whenever affordable, even with no direction held.
fn apply_player_actions(
    mut actions: ResMut<PendingActions>,
    input: Res<PlayerInput>,
    mut player: Query<
        (
            &mut Transform,
            &LookAngles,
            &mut Stamina,
            &mut VerticalMotion,
            &Health,
        ),
        With<Player>,
    >,
) {
    let jump = std::mem::take(&mut actions.jump);
    let dodge = std::mem::take(&mut actions.dodge);
    let Ok((mut transform, look, mut stamina, mut motion, health)) = player.single_mut() else {
        return;
    };
    if !health.is_alive() {
        return;
    }

    if jump && motion.grounded {
        motion.velocity = JUMP_VELOCITY;
        motion.grounded = false;
    }

    if dodge && stamina.try_spend(DODGE_STAMINA_COST) {
        let direction = look.planar_offset(input.movement).normalize_or_zero();
        transform.translation += direction * DODGE_DISTANCE;
        clamp_to_arena(&mut transform.translation);
    }
}

pub(super) fn move_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut player: Query<
        (
            &mut Transform,
            &LookAngles,
            &mut Stamina,
            &mut VerticalMotion,
            &Health,
        ),
        With<Player>,
    >,
) {
    let Ok((mut transform, look, mut stamina, mut motion, health)) = player.single_mut() else {
        return;
    };
    if !health.is_alive() {
        return;
    }
    let dt = time.delta_secs();

    let sprinting = input.sprint && stamina.current > 0.0 && motion.grounded;
    stamina.draining = sprinting;
    let speed = if sprinting {
        stamina.drain(SPRINT_DRAIN * dt);
        MOVE_SPEED * SPRINT_MULTIPLIER
    } else {
        MOVE_SPEED
    };

    let axes = input.movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
    transform.translation += look.planar_offset(axes) * speed * dt;

    let position = transform.translation;
    let floor = terrain_height(position.x, position.z) + STAND_OFFSET;
    motion.integrate(&mut transform.translation.y, floor, dt);

    clamp_to_arena(&mut transform.translation);
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (apply_player_actions, move_player)
            .chain()
            .in_set(SimSet::Player)
            .run_if(gameplay_running),
    );
}
