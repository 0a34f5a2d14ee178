//! Ammo pickups scattered around the arena each wave.

use bevy::prelude::*;

use crate::gameplay::player::{Ammo, Player};
use crate::screens::GameState;
use crate::simulation::SimSet;
use crate::gameplay_running;

// === Constants ===

pub const AMMO_PICKUP_AMOUNT: u32 = 15;

/// Pickups are collected when the player comes this close.
pub const COLLECT_RADIUS: f32 = 2.0;

const BOB_BASE_HEIGHT: f32 = 0.5;
const BOB_AMPLITUDE: f32 = 0.2;
const BOB_FREQUENCY: f32 = 3.0;

/// Spin around the vertical axis, radians per second.
const SPIN_SPEED: f32 = 2.0;

// === Components ===

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AmmoPickup {
    pub bob_phase: f32,
}

pub fn ammo_pickup(position: Vec2, bob_phase: f32) -> impl Bundle {
    (
        Name::new("Ammo Pickup"),
        AmmoPickup { bob_phase },
        Transform::from_xyz(position.x, BOB_BASE_HEIGHT, position.y),
        DespawnOnExit(GameState::InGame),
    )
}

// === Systems ===

/// Animates every pickup and hands its ammo to the player on contact.
/// A collected pickup is despawned, so it pays out once.
fn update_pickups(
    time: Res<Time>,
    mut commands: Commands,
    mut player: Query<(&Transform, &mut Ammo), With<Player>>,
    mut pickups: Query<(Entity, &AmmoPickup, &mut Transform), Without<Player>>,
) {
    let Ok((player_transform, mut ammo)) = player.single_mut() else {
        return;
    };
    let elapsed = time.elapsed_secs();

    for (entity, pickup, mut transform) in &mut pickups {
        transform.rotate_y(SPIN_SPEED * time.delta_secs());
        transform.translation.y = elapsed
            .mul_add(BOB_FREQUENCY, pickup.bob_phase)
            .sin()
            .mul_add(BOB_AMPLITUDE, BOB_BASE_HEIGHT);

        if transform.translation.distance(player_transform.translation) < COLLECT_RADIUS {
            ammo.add(AMMO_PICKUP_AMOUNT);
            debug!("Picked up ammo, now {}", ammo.current);
            commands.entity(entity).despawn();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<AmmoPickup>();

    app.add_systems(
        FixedUpdate,
        update_pickups
            .in_set(SimSet::Pickups)
            .run_if(gameplay_running),
    );
}
