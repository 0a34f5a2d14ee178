//! Short-lived cosmetic entities: shot tracers, dragon fire and the damage flash.
//!
//! Effects carry no gameplay state. Each one owns a [`Lifetime`] that is
//! ticked by the simulation, so pausing freezes them and leaving the run
//! despawns them with everything else.

use bevy::prelude::*;

use crate::gameplay_running;
use crate::screens::GameState;
use crate::simulation::SimSet;
use crate::theme::palette;

// === Constants ===

pub const SHOT_TRACER_LIFETIME: f32 = 0.1;
pub const FIRE_BREATH_LIFETIME: f32 = 0.5;
pub const DAMAGE_FLASH_LIFETIME: f32 = 0.1;

/// Flame particles drawn per breath.
pub const FIRE_BREATH_PARTICLES: usize = 15;

// === Components ===

/// Despawns the entity when the timer finishes.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    #[must_use]
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShotTracer {
    pub from: Vec3,
    pub to: Vec3,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FireBreath {
    pub origin: Vec3,
    pub target: Vec3,
}

/// Marker for the red full-screen tint shown when the player is hit.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DamageFlash;

// === Bundles ===

pub fn shot_tracer(from: Vec3, to: Vec3) -> impl Bundle {
    (
        Name::new("Shot Tracer"),
        ShotTracer { from, to },
        Lifetime::from_seconds(SHOT_TRACER_LIFETIME),
        DespawnOnExit(GameState::InGame),
    )
}

pub fn fire_breath(origin: Vec3, target: Vec3) -> impl Bundle {
    (
        Name::new("Fire Breath"),
        FireBreath { origin, target },
        Transform::from_translation(origin),
        Lifetime::from_seconds(FIRE_BREATH_LIFETIME),
        DespawnOnExit(GameState::InGame),
    )
}

pub fn damage_flash() -> impl Bundle {
    (
        Name::new("Damage Flash"),
        DamageFlash,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(palette::DAMAGE_FLASH),
        Pickable::IGNORE,
        Lifetime::from_seconds(DAMAGE_FLASH_LIFETIME),
        DespawnOnExit(GameState::InGame),
    )
}

// === Systems ===

fn expire_effects(
    time: Res<Time>,
    mut commands: Commands,
    mut effects: Query<(Entity, &mut Lifetime)>,
) {
    for (entity, mut lifetime) in &mut effects {
        lifetime.0.tick(time.delta());
        if lifetime.0.just_finished() {
            commands.entity(entity).try_despawn();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Lifetime>()
        .register_type::<ShotTracer>()
        .register_type::<FireBreath>()
        .register_type::<DamageFlash>();

    app.add_systems(
        FixedUpdate,
        expire_effects
            .in_set(SimSet::Effects)
            .run_if(gameplay_running),
    );
}
