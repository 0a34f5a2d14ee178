//! Player weapon: cooldowns, ammo use and hit-scan damage.

pub mod death;
mod hitscan;

use bevy::prelude::*;

pub use death::{EnemyKilled, KillCount};
pub use hitscan::{HEAD_ZONE_TOLERANCE, HitscanHit, Hurtbox, resolve_hitscan};

use crate::gameplay::Health;
use crate::gameplay::effects::shot_tracer;
use crate::gameplay::enemies::Enemy;
use crate::gameplay::input::PendingActions;
use crate::gameplay::player::{Ammo, EYE_HEIGHT, LookAngles, Player};
use crate::gameplay_running;
use crate::simulation::SimSet;

// === Constants ===

/// Seconds between shots.
pub const ATTACK_COOLDOWN: f32 = 0.15;

/// Seconds the shot animation blocks the next trigger pull.
pub const SHOT_DURATION: f32 = 0.1;

pub const WEAPON_RANGE: f32 = 100.0;
pub const WEAPON_DAMAGE: f32 = 35.0;
pub const HEADSHOT_MULTIPLIER: f32 = 2.0;

// === Components ===

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub cooldown: f32,
    pub shot_timer: f32,
    pub range: f32,
    pub damage: f32,
    pub headshot_multiplier: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            cooldown: 0.0,
            shot_timer: 0.0,
            range: WEAPON_RANGE,
            damage: WEAPON_DAMAGE,
            headshot_multiplier: HEADSHOT_MULTIPLIER,
        }
    }
}

impl Weapon {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0 && self.shot_timer <= 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.shot_timer = (self.shot_timer - dt).max(0.0);
    }

    #[must_use]
    pub fn damage_for(&self, headshot: bool) -> f32 {
        if headshot {
            self.damage * self.headshot_multiplier
        } else {
            self.damage
        }
    }
}

// === Systems ===

fn cool_down_weapon(time: Res<Time>, mut weapons: Query<&mut Weapon, With<Player>>) {
    for mut weapon in &mut weapons {
        weapon.tick(time.delta_secs());
    }
}

/// Consumes a latched trigger pull and resolves it as a hit-scan shot.
///
/// Nothing changes unless the weapon is ready and there is ammo.
fn fire_weapon(
    mut commands: Commands,
    mut actions: ResMut<PendingActions>,
    mut shooter: Query<(&Transform, &LookAngles, &mut Weapon, &mut Ammo, &Health), With<Player>>,
    mut targets: Query<(Entity, &Transform, &Hurtbox, &mut Health), (With<Enemy>, Without<Player>)>,
) {
    if !std::mem::take(&mut actions.attack) {
        return;
    }
    let Ok((transform, look, mut weapon, mut ammo, health)) = shooter.single_mut() else {
        return;
    };
    if !health.is_alive() || !weapon.is_ready() || !ammo.take_one() {
        return;
    }
    weapon.cooldown = ATTACK_COOLDOWN;
    weapon.shot_timer = SHOT_DURATION;

    let origin = transform.translation + Vec3::Y * EYE_HEIGHT;
    let direction = look.aim();
    let hit = resolve_hitscan(
        origin,
        direction,
        weapon.range,
        targets
            .iter()
            .filter(|(_, _, _, health)| health.is_alive())
            .map(|(entity, transform, hurtbox, _)| (entity, transform.translation, hurtbox)),
    );

    let end = hit.map_or(origin + direction * weapon.range, |hit| hit.point);
    commands.spawn(shot_tracer(origin, end));

    let Some(hit) = hit else {
        debug!("Shot missed ({} rounds left)", ammo.current);
        return;
    };
    let damage = weapon.damage_for(hit.headshot);
    if let Ok((_, _, _, mut target_health)) = targets.get_mut(hit.entity) {
        target_health.damage(damage);
        debug!(
            "Hit {:?} for {damage}{} at {:.1}m, {} HP left",
            hit.entity,
            if hit.headshot { " (headshot)" } else { "" },
            hit.distance,
            target_health.current
        );
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Weapon>().register_type::<Hurtbox>();

    app.add_systems(
        FixedUpdate,
        (cool_down_weapon, fire_weapon)
            .chain()
            .in_set(SimSet::Combat)
            .run_if(gameplay_running),
    );

    app.add_plugins(death::plugin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[allow(clippy::assertions_on_constants)]
    #[test]
    fn constants_are_valid() {
        assert!(SHOT_DURATION <= ATTACK_COOLDOWN);
        assert!(WEAPON_DAMAGE > 0.0);
        assert!(HEADSHOT_MULTIPLIER > 1.0);
    }

    #[test]
    fn weapon_tick_clamps_at_zero() {
        let mut weapon = Weapon {
            cooldown: 0.05,
            shot_timer: 0.01,
            ..default()
        };
        weapon.tick(1.0);
        assert_eq!((weapon.cooldown, weapon.shot_timer), (0.0, 0.0));
        assert!(weapon.is_ready());
    }

    #[test]
    fn headshot_doubles_damage() {
        let weapon = Weapon::default();
        assert_eq!(weapon.damage_for(false), 35.0);
        assert_eq!(weapon.damage_for(true), 70.0);
    }
}
