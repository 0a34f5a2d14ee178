//! The player: components, spawning, damage intake and death.

mod movement;
mod regen;

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::gameplay::Health;
use crate::gameplay::combat::Weapon;
use crate::gameplay::effects::damage_flash;
use crate::menus::Menu;
use crate::screens::GameState;

// === Constants ===

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MAX_STAMINA: f32 = 100.0;
pub const PLAYER_MAX_AMMO: u32 = 60;

/// Walking speed (units per second).
pub const MOVE_SPEED: f32 = 8.0;
pub const SPRINT_MULTIPLIER: f32 = 1.5;

/// Stamina drained per second while sprinting.
pub const SPRINT_DRAIN: f32 = 40.0;

/// Stamina regained per second while not sprinting.
pub const STAMINA_REGEN: f32 = 5.0;

pub const GRAVITY: f32 = -25.0;
pub const JUMP_VELOCITY: f32 = 10.0;

/// Height of the player origin above the terrain when standing.
pub const STAND_OFFSET: f32 = 0.5;

/// Camera and weapon height above the player origin.
pub const EYE_HEIGHT: f32 = 1.6;

pub const SPAWN_HEIGHT: f32 = 1.0;

pub const DODGE_STAMINA_COST: f32 = 30.0;
pub const DODGE_DISTANCE: f32 = 5.0;

/// Seconds between passive ammo refills.
pub const AMMO_REGEN_INTERVAL: f32 = 60.0;
pub const AMMO_REGEN_AMOUNT: u32 = 5;

/// Pitch stops just short of straight up or down.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;

// === Components ===

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// First-person view angles in radians. Yaw 0 looks down `-Z`.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Applies a look delta: positive `x` turns right, positive `y` looks down.
    pub fn turn(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Direction the weapon fires in.
    #[must_use]
    pub fn aim(&self) -> Dir3 {
        Dir3::new(self.rotation() * Vec3::NEG_Z).unwrap_or(Dir3::NEG_Z)
    }

    /// Horizontal forward, ignoring pitch.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right, ignoring pitch.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// World-space offset for an input vector (`x` right, `y` forward). Not normalized.
    #[must_use]
    pub fn planar_offset(&self, input: Vec2) -> Vec3 {
        self.right() * input.x + self.forward() * input.y
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// Set while sprint drained stamina this step; blocks regeneration.
    pub draining: bool,
}

impl Stamina {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            draining: false,
        }
    }

    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn regenerate(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Pays `cost` if there is enough stamina. Returns whether it was paid.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

impl Ammo {
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Uses one round. Returns `false` when empty.
    pub const fn take_one(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn add(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Vertical velocity and ground contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VerticalMotion {
    pub velocity: f32,
    pub grounded: bool,
}

impl Default for VerticalMotion {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            grounded: true,
        }
    }
}

impl VerticalMotion {
    /// Integrates gravity for one step and resolves ground contact at `floor`.
    pub fn integrate(&mut self, height: &mut f32, floor: f32, dt: f32) {
        self.velocity += GRAVITY * dt;
        *height += self.velocity * dt;
        if *height <= floor {
            *height = floor;
            self.velocity = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

/// Accumulates time toward the next passive ammo refill.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AmmoRegen {
    pub elapsed: f32,
}

impl AmmoRegen {
    /// Advances by `dt`. Returns `true` when the interval is reached, resetting to zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= AMMO_REGEN_INTERVAL {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

// === Events ===

/// Triggered once, on the hit that takes the player to zero health.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDied;

// === Helpers ===

/// Full player archetype at `position`. Single source of truth for spawning.
pub fn player_bundle(position: Vec3) -> impl Bundle {
    (
        Name::new("Player"),
        Player,
        Transform::from_translation(position),
        LookAngles::default(),
        Health::new(PLAYER_MAX_HEALTH),
        Stamina::new(PLAYER_MAX_STAMINA),
        Ammo::full(PLAYER_MAX_AMMO),
        Weapon::default(),
        VerticalMotion::default(),
        AmmoRegen::default(),
        DespawnOnExit(GameState::InGame),
    )
}

/// Applies enemy damage to the player, triggering [`PlayerDied`] on the killing blow.
///
/// Every hit on a living player flashes the screen red.
pub fn damage_player(commands: &mut Commands, health: &mut Health, amount: f32) {
    if !health.is_alive() {
        return;
    }
    commands.spawn(damage_flash());
    if health.damage(amount) {
        commands.trigger(PlayerDied);
    }
}

// === Systems ===

/// Exactly one player per run, even when a restart re-enters the same state.
fn spawn_player(mut commands: Commands, leftover: Query<Entity, With<Player>>) {
    for entity in &leftover {
        commands.entity(entity).try_despawn();
    }
    commands.spawn(player_bundle(Vec3::new(0.0, SPAWN_HEIGHT, 0.0)));
}

fn on_player_died(_died: On<PlayerDied>, mut next_menu: ResMut<NextState<Menu>>) {
    info!("Player died, game over");
    next_menu.set(Menu::GameOver);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<LookAngles>()
        .register_type::<Stamina>()
        .register_type::<Ammo>()
        .register_type::<VerticalMotion>()
        .register_type::<AmmoRegen>();

    app.add_systems(OnEnter(GameState::InGame), spawn_player);
    app.add_observer(on_player_died);

    app.add_plugins((movement::plugin, regen::plugin));
}
