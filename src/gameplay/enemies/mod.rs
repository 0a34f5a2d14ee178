//! Hostile entities: goblins and dragons.
//!
//! Every enemy shares the [`Enemy`] component. Behaviour is selected by its
//! [`Brain`]: ground walkers patrol, chase and melee; flyers hover, pursue
//! and breathe fire. Both expose the same per-step update.

mod dragon;
mod ground;

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::combat::Hurtbox;
use crate::gameplay::effects::fire_breath;
use crate::gameplay::player::{Player, damage_player};
use crate::gameplay::waves::WaveBonus;
use crate::gameplay::{GameRng, Health};
use crate::screens::GameState;
use crate::simulation::SimSet;
use crate::gameplay_running;

pub use ground::GroundState;

// === Constants ===

/// Ground enemies chase when the player is closer than this.
pub const CHASE_RANGE: f32 = 80.0;

/// Dragons pursue when the player is closer than this.
pub const DETECTION_RANGE: f32 = 80.0;

/// Head height used for ground enemies' headshot zone, regardless of size.
pub const GROUND_HEAD_HEIGHT: f32 = 1.55;

/// Head height used for dragons' headshot zone.
pub const DRAGON_HEAD_HEIGHT: f32 = 0.3;

// === Kinds ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyKind {
    Goblin,
    GoblinKing,
    Dragon,
    DragonKing,
}

/// Base stats for an enemy kind, before wave bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Visual and hurtbox scale.
    pub size: f32,
}

impl EnemyKind {
    pub const ALL: [Self; 4] = [Self::Goblin, Self::GoblinKing, Self::Dragon, Self::DragonKing];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Goblin => "Goblin",
            Self::GoblinKing => "Goblin King",
            Self::Dragon => "Dragon",
            Self::DragonKing => "Dragon King",
        }
    }

    #[must_use]
    pub const fn is_flying(self) -> bool {
        matches!(self, Self::Dragon | Self::DragonKing)
    }

    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Goblin => EnemyStats {
                health: 50.0,
                damage: 10.0,
                speed: 4.0,
                attack_range: 1.5,
                attack_cooldown: 1.5,
                size: 1.0,
            },
            Self::GoblinKing => EnemyStats {
                health: 100.0,
                damage: 20.0,
                speed: 5.0,
                attack_range: 1.5,
                attack_cooldown: 1.5,
                size: 1.5,
            },
            Self::Dragon => EnemyStats {
                health: 80.0,
                damage: 15.0,
                speed: 6.0,
                attack_range: 3.0,
                attack_cooldown: 2.0,
                size: 1.5,
            },
            Self::DragonKing => EnemyStats {
                health: 200.0,
                damage: 25.0,
                speed: 6.0,
                attack_range: 4.0,
                attack_cooldown: 2.0,
                size: 2.5,
            },
        }
    }

    /// Shootable volume. Ground enemies stand on their origin; dragons are
    /// centred on it with wings spread along `x`.
    #[must_use]
    pub fn hurtbox(self) -> Hurtbox {
        let size = self.stats().size;
        if self.is_flying() {
            Hurtbox {
                center_offset: Vec3::ZERO,
                half_extents: Vec3::new(2.0, 0.5, 1.3) * size,
                head_height: DRAGON_HEAD_HEIGHT,
            }
        } else {
            let half_height = 0.9375 * size;
            Hurtbox {
                center_offset: Vec3::Y * half_height,
                half_extents: Vec3::new(0.5 * size, half_height, 0.5 * size),
                head_height: GROUND_HEAD_HEIGHT,
            }
        }
    }
}

// === Components ===

/// Behaviour variant and its private state.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Brain {
    Ground {
        state: GroundState,
        patrol_heading: f32,
    },
    Flying {
        float_phase: f32,
    },
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub damage: f32,
    pub speed: f32,
    pub attack_range: f32,
    /// Seconds until the next strike is allowed. Never negative.
    pub attack_cooldown: f32,
    pub brain: Brain,
}

impl Enemy {
    /// Creates an enemy with `bonus` damage added. `phase` seeds the patrol
    /// heading or the hover phase, in radians.
    #[must_use]
    pub fn new(kind: EnemyKind, bonus: WaveBonus, phase: f32) -> Self {
        let stats = kind.stats();
        let brain = if kind.is_flying() {
            Brain::Flying { float_phase: phase }
        } else {
            Brain::Ground {
                state: GroundState::Patrol,
                patrol_heading: phase,
            }
        };
        Self {
            kind,
            damage: stats.damage + bonus.damage,
            speed: stats.speed,
            attack_range: stats.attack_range,
            attack_cooldown: 0.0,
            brain,
        }
    }

    /// Advances one simulation step toward `player`.
    ///
    /// Returns the damage dealt to the player this step, if any.
    pub fn step(
        &mut self,
        transform: &mut Transform,
        player: Vec3,
        clock: StepClock,
        rng: &mut impl Rng,
    ) -> Option<f32> {
        match self.brain {
            Brain::Ground { .. } => ground::step(self, transform, player, clock.dt, rng),
            Brain::Flying { .. } => dragon::step(self, transform, player, clock),
        }
    }
}

/// Time values an enemy step needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepClock {
    pub dt: f32,
    /// Simulation time since startup, drives the dragon hover.
    pub elapsed: f32,
}

/// Full enemy archetype. Single source of truth for spawning.
pub fn enemy_bundle(kind: EnemyKind, position: Vec3, bonus: WaveBonus, phase: f32) -> impl Bundle {
    (
        Name::new(kind.display_name()),
        Enemy::new(kind, bonus, phase),
        Health::new(kind.stats().health + bonus.health),
        kind.hurtbox(),
        Transform::from_translation(position),
        DespawnOnExit(GameState::InGame),
    )
}

// === Systems ===

fn update_enemies(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut player: Query<(&Transform, &mut Health), (With<Player>, Without<Enemy>)>,
    mut enemies: Query<(&mut Enemy, &mut Transform, &Health), Without<Player>>,
) {
    let Ok((player_transform, mut player_health)) = player.single_mut() else {
        return;
    };
    if !player_health.is_alive() {
        return;
    }
    let target = player_transform.translation;
    let clock = StepClock {
        dt: time.delta_secs(),
        elapsed: time.elapsed_secs(),
    };

    for (mut enemy, mut transform, health) in &mut enemies {
        if !health.is_alive() {
            continue;
        }
        let Some(damage) = enemy.step(&mut transform, target, clock, &mut rng.0) else {
            continue;
        };
        if enemy.kind.is_flying() {
            commands.spawn(fire_breath(transform.translation, target));
        }
        debug!("{} strikes the player for {damage}", enemy.kind.display_name());
        damage_player(&mut commands, &mut player_health, damage);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Enemy>();

    app.add_systems(
        FixedUpdate,
        update_enemies
            .in_set(SimSet::Enemies)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kings_are_tougher_than_their_kin() {
        assert!(EnemyKind::GoblinKing.stats().health > EnemyKind::Goblin.stats().health);
        assert!(EnemyKind::DragonKing.stats().health > EnemyKind::Dragon.stats().health);
        assert!(EnemyKind::DragonKing.stats().attack_range > EnemyKind::Dragon.stats().attack_range);
    }

    #[test]
    fn brain_matches_kind() {
        for kind in EnemyKind::ALL {
            let enemy = Enemy::new(kind, WaveBonus::default(), 0.0);
            assert_eq!(matches!(enemy.brain, Brain::Flying { .. }), kind.is_flying());
        }
    }

    #[test]
    fn bonus_is_applied_to_damage() {
        let bonus = WaveBonus {
            health: 30.0,
            damage: 1.0,
        };
        let enemy = Enemy::new(EnemyKind::Goblin, bonus, 0.0);
        assert_eq!(enemy.damage, 11.0);
    }

    #[test]
    fn ground_hurtbox_rests_on_origin() {
        let hurtbox = EnemyKind::Goblin.hurtbox();
        let aabb = hurtbox.aabb(Vec3::ZERO);
        assert_eq!(aabb.min.y, 0.0);
        assert_eq!(aabb.max.y, 1.875);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::effects::FireBreath;
    use crate::gameplay::player::PlayerDied;
    use crate::testing::{
        assert_entity_count, create_fixed_test_app, run_fixed_steps, spawn_test_enemy,
        spawn_test_player,
    };
    use pretty_assertions::assert_eq;

    #[derive(Resource, Default)]
    struct Deaths(u32);

    fn count_deaths(_died: On<PlayerDied>, mut deaths: ResMut<Deaths>) {
        deaths.0 += 1;
    }

    fn create_enemy_test_app() -> App {
        let mut app = create_fixed_test_app();
        app.init_resource::<Deaths>();
        app.add_observer(count_deaths);
        app.add_systems(FixedUpdate, update_enemies);
        app
    }

    fn player_health(app: &App, player: Entity) -> f32 {
        app.world().get::<Health>(player).map_or(f32::NAN, |h| h.current)
    }

    #[test]
    fn adjacent_goblin_strikes_once_per_cooldown() {
        let mut app = create_enemy_test_app();
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 0.5, 0.0));
        spawn_test_enemy(app.world_mut(), EnemyKind::Goblin, Vec3::new(1.0, 0.0, 0.0));

        run_fixed_steps(&mut app, 1);
        assert_eq!(player_health(&app, player), 90.0);

        // 1.5 s cooldown: no second strike one second later.
        run_fixed_steps(&mut app, 60);
        assert_eq!(player_health(&app, player), 90.0);

        run_fixed_steps(&mut app, 40);
        assert_eq!(player_health(&app, player), 80.0);
    }

    #[test]
    fn lethal_strikes_trigger_death_once() {
        let mut app = create_enemy_test_app();
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 0.5, 0.0));
        if let Some(mut health) = app.world_mut().get_mut::<Health>(player) {
            health.current = 15.0;
        }
        spawn_test_enemy(app.world_mut(), EnemyKind::Goblin, Vec3::new(1.0, 0.0, 0.0));
        spawn_test_enemy(app.world_mut(), EnemyKind::Goblin, Vec3::new(-1.0, 0.0, 0.0));

        run_fixed_steps(&mut app, 200);

        assert_eq!(player_health(&app, player), 0.0);
        assert_eq!(app.world().resource::<Deaths>().0, 1);
    }

    #[test]
    fn dead_enemies_do_not_act() {
        let mut app = create_enemy_test_app();
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 0.5, 0.0));
        let goblin = spawn_test_enemy(app.world_mut(), EnemyKind::Goblin, Vec3::new(1.0, 0.0, 0.0));
        if let Some(mut health) = app.world_mut().get_mut::<Health>(goblin) {
            health.current = 0.0;
        }

        run_fixed_steps(&mut app, 10);

        assert_eq!(player_health(&app, player), 100.0);
    }

    #[test]
    fn dragon_strike_breathes_fire() {
        let mut app = create_enemy_test_app();
        // Hovering dragon dips to y = 3.5; a jumping player comes within reach.
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 2.0, 0.0));
        let dragon = spawn_test_enemy(app.world_mut(), EnemyKind::DragonKing, Vec3::new(0.5, 5.0, 0.0));
        if let Some(mut enemy) = app.world_mut().get_mut::<Enemy>(dragon) {
            // Hover at its lowest point for the first step.
            enemy.brain = Brain::Flying {
                float_phase: -std::f32::consts::FRAC_PI_2,
            };
        }

        run_fixed_steps(&mut app, 1);

        assert_eq!(player_health(&app, player), 75.0);
        assert_entity_count::<With<FireBreath>>(&mut app, 1);
    }

    #[test]
    fn enemies_stay_inert_once_player_is_dead() {
        let mut app = create_enemy_test_app();
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 0.5, 0.0));
        if let Some(mut health) = app.world_mut().get_mut::<Health>(player) {
            health.current = 0.0;
        }
        let goblin = spawn_test_enemy(app.world_mut(), EnemyKind::Goblin, Vec3::new(10.0, 0.0, 0.0));

        run_fixed_steps(&mut app, 30);

        let position = app.world().get::<Transform>(goblin).map(|t| t.translation);
        assert_eq!(position, Some(Vec3::new(10.0, 0.0, 0.0)));
    }
}
