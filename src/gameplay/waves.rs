//! Wave director: what each wave spawns, when a wave is cleared, and the
//! countdown between waves.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::arena::{random_spawn_point, terrain_height};
use crate::gameplay::combat::EnemyKilled;
use crate::gameplay::enemies::{Enemy, EnemyKind, enemy_bundle};
use crate::gameplay::pickups::{AmmoPickup, ammo_pickup};
use crate::gameplay::{GameRng, Health};
use crate::menus::Menu;
use crate::screens::GameState;
use crate::simulation::SimSet;
use crate::gameplay_running;

// === Constants ===

pub const TOTAL_WAVES: u32 = 20;

/// One-second ticks between clearing a wave and the next one spawning.
pub const COUNTDOWN_TICKS: u32 = 3;

pub const AMMO_PICKUPS_PER_WAVE: u32 = 15;

/// Dragons first appear on this wave.
pub const FIRST_DRAGON_WAVE: u32 = 2;

/// The dragon king first appears on this wave.
pub const FIRST_DRAGON_KING_WAVE: u32 = 5;

/// The dragon king always arrives from the same spot, `(x, z)`.
pub const DRAGON_KING_SPAWN: Vec2 = Vec2::new(0.0, -50.0);

/// Starting height for dragons before their first hover step.
const DRAGON_SPAWN_HEIGHT: f32 = 5.0;

// === Configuration ===

/// Run length and pacing. Read whenever a run starts.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct WaveRules {
    pub total_waves: u32,
    pub countdown_ticks: u32,
}

impl Default for WaveRules {
    fn default() -> Self {
        Self {
            total_waves: TOTAL_WAVES,
            countdown_ticks: COUNTDOWN_TICKS,
        }
    }
}

// === Pure Functions ===

/// How many of each thing a wave spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveComposition {
    pub goblins: u32,
    pub goblin_kings: u32,
    pub dragons: u32,
    pub dragon_kings: u32,
    pub ammo_pickups: u32,
}

impl WaveComposition {
    #[must_use]
    pub const fn enemy_total(&self) -> u32 {
        self.goblins + self.goblin_kings + self.dragons + self.dragon_kings
    }
}

#[must_use]
pub const fn wave_composition(wave: u32) -> WaveComposition {
    WaveComposition {
        goblins: 5 + 2 * wave,
        goblin_kings: wave / 2 + 1,
        dragons: if wave >= FIRST_DRAGON_WAVE { wave / 3 + 1 } else { 0 },
        dragon_kings: if wave >= FIRST_DRAGON_KING_WAVE { 1 } else { 0 },
        ammo_pickups: AMMO_PICKUPS_PER_WAVE,
    }
}

/// Stat increases applied to enemies spawned on a given wave.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WaveBonus {
    pub health: f32,
    pub damage: f32,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn wave_bonus(kind: EnemyKind, wave: u32) -> WaveBonus {
    let health_per_wave = match kind {
        EnemyKind::Goblin => 10,
        EnemyKind::GoblinKing => 15,
        EnemyKind::Dragon => 20,
        EnemyKind::DragonKing => 25,
    };
    WaveBonus {
        health: (health_per_wave * wave) as f32,
        damage: (wave / 2) as f32,
    }
}

// === Resources ===

/// Ticks down the pause between waves.
#[derive(Debug, Clone, Reflect)]
pub struct WaveCountdown {
    pub timer: Timer,
    pub remaining: u32,
}

impl WaveCountdown {
    #[must_use]
    pub fn new(ticks: u32) -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            remaining: ticks,
        }
    }
}

#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct WaveDirector {
    /// 1-based. Never exceeds `total_waves`.
    pub current_wave: u32,
    pub total_waves: u32,
    pub countdown_ticks: u32,
    /// Set while the current wave's enemies are alive and unbeaten.
    pub active: bool,
    /// Pending next wave. Replaced wholesale on restart, which cancels it.
    pub countdown: Option<WaveCountdown>,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(WaveRules::default())
    }
}

impl WaveDirector {
    #[must_use]
    pub const fn new(rules: WaveRules) -> Self {
        Self {
            current_wave: 1,
            total_waves: rules.total_waves,
            countdown_ticks: rules.countdown_ticks,
            active: false,
            countdown: None,
        }
    }

    #[must_use]
    pub const fn is_final_wave(&self) -> bool {
        self.current_wave >= self.total_waves
    }
}

// === Spawning ===

/// Spawns `count` enemies of one kind with the bonuses of `wave`.
fn spawn_kind(
    commands: &mut Commands,
    kind: EnemyKind,
    count: u32,
    wave: u32,
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        let (xz, height) = if kind == EnemyKind::DragonKing {
            (DRAGON_KING_SPAWN, DRAGON_SPAWN_HEIGHT)
        } else {
            let xz = random_spawn_point(rng);
            let height = if kind.is_flying() {
                DRAGON_SPAWN_HEIGHT
            } else {
                terrain_height(xz.x, xz.y)
            };
            (xz, height)
        };
        let phase: f32 = rng.random_range(0.0..TAU);
        commands.spawn(enemy_bundle(
            kind,
            Vec3::new(xz.x, height, xz.y),
            wave_bonus(kind, wave),
            phase,
        ));
    }
}

/// Spawns the director's current wave and marks it active.
fn spawn_wave(commands: &mut Commands, director: &mut WaveDirector, rng: &mut impl Rng) {
    let wave = director.current_wave;
    let composition = wave_composition(wave);

    for (kind, count) in [
        (EnemyKind::Goblin, composition.goblins),
        (EnemyKind::GoblinKing, composition.goblin_kings),
        (EnemyKind::Dragon, composition.dragons),
        (EnemyKind::DragonKing, composition.dragon_kings),
    ] {
        spawn_kind(commands, kind, count, wave, rng);
    }

    for _ in 0..composition.ammo_pickups {
        let xz = random_spawn_point(rng);
        let phase: f32 = rng.random_range(0.0..TAU);
        commands.spawn(ammo_pickup(xz, phase));
    }

    director.active = true;
    info!(
        "Wave {wave}/{} begins: {} enemies",
        director.total_waves,
        composition.enemy_total()
    );
}

// === Systems ===

/// Resets the director and spawns wave one. Any countdown from a previous run is dropped.
fn start_run(
    mut commands: Commands,
    rules: Res<WaveRules>,
    mut director: ResMut<WaveDirector>,
    mut rng: ResMut<GameRng>,
) {
    *director = WaveDirector::new(*rules);
    spawn_wave(&mut commands, &mut director, &mut rng.0);
}

/// Runs after every kill. Closes the wave when nothing is left alive.
fn check_wave_cleared(
    _killed: On<EnemyKilled>,
    enemies: Query<&Health, With<Enemy>>,
    mut director: ResMut<WaveDirector>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if !director.active || enemies.iter().any(Health::is_alive) {
        return;
    }
    director.active = false;

    if director.is_final_wave() {
        info!("Final wave cleared, victory");
        next_menu.set(Menu::Victory);
        return;
    }

    info!(
        "Wave {} complete, next wave in {}",
        director.current_wave, director.countdown_ticks
    );
    director.current_wave += 1;
    director.countdown = Some(WaveCountdown::new(director.countdown_ticks));
}

fn tick_wave_countdown(
    time: Res<Time>,
    mut commands: Commands,
    mut director: ResMut<WaveDirector>,
    mut rng: ResMut<GameRng>,
    leftovers: Query<Entity, Or<(With<Enemy>, With<AmmoPickup>)>>,
) {
    let Some(countdown) = director.countdown.as_mut() else {
        return;
    };
    countdown.timer.tick(time.delta());
    countdown.remaining = countdown
        .remaining
        .saturating_sub(countdown.timer.times_finished_this_tick());
    if countdown.remaining > 0 {
        return;
    }

    director.countdown = None;
    for entity in &leftovers {
        commands.entity(entity).despawn();
    }
    spawn_wave(&mut commands, &mut director, &mut rng.0);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<WaveRules>()
        .register_type::<WaveDirector>();
    app.init_resource::<WaveRules>();
    app.init_resource::<WaveDirector>();

    app.add_systems(OnEnter(GameState::InGame), start_run);
    app.add_observer(check_wave_cleared);
    app.add_systems(
        FixedUpdate,
        tick_wave_countdown
            .in_set(SimSet::Waves)
            .run_if(gameplay_running),
    );
}
