//! Death detection: despawns enemies at zero health and counts the kill.

use bevy::prelude::*;

use crate::gameplay::Health;
use crate::gameplay::enemies::{Enemy, EnemyKind};
use crate::screens::GameState;
use crate::simulation::SimSet;
use crate::gameplay_running;

/// `SystemSet` for death detection. Other systems can order against this
/// (e.g., `.before(DeathCheck)`) instead of referencing the function directly.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeathCheck;

/// Enemies defeated in the current run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct KillCount(pub u32);

/// Triggered after a dead enemy has been queued for despawn.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub kind: EnemyKind,
}

fn reset_kill_count(mut kills: ResMut<KillCount>) {
    *kills = KillCount::default();
}

/// Despawns every enemy at zero health. Each one is counted exactly once,
/// since the entity is gone by the next step.
fn check_enemy_death(
    mut commands: Commands,
    mut kills: ResMut<KillCount>,
    enemies: Query<(Entity, &Enemy, &Health)>,
) {
    for (entity, enemy, health) in &enemies {
        if health.is_alive() {
            continue;
        }
        commands.entity(entity).despawn();
        kills.0 += 1;
        info!("{} defeated ({} total)", enemy.kind.display_name(), kills.0);
        commands.trigger(EnemyKilled {
            entity,
            kind: enemy.kind,
        });
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<KillCount>();
    app.init_resource::<KillCount>();

    app.add_systems(OnEnter(GameState::InGame), reset_kill_count);
    app.add_systems(
        FixedUpdate,
        check_enemy_death
            .in_set(DeathCheck)
            .in_set(SimSet::Death)
            .run_if(gameplay_running),
    );
}
