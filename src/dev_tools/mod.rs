//! Development shortcuts, only compiled with the `dev` feature.

use bevy::prelude::*;

use crate::gameplay::Health;
use crate::gameplay::enemies::Enemy;
use crate::{GameSet, gameplay_running};

/// Drops every living enemy to zero health. The next fixed step despawns
/// them through the normal death path, so the wave director sees the clear.
fn debug_clear_wave(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut enemies: Query<&mut Health, With<Enemy>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    let mut cleared = 0;
    for mut health in &mut enemies {
        if health.is_alive() {
            health.current = 0.0;
            cleared += 1;
        }
    }
    info!("Dev: cleared {cleared} enemies");
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        debug_clear_wave
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
}
