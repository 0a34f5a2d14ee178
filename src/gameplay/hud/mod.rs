//! In-game HUD: a per-step snapshot of the simulation and the text that shows it.
//!
//! The simulation writes [`SimSnapshot`] at the end of every fixed step. The
//! HUD text only ever reads the snapshot, never the live components.

mod layout;

use bevy::prelude::*;

use crate::gameplay::Health;
use crate::gameplay::combat::KillCount;
use crate::gameplay::enemies::Enemy;
use crate::gameplay::player::{Ammo, Player, Stamina};
use crate::gameplay::waves::WaveDirector;
use crate::simulation::SimSet;
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

pub use layout::{Crosshair, HudField};

/// Ammo below this (but above zero) is shown as running low.
pub const LOW_AMMO_THRESHOLD: u32 = 10;

// === Resources ===

/// Read-only view of one completed simulation step.
#[derive(Resource, Debug, Default, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SimSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub kills: u32,
    pub wave: u32,
    pub total_waves: u32,
    pub enemies_remaining: u32,
    /// Whole seconds until the next wave, while a countdown is running.
    pub countdown: Option<u32>,
}

// === Pure Functions ===

#[must_use]
pub fn ammo_color(ammo: u32) -> Color {
    match ammo {
        0 => palette::AMMO_EMPTY,
        n if n < LOW_AMMO_THRESHOLD => palette::AMMO_LOW,
        _ => palette::GOLD_TEXT,
    }
}

#[must_use]
pub fn status_line(snapshot: &SimSnapshot) -> String {
    match snapshot.countdown {
        Some(seconds) => format!(
            "Wave {} Complete! Next wave in {seconds}...",
            snapshot.wave.saturating_sub(1)
        ),
        None => format!("Enemies: {}", snapshot.enemies_remaining),
    }
}

/// Text for one HUD field.
#[must_use]
pub fn field_text(field: HudField, snapshot: &SimSnapshot) -> String {
    match field {
        HudField::Health => format!("Health: {:.0} / {:.0}", snapshot.health, snapshot.max_health),
        HudField::Stamina => format!(
            "Stamina: {:.0} / {:.0}",
            snapshot.stamina, snapshot.max_stamina
        ),
        HudField::Ammo => format!("Ammo: {} / {}", snapshot.ammo, snapshot.max_ammo),
        HudField::Kills => format!("Kills: {}", snapshot.kills),
        HudField::Wave => format!("Wave {} / {}", snapshot.wave, snapshot.total_waves),
        HudField::Status => status_line(snapshot),
    }
}

// === Systems ===

fn write_snapshot(
    mut snapshot: ResMut<SimSnapshot>,
    player: Query<(&Health, &Stamina, &Ammo), With<Player>>,
    enemies: Query<&Health, (With<Enemy>, Without<Player>)>,
    kills: Res<KillCount>,
    director: Res<WaveDirector>,
) {
    let Ok((health, stamina, ammo)) = player.single() else {
        return;
    };

    #[allow(clippy::cast_possible_truncation)]
    let enemies_remaining = enemies.iter().filter(|h| h.is_alive()).count() as u32;

    snapshot.set_if_neq(SimSnapshot {
        health: health.current,
        max_health: health.max,
        stamina: stamina.current,
        max_stamina: stamina.max,
        ammo: ammo.current,
        max_ammo: ammo.max,
        kills: kills.0,
        wave: director.current_wave,
        total_waves: director.total_waves,
        enemies_remaining,
        countdown: director.countdown.as_ref().map(|c| c.remaining),
    });
}

fn update_hud(
    snapshot: Res<SimSnapshot>,
    mut fields: Query<(&HudField, &mut Text, &mut TextColor)>,
) {
    if !snapshot.is_changed() {
        return;
    }
    for (field, mut text, mut color) in &mut fields {
        **text = field_text(*field, &snapshot);
        if *field == HudField::Ammo {
            color.0 = ammo_color(snapshot.ammo);
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<SimSnapshot>();
    app.init_resource::<SimSnapshot>();

    app.add_plugins(layout::plugin);
    app.add_systems(
        FixedUpdate,
        write_snapshot
            .in_set(SimSet::Snapshot)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        update_hud.in_set(GameSet::Ui).run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> SimSnapshot {
        SimSnapshot {
            health: 72.4,
            max_health: 100.0,
            stamina: 100.0,
            max_stamina: 100.0,
            ammo: 42,
            max_ammo: 60,
            kills: 3,
            wave: 2,
            total_waves: 20,
            enemies_remaining: 11,
            countdown: None,
        }
    }

    #[test]
    fn ammo_color_thresholds() {
        assert_eq!(ammo_color(0), palette::AMMO_EMPTY);
        assert_eq!(ammo_color(9), palette::AMMO_LOW);
        assert_eq!(ammo_color(10), palette::GOLD_TEXT);
    }

    #[test]
    fn status_shows_enemies_during_wave() {
        assert_eq!(status_line(&snapshot()), "Enemies: 11");
    }

    #[test]
    fn status_shows_countdown_between_waves() {
        let between = SimSnapshot {
            wave: 3,
            countdown: Some(2),
            ..snapshot()
        };
        assert_eq!(status_line(&between), "Wave 2 Complete! Next wave in 2...");
    }

    #[test]
    fn field_text_formats() {
        let snapshot = snapshot();
        assert_eq!(field_text(HudField::Health, &snapshot), "Health: 72 / 100");
        assert_eq!(field_text(HudField::Ammo, &snapshot), "Ammo: 42 / 60");
        assert_eq!(field_text(HudField::Wave, &snapshot), "Wave 2 / 20");
        assert_eq!(field_text(HudField::Kills, &snapshot), "Kills: 3");
    }
}
