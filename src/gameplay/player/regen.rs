//! Passive stamina and ammo regeneration.

use bevy::prelude::*;

use super::{AMMO_REGEN_AMOUNT, Ammo, AmmoRegen, Player, STAMINA_REGEN, Stamina};
use crate::gameplay_running;
use crate::simulation::SimSet;

fn regenerate_stamina(time: Res<Time>, mut player: Query<&mut Stamina, With<Player>>) {
    for mut stamina in &mut player {
        if !stamina.draining && stamina.current < stamina.max {
            stamina.regenerate(STAMINA_REGEN * time.delta_secs());
        }
    }
}

fn regenerate_ammo(time: Res<Time>, mut player: Query<(&mut Ammo, &mut AmmoRegen), With<Player>>) {
    for (mut ammo, mut regen) in &mut player {
        if regen.tick(time.delta_secs()) {
            ammo.add(AMMO_REGEN_AMOUNT);
            debug!("Ammo regenerated to {}", ammo.current);
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (regenerate_stamina, regenerate_ammo)
            .in_set(SimSet::Player)
            .after(super::movement::move_player)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::{create_fixed_test_app, run_fixed_steps, spawn_test_player};
    use pretty_assertions::assert_eq;

    fn create_regen_test_app() -> (App, Entity) {
        let mut app = create_fixed_test_app();
        app.add_systems(FixedUpdate, (regenerate_stamina, regenerate_ammo));
        let player = spawn_test_player(app.world_mut(), Vec3::ZERO);
        (app, player)
    }

    #[test]
    fn stamina_regenerates_when_not_sprinting() {
        let (mut app, player) = create_regen_test_app();
        if let Some(mut stamina) = app.world_mut().get_mut::<Stamina>(player) {
            stamina.current = 50.0;
        }

        run_fixed_steps(&mut app, 60);

        let stamina = app.world().get::<Stamina>(player).map_or(0.0, |s| s.current);
        assert!((stamina - 55.0).abs() < 0.01, "stamina was {stamina}");
    }

    #[test]
    fn stamina_does_not_regenerate_while_draining() {
        let (mut app, player) = create_regen_test_app();
        if let Some(mut stamina) = app.world_mut().get_mut::<Stamina>(player) {
            stamina.current = 50.0;
            stamina.draining = true;
        }

        run_fixed_steps(&mut app, 30);

        assert_eq!(app.world().get::<Stamina>(player).map(|s| s.current), Some(50.0));
    }

    #[test]
    fn stamina_caps_at_max() {
        let (mut app, player) = create_regen_test_app();
        if let Some(mut stamina) = app.world_mut().get_mut::<Stamina>(player) {
            stamina.current = 99.99;
        }

        run_fixed_steps(&mut app, 60);

        assert_eq!(app.world().get::<Stamina>(player).map(|s| s.current), Some(100.0));
    }

    #[test]
    fn ammo_refills_only_at_interval() {
        let (mut app, player) = create_regen_test_app();
        if let Some(mut ammo) = app.world_mut().get_mut::<Ammo>(player) {
            ammo.current = 10;
        }
        if let Some(mut regen) = app.world_mut().get_mut::<AmmoRegen>(player) {
            regen.elapsed = 59.9;
        }

        run_fixed_steps(&mut app, 3);
        assert_eq!(app.world().get::<Ammo>(player).map(|a| a.current), Some(10));

        run_fixed_steps(&mut app, 5);
        assert_eq!(
            app.world().get::<Ammo>(player).map(|a| a.current),
            Some(10 + AMMO_REGEN_AMOUNT)
        );
        let elapsed = app.world().get::<AmmoRegen>(player).map_or(1.0, |r| r.elapsed);
        assert!(elapsed < 0.1);
    }

    #[test]
    fn ammo_refill_is_clamped_to_max() {
        let (mut app, player) = create_regen_test_app();
        if let Some(mut ammo) = app.world_mut().get_mut::<Ammo>(player) {
            ammo.current = 58;
        }
        if let Some(mut regen) = app.world_mut().get_mut::<AmmoRegen>(player) {
            regen.elapsed = 59.99;
        }

        run_fixed_steps(&mut app, 2);

        assert_eq!(app.world().get::<Ammo>(player).map(|a| a.current), Some(60));
    }
}
