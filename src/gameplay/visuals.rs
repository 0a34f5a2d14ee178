//! Render-only presentation: scenery, the first-person camera, meshes for
//! simulated entities, fire particles and shot tracers.
//!
//! Nothing in here writes simulation state. The binary adds this plugin on
//! top of [`crate::plugin`]; tests never do.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::gameplay::arena::{ARENA_HALF_EXTENT, terrain_height};
use crate::gameplay::combat::Hurtbox;
use crate::gameplay::effects::{FIRE_BREATH_PARTICLES, FireBreath, ShotTracer};
use crate::gameplay::enemies::{Enemy, EnemyKind};
use crate::gameplay::input::{PointerCapture, apply_pointer_look};
use crate::gameplay::pickups::AmmoPickup;
use crate::gameplay::player::{EYE_HEIGHT, LookAngles, Player};
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

// === Constants ===

const TREE_COUNT: usize = 60;

/// Fixed so the forest looks the same every launch.
const TREE_SEED: u64 = 0x7265_6573;

/// Trees stay out of the middle of the arena where waves spawn.
const TREE_CLEARING_RADIUS: f32 = 30.0;

const FIRE_PARTICLE_RADIUS: f32 = 0.3;
const FIRE_PARTICLE_JITTER: f32 = 0.5;

// === Components & Resources ===

/// Marker for the first-person world camera.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerCamera;

#[derive(Resource, Debug, Clone)]
pub struct VisualAssets {
    /// Indexed like [`EnemyKind::ALL`].
    pub enemy_meshes: [Handle<Mesh>; 4],
    pub enemy_materials: [Handle<StandardMaterial>; 4],
    pub ammo_mesh: Handle<Mesh>,
    pub ammo_material: Handle<StandardMaterial>,
    pub fire_mesh: Handle<Mesh>,
    pub fire_material: Handle<StandardMaterial>,
}

const fn kind_index(kind: EnemyKind) -> usize {
    match kind {
        EnemyKind::Goblin => 0,
        EnemyKind::GoblinKing => 1,
        EnemyKind::Dragon => 2,
        EnemyKind::DragonKing => 3,
    }
}

const fn kind_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Goblin => palette::GOBLIN,
        EnemyKind::GoblinKing => palette::GOBLIN_KING,
        EnemyKind::Dragon => palette::DRAGON,
        EnemyKind::DragonKing => palette::DRAGON_KING,
    }
}

// === Startup ===

fn setup_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(VisualAssets {
        enemy_meshes: EnemyKind::ALL.map(|kind| {
            let hurtbox = kind.hurtbox();
            if kind.is_flying() {
                meshes.add(Cuboid::from_size(hurtbox.half_extents * 2.0))
            } else {
                let radius = hurtbox.half_extents.x;
                let length = (hurtbox.half_extents.y - radius).max(0.0) * 2.0;
                meshes.add(Capsule3d::new(radius, length))
            }
        }),
        enemy_materials: EnemyKind::ALL.map(|kind| materials.add(kind_color(kind))),
        ammo_mesh: meshes.add(Cuboid::new(0.6, 0.4, 0.4)),
        ammo_material: materials.add(StandardMaterial {
            base_color: palette::AMMO_BOX,
            emissive: LinearRgba::from(palette::AMMO_BOX) * 0.3,
            ..default()
        }),
        fire_mesh: meshes.add(Sphere::new(FIRE_PARTICLE_RADIUS)),
        fire_material: materials.add(StandardMaterial {
            base_color: palette::FIRE,
            emissive: LinearRgba::from(palette::FIRE) * 4.0,
            unlit: true,
            ..default()
        }),
    });
}

fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Player Camera"),
        PlayerCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, EYE_HEIGHT + 1.0, 0.0),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(palette::GROUND)),
        Transform::from_xyz(0.0, terrain_height(0.0, 0.0), 0.0),
    ));

    let trunk_mesh = meshes.add(Cylinder::new(0.3, 3.0));
    let leaves_mesh = meshes.add(Cone {
        radius: 2.0,
        height: 4.0,
    });
    let trunk_material = materials.add(palette::TREE_TRUNK);
    let leaves_material = materials.add(palette::TREE_LEAVES);

    let mut rng = StdRng::seed_from_u64(TREE_SEED);
    let mut placed = 0;
    while placed < TREE_COUNT {
        let xz = Vec2::new(
            rng.random_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
            rng.random_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
        );
        if xz.length() < TREE_CLEARING_RADIUS {
            continue;
        }
        placed += 1;
        commands.spawn((
            Name::new("Tree"),
            Transform::from_xyz(xz.x, terrain_height(xz.x, xz.y), xz.y),
            Visibility::default(),
            children![
                (
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 1.5, 0.0),
                ),
                (
                    Mesh3d(leaves_mesh.clone()),
                    MeshMaterial3d(leaves_material.clone()),
                    Transform::from_xyz(0.0, 5.0, 0.0),
                ),
            ],
        ));
    }
}

// === Systems ===

fn attach_enemy_meshes(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    enemies: Query<(Entity, &Enemy, &Hurtbox), Added<Enemy>>,
) {
    for (entity, enemy, hurtbox) in &enemies {
        let index = kind_index(enemy.kind);
        commands.entity(entity).insert(Visibility::default()).with_child((
            Mesh3d(assets.enemy_meshes[index].clone()),
            MeshMaterial3d(assets.enemy_materials[index].clone()),
            Transform::from_translation(hurtbox.center_offset),
        ));
    }
}

fn attach_pickup_meshes(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    pickups: Query<Entity, Added<AmmoPickup>>,
) {
    for entity in &pickups {
        commands.entity(entity).insert((
            Mesh3d(assets.ammo_mesh.clone()),
            MeshMaterial3d(assets.ammo_material.clone()),
        ));
    }
}

/// Scatters glowing particles along each new breath. They go away with the breath.
#[allow(clippy::cast_precision_loss)]
fn spawn_fire_particles(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    breaths: Query<(Entity, &FireBreath), Added<FireBreath>>,
) {
    let mut rng = rand::rng();
    for (entity, breath) in &breaths {
        let span = breath.target - breath.origin;
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_children(|parent| {
                for i in 0..FIRE_BREATH_PARTICLES {
                    let along = i as f32 / FIRE_BREATH_PARTICLES as f32;
                    let jitter = Vec3::new(
                        rng.random_range(-FIRE_PARTICLE_JITTER..FIRE_PARTICLE_JITTER),
                        rng.random_range(-FIRE_PARTICLE_JITTER..FIRE_PARTICLE_JITTER),
                        rng.random_range(-FIRE_PARTICLE_JITTER..FIRE_PARTICLE_JITTER),
                    );
                    parent.spawn((
                        Mesh3d(assets.fire_mesh.clone()),
                        MeshMaterial3d(assets.fire_material.clone()),
                        Transform::from_translation(span * along + jitter),
                    ));
                }
            });
    }
}

fn draw_shot_tracers(mut gizmos: Gizmos, tracers: Query<&ShotTracer>) {
    for tracer in &tracers {
        gizmos.line(tracer.from, tracer.to, palette::TRACER);
    }
}

/// Puts the camera at the player's eyes, looking where the player aims.
fn follow_player(
    player: Query<(&Transform, &LookAngles), With<Player>>,
    mut camera: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let Ok((player, look)) = player.single() else {
        return;
    };
    let Ok(mut camera) = camera.single_mut() else {
        return;
    };
    camera.translation = player.translation + Vec3::Y * EYE_HEIGHT;
    camera.rotation = look.rotation();
}

/// Captures the cursor while a run is live and releases it for any overlay.
fn sync_cursor_grab(
    running: Option<Res<State<crate::screens::GameState>>>,
    menu: Option<Res<State<crate::menus::Menu>>>,
    mut capture: ResMut<PointerCapture>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let locked = gameplay_running(running, menu);
    if capture.locked == locked {
        return;
    }
    capture.locked = locked;
    let Ok(mut cursor) = cursor.single_mut() else {
        return;
    };
    cursor.grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    cursor.visible = !locked;
}

// === Plugin ===

pub fn plugin(app: &mut App) {
    app.register_type::<PlayerCamera>();

    app.add_systems(Startup, (setup_visual_assets, spawn_scenery));
    app.add_systems(
        Update,
        (
            attach_enemy_meshes,
            attach_pickup_meshes,
            spawn_fire_particles,
            draw_shot_tracers,
        ),
    );
    app.add_systems(
        Update,
        (
            sync_cursor_grab.in_set(GameSet::Input),
            follow_player
                .in_set(GameSet::Camera)
                .after(apply_pointer_look),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_index_follows_all_order() {
        for (i, kind) in EnemyKind::ALL.into_iter().enumerate() {
            assert_eq!(kind_index(kind), i);
        }
    }
}
