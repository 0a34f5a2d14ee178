//! Pure hit-scan resolution against axis-aligned hurtboxes.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

/// A hit counts as a headshot if it lands within this distance below the head height.
pub const HEAD_ZONE_TOLERANCE: f32 = 0.3;

/// Body volume and head height of a shootable entity, relative to its origin.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub center_offset: Vec3,
    pub half_extents: Vec3,
    pub head_height: f32,
}

impl Hurtbox {
    #[must_use]
    pub fn aabb(&self, origin: Vec3) -> Aabb3d {
        Aabb3d::new(origin + self.center_offset, self.half_extents)
    }

    #[must_use]
    pub fn is_headshot(&self, origin: Vec3, point: Vec3) -> bool {
        point.y >= origin.y + self.head_height - HEAD_ZONE_TOLERANCE
    }
}

/// The closest target struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitscanHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
    pub headshot: bool,
}

/// Casts a ray of length `range` and returns the nearest target it enters.
///
/// When two targets are hit at exactly the same distance the one yielded
/// first wins.
pub fn resolve_hitscan<'a>(
    origin: Vec3,
    direction: Dir3,
    range: f32,
    targets: impl IntoIterator<Item = (Entity, Vec3, &'a Hurtbox)>,
) -> Option<HitscanHit> {
    let ray = RayCast3d::new(origin, direction, range);
    let mut closest: Option<HitscanHit> = None;

    for (entity, position, hurtbox) in targets {
        let Some(distance) = ray.aabb_intersection_at(&hurtbox.aabb(position)) else {
            continue;
        };
        if closest.is_some_and(|best| distance >= best.distance) {
            continue;
        }
        let point = origin + direction * distance;
        closest = Some(HitscanHit {
            entity,
            distance,
            point,
            headshot: hurtbox.is_headshot(position, point),
        });
    }

    closest
}
