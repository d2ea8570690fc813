//! Встроенный spatial backend: коллайдеры из ECS
//!
//! ColliderWorld: snapshot всех `Collider` на начало тика.
//! Пересобирается системой `sync_collider_world` первой в каждом schedule,
//! поэтому все запросы внутри тика видят одну и ту же сцену.
//!
//! Ограничения (headless приближение):
//! - Cuboid всегда axis-aligned (rotation игнорируется)
//! - Sphere sweep против cuboid = луч против AABB, расширенного на radius
//!   (углы не скругляются)

use bevy::math::bounding::{Aabb3d, BoundingSphere, RayCast3d};
use bevy::prelude::*;

use super::{Hit, LayerMask, SpatialQuery, LAYER_DEFAULT};

/// Форма коллайдера (local space, масштабируется Transform.scale)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(CollisionLayers, Transform)]
pub enum Collider {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn cuboid(half_x: f32, half_y: f32, half_z: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::new(half_x, half_y, half_z),
        }
    }
}

/// На каком слое лежит коллайдер
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CollisionLayers {
    pub membership: LayerMask,
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self {
            membership: LAYER_DEFAULT,
        }
    }
}

impl CollisionLayers {
    pub fn new(membership: LayerMask) -> Self {
        Self { membership }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Volume {
    Sphere { center: Vec3, radius: f32 },
    Cuboid { min: Vec3, max: Vec3 },
}

impl Volume {
    fn from_collider(collider: &Collider, transform: &Transform) -> Self {
        let scale = transform.scale.abs();
        match *collider {
            Collider::Sphere { radius } => Volume::Sphere {
                center: transform.translation,
                radius: radius.abs() * scale.max_element(),
            },
            Collider::Cuboid { half_extents } => {
                let half = half_extents.abs() * scale;
                Volume::Cuboid {
                    min: transform.translation - half,
                    max: transform.translation + half,
                }
            }
        }
    }

    fn inflated(&self, amount: f32) -> Self {
        match *self {
            Volume::Sphere { center, radius } => Volume::Sphere {
                center,
                radius: radius + amount,
            },
            Volume::Cuboid { min, max } => Volume::Cuboid {
                min: min - Vec3::splat(amount),
                max: max + Vec3::splat(amount),
            },
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        match *self {
            Volume::Sphere { center, radius } => point.distance_squared(center) < radius * radius,
            Volume::Cuboid { min, max } => {
                point.cmpgt(min).all() && point.cmplt(max).all()
            }
        }
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        match *self {
            Volume::Sphere { center, radius } => center + (point - center).clamp_length_max(radius),
            Volume::Cuboid { min, max } => point.clamp(min, max),
        }
    }

    /// Точка на поверхности, ближайшая к `point` (и изнутри объёма тоже)
    fn surface_point(&self, point: Vec3) -> Vec3 {
        if !self.contains(point) {
            return self.closest_point(point);
        }
        match *self {
            Volume::Sphere { center, radius } => {
                center + (point - center).normalize_or(Vec3::Y) * radius
            }
            Volume::Cuboid { min, max } => {
                // Выталкиваем на ближайшую грань
                let to_min = point - min;
                let to_max = max - point;
                let mut best = (to_min.x, 0, min.x);
                for (gap, axis, face) in [
                    (to_max.x, 0, max.x),
                    (to_min.y, 1, min.y),
                    (to_max.y, 1, max.y),
                    (to_min.z, 2, min.z),
                    (to_max.z, 2, max.z),
                ] {
                    if gap < best.0 {
                        best = (gap, axis, face);
                    }
                }
                let mut surface = point;
                surface[best.1] = best.2;
                surface
            }
        }
    }

    /// Time of impact луча (дистанция вдоль direction)
    fn ray_toi(&self, ray: &RayCast3d) -> Option<f32> {
        match *self {
            Volume::Sphere { center, radius } => {
                ray.sphere_intersection_at(&BoundingSphere::new(center, radius))
            }
            Volume::Cuboid { min, max } => {
                let aabb = Aabb3d::new((min + max) * 0.5, (max - min) * 0.5);
                ray.aabb_intersection_at(&aabb)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColliderEntry {
    entity: Entity,
    volume: Volume,
    layers: LayerMask,
}

/// Snapshot коллайдеров сцены (resource)
#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderWorld {
    entries: Vec<ColliderEntry>,
}

impl ColliderWorld {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Добавить коллайдер (порядок entries = порядок по Entity для детерминизма)
    pub fn insert(
        &mut self,
        entity: Entity,
        collider: &Collider,
        transform: &Transform,
        layers: LayerMask,
    ) {
        let entry = ColliderEntry {
            entity,
            volume: Volume::from_collider(collider, transform),
            layers,
        };
        let index = self
            .entries
            .partition_point(|existing| existing.entity < entity);
        self.entries.insert(index, entry);
    }

    pub fn with_sphere(
        mut self,
        entity: Entity,
        center: Vec3,
        radius: f32,
        layers: LayerMask,
    ) -> Self {
        self.insert(
            entity,
            &Collider::sphere(radius),
            &Transform::from_translation(center),
            layers,
        );
        self
    }

    pub fn with_cuboid(
        mut self,
        entity: Entity,
        center: Vec3,
        half_extents: Vec3,
        layers: LayerMask,
    ) -> Self {
        self.insert(
            entity,
            &Collider::Cuboid { half_extents },
            &Transform::from_translation(center),
            layers,
        );
        self
    }

    fn candidates(&self, mask: LayerMask) -> impl Iterator<Item = &ColliderEntry> {
        self.entries.iter().filter(move |entry| entry.layers & mask != 0)
    }
}

impl SpatialQuery for ColliderWorld {
    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        if !(max_distance > 0.0) {
            return None;
        }

        let ray = RayCast3d::new(origin, direction, max_distance);
        let mut nearest: Option<Hit> = None;

        for entry in self.candidates(mask) {
            // Луч, стартующий внутри коллайдера, его не видит
            if entry.volume.contains(origin) {
                continue;
            }

            let Some(distance) = entry.volume.ray_toi(&ray) else {
                continue;
            };

            let closer = nearest.is_none_or(|best| distance < best.distance);
            if closer {
                nearest = Some(Hit {
                    entity: entry.entity,
                    point: origin + *direction * distance,
                    distance,
                });
            }
        }

        nearest
    }

    fn sphere_sweep(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<Hit> {
        let radius = radius.max(0.0);
        let max_distance = max_distance.max(0.0);
        let ray = RayCast3d::new(origin, direction, max_distance);

        let mut hits: Vec<Hit> = self
            .candidates(mask)
            .filter_map(|entry| {
                let swept = entry.volume.inflated(radius);

                // Перекрытие на старте: distance = 0, точка на поверхности
                // коллайдера, ближайшая к origin
                if swept.contains(origin) {
                    return Some(Hit {
                        entity: entry.entity,
                        point: entry.volume.surface_point(origin),
                        distance: 0.0,
                    });
                }

                let distance = swept.ray_toi(&ray)?;
                let sphere_center = origin + *direction * distance;
                Some(Hit {
                    entity: entry.entity,
                    point: entry.volume.closest_point(sphere_center),
                    distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Система: пересобрать ColliderWorld из ECS (первая в каждом schedule)
pub fn sync_collider_world(
    mut world: ResMut<ColliderWorld>,
    colliders: Query<(Entity, &Transform, &Collider, &CollisionLayers)>,
) {
    world.clear();
    for (entity, transform, collider, layers) in colliders.iter() {
        world.insert(entity, collider, transform, layers.membership);
    }
}
