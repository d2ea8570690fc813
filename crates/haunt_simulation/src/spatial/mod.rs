//! Spatial queries: capability interface для геометрии сцены
//!
//! Симуляция не реализует physics engine: ray cast и sphere sweep приходят
//! через trait `SpatialQuery`. Хост с реальным движком реализует trait
//! поверх своего physics API; встроенный backend `ColliderWorld` собирается
//! из ECS коллайдеров (headless режим, тесты).
//!
//! ## Layers (битовая маска, 32 слоя):
//! - Layer 0 (0b1): Default
//! - Layer 2 (0b100): IgnoreRaycast
//! - Layer 3 (0b1000): Actors (ghosts, player)
//! - Layer 4 (0b10000): Environment (walls, props)

use bevy::prelude::*;

pub mod colliders;

#[cfg(test)]
mod colliders_tests;

pub use colliders::{sync_collider_world, Collider, ColliderWorld, CollisionLayers};

pub type LayerMask = u32;

/// Layer 0: всё без явного слоя
pub const LAYER_DEFAULT: LayerMask = 0b1;

/// Layer 2: не участвует в ray cast по умолчанию
pub const LAYER_IGNORE_RAYCAST: LayerMask = 0b100;

/// Layer 3: Actors (ghost, player, monsters)
pub const LAYER_ACTORS: LayerMask = 0b1000;

/// Layer 4: Environment (стены, двери, препятствия)
pub const LAYER_ENVIRONMENT: LayerMask = 0b1_0000;

/// Mask: все слои
pub const MASK_ALL: LayerMask = u32::MAX;

/// Mask: ray cast без явной маски (всё кроме IgnoreRaycast)
pub const MASK_DEFAULT_RAYCAST: LayerMask = !LAYER_IGNORE_RAYCAST;

/// Результат ray cast / sphere sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Entity коллайдера
    pub entity: Entity,
    /// Точка контакта (world coordinates)
    pub point: Vec3,
    /// Дистанция вдоль направления запроса
    pub distance: f32,
}

/// Geometry capability (physics/navigation collaborator)
pub trait SpatialQuery {
    /// Ближайший hit вдоль луча в пределах `max_distance`, только слои из `mask`.
    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit>;

    /// Все коллайдеры, которые задевает сфера `radius`, пройдя от `origin`
    /// вдоль `direction` на `max_distance`. Отсортировано по дистанции.
    fn sphere_sweep(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<Hit>;
}

/// SystemSet: пересборка ColliderWorld (все запросы тика идут после него)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpatialSync;

/// Spatial Plugin
///
/// ColliderWorld пересобирается в начале обоих schedule.
pub struct SpatialPlugin;

impl Plugin for SpatialPlugin {
    fn build(&self, app: &mut App) {
        use crate::schedules::{LogicTick, PhysicsTick};

        app.init_resource::<ColliderWorld>()
            .add_systems(LogicTick, sync_collider_world.in_set(SpatialSync))
            .add_systems(PhysicsTick, sync_collider_world.in_set(SpatialSync));
    }
}

/// Получить название слоя для debug логов
pub fn layer_name(layer_bits: LayerMask) -> &'static str {
    match layer_bits {
        LAYER_DEFAULT => "Default",
        LAYER_IGNORE_RAYCAST => "IgnoreRaycast",
        LAYER_ACTORS => "Actors",
        LAYER_ENVIRONMENT => "Environment",
        _ => "Unknown",
    }
}
