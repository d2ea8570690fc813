//! Field-of-view scoring (sphere sweep + line-of-sight validation).

use bevy::ecs::query::QuerySingleError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Tag;
use crate::schedules::TickClock;
use crate::spatial::{ColliderWorld, LayerMask, SpatialQuery, MASK_DEFAULT_RAYCAST};

/// LOS луч короче дистанции до hit point на эту величину,
/// иначе он упирается в поверхность самого монстра
pub const LINE_OF_SIGHT_EPSILON: f32 = 0.1;

/// Параметры обзора наблюдателя (вешается на камеру игрока)
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[require(Transform)]
#[serde(default)]
pub struct ViewSweep {
    /// Радиус сметающей сферы
    pub radius: f32,
    /// Отступ старта сферы вперёд от наблюдателя
    pub min_distance: f32,
    /// Как далеко идёт сфера от точки старта
    pub max_distance: f32,
    /// Слои, которые видит sweep
    pub layer_mask: LayerMask,
}

impl Default for ViewSweep {
    fn default() -> Self {
        Self {
            radius: 1.0,
            min_distance: 1.0,
            max_distance: 20.0,
            layer_mask: MASK_DEFAULT_RAYCAST,
        }
    }
}

/// Результат одного прохода scorer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewScore {
    pub in_field_of_view: bool,
    pub score: f32,
    /// Кто засчитан (в порядке sweep hits)
    pub visible: Vec<Entity>,
}

/// Shared context: что видит игрок в последнем PhysicsTick
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewerReport {
    pub in_field_of_view: bool,
    pub score: f32,
    pub visible_count: usize,
    /// PhysicsTick, в котором отчёт записан
    pub tick: u64,
}

/// Подсчёт очков за монстров в поле зрения.
///
/// 1. Сфера стартует в `origin + forward * min_distance`, идёт на `max_distance`.
/// 2. Из hits остаются только `Monster` / `SpecialMonster`.
/// 3. Для каждого: LOS луч из `origin` к hit point длиной `distance - 0.1`;
///    если он ничего не задел, монстр засчитан (1.0 / 5.0).
///
/// Двойная проверка не даёт радиусу сферы засчитать монстра за тонкой стеной.
pub fn compute_view_score(
    origin: Vec3,
    forward: Dir3,
    sweep: &ViewSweep,
    spatial: &impl SpatialQuery,
    tag_of: impl Fn(Entity) -> Option<Tag>,
) -> ViewScore {
    let sweep_origin = origin + *forward * sweep.min_distance;
    let hits = spatial.sphere_sweep(
        sweep_origin,
        sweep.radius,
        forward,
        sweep.max_distance,
        sweep.layer_mask,
    );

    let mut result = ViewScore::default();

    for hit in hits {
        let Some(weight) = tag_of(hit.entity).and_then(|tag| tag.view_weight()) else {
            continue;
        };

        let to_hit = hit.point - origin;
        let los_length = to_hit.length() - LINE_OF_SIGHT_EPSILON;

        // Hit вплотную к наблюдателю: проверять нечего.
        // Луч, упёршийся в самого кандидата, препятствием не считается.
        let obstructed = match Dir3::new(to_hit) {
            Ok(direction) if los_length > 0.0 => spatial
                .ray_cast(origin, direction, los_length, MASK_DEFAULT_RAYCAST)
                .is_some_and(|los| los.entity != hit.entity),
            _ => false,
        };

        if !obstructed {
            result.in_field_of_view = true;
            result.score += weight;
            result.visible.push(hit.entity);
        }
    }

    result
}

/// Система: пересчитать ViewerReport (PhysicsTick, единственный writer)
///
/// Нет наблюдателя → отчёт обнуляется.
pub fn update_viewer_report(
    observers: Query<(&Transform, &ViewSweep)>,
    tags: Query<&Tag>,
    spatial: Res<ColliderWorld>,
    clock: Res<TickClock>,
    mut report: ResMut<ViewerReport>,
) {
    let score = match observers.single() {
        Ok((transform, sweep)) => compute_view_score(
            transform.translation,
            transform.forward(),
            sweep,
            &*spatial,
            |entity| tags.get(entity).ok().copied(),
        ),
        Err(QuerySingleError::NoEntities(_)) => ViewScore::default(),
        Err(QuerySingleError::MultipleEntities(_)) => {
            crate::log_warning(&format!(
                "Vision: {} наблюдателей с ViewSweep, ожидается один; отчёт обнулён",
                observers.iter().count()
            ));
            ViewScore::default()
        }
    };

    *report = ViewerReport {
        in_field_of_view: score.in_field_of_view,
        score: score.score,
        visible_count: score.visible.len(),
        tick: clock.physics_ticks,
    };
}
