//! Perception: kill/hunt лучи от призрака к target.

use bevy::prelude::*;

use crate::ai::{
    Ghost, GhostConfig, PatrolState, PauseTimers, Perception, SceneTransitionRequested,
};
use crate::spatial::{ColliderWorld, SpatialQuery};

/// Два луча от призрака к target, у каждого своя дальность.
///
/// Kill проверяется первым и исключает hunt в том же тике.
/// Луч засчитывается, только если его первый hit: сам target
/// (стена между призраком и target перекрывает обзор).
pub fn perceive(
    agent_position: Vec3,
    target: Entity,
    target_position: Vec3,
    config: &GhostConfig,
    spatial: &impl SpatialQuery,
) -> Perception {
    // Стоим в той же точке, что и target: направления нет
    let Ok(direction) = Dir3::new(target_position - agent_position) else {
        return Perception::Unaware;
    };

    let kill_hit = spatial.ray_cast(
        agent_position,
        direction,
        config.kill_range,
        config.layers_to_hit,
    );
    if kill_hit.is_some_and(|hit| hit.entity == target) {
        return Perception::Killed;
    }

    let hunt_hit = spatial.ray_cast(
        agent_position,
        direction,
        config.hunt_range,
        config.layers_to_hit,
    );
    match hunt_hit {
        Some(hit) if hit.entity == target => Perception::Hunted { point: hit.point },
        _ => Perception::Unaware,
    }
}

/// Система: perception override (каждый LogicTick, до patrol)
///
/// Killed → SceneTransitionRequested.
/// Hunted → destination перезаписывается по `HuntPolicy` независимо от состояния.
pub fn ghost_perception(
    mut ghosts: Query<(Entity, &Ghost, &Transform, &GhostConfig, &mut PatrolState)>,
    targets: Query<&Transform>,
    spatial: Res<ColliderWorld>,
    mut timers: ResMut<PauseTimers>,
    mut scene_requests: EventWriter<SceneTransitionRequested>,
) {
    for (entity, ghost, transform, config, mut state) in ghosts.iter_mut() {
        let Ok(target_transform) = targets.get(ghost.target) else {
            crate::log_warning(&format!(
                "Ghost {:?}: tracked target {:?} не найден, perception пропущен",
                entity, ghost.target
            ));
            continue;
        };

        let perception = perceive(
            transform.translation,
            ghost.target,
            target_transform.translation,
            config,
            &*spatial,
        );

        match perception {
            Perception::Unaware => {}
            Perception::Killed => {
                crate::log_info(&format!(
                    "💀 Ghost {:?} caught {:?} → scene '{}'",
                    entity, ghost.target, config.kill_scene
                ));
                scene_requests.write(SceneTransitionRequested {
                    ghost: entity,
                    scene: config.kill_scene.clone(),
                });
            }
            Perception::Hunted { point } => {
                let previous = *state;
                if state.apply_hunt(point, config.hunt_policy) {
                    timers.cancel(entity);
                }
                if *state != previous {
                    crate::log(&format!(
                        "🔍 Ghost {:?} hunting {:?}: destination → {:?}",
                        entity, ghost.target, point
                    ));
                }
            }
        }
    }
}
