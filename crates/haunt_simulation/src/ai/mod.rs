//! Ghost AI: patrol → pause → patrol с perception override
//!
//! FSM: NoDestination → Traveling → Paused → NoDestination
//! Perception (kill/hunt лучи) работает независимо от FSM каждый тик.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;
pub mod timers;

// Re-export основных типов
pub use components::*;
pub use events::{drain_scene_requests, SceneTransitionRequested};
pub use systems::{move_towards, patrol_step, perceive, yaw_step, PatrolOutcome};
pub use timers::PauseTimers;

use crate::components::{MapGrid, Tag};
use crate::error::ConfigError;
use crate::schedules::{roll_events, LogicTick};
use crate::spatial::{Collider, CollisionLayers, SpatialSync, LAYER_ACTORS};

/// Радиус коллайдера призрака по умолчанию (метры)
pub const GHOST_COLLIDER_RADIUS: f32 = 0.5;

/// Ghost AI Plugin
///
/// Регистрирует AI системы в LogicTick.
/// Порядок выполнения:
/// 1. poll_pause_timers: сработавшие паузы → resume
/// 2. ghost_perception: kill/hunt лучи, override destination
/// 3. ghost_patrol: sample destination, arrival → pause
/// 4. ghost_steering: движение + yaw
pub struct GhostAiPlugin;

impl Plugin for GhostAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneTransitionRequested>()
            .init_resource::<PauseTimers>();

        app.add_systems(
            LogicTick,
            (
                roll_events::<SceneTransitionRequested>,
                systems::poll_pause_timers,
                systems::ghost_perception,
                systems::ghost_patrol,
                systems::ghost_steering,
            )
                .chain() // Последовательное выполнение для детерминизма
                .after(SpatialSync),
        );
    }
}

/// Спавн призрака с проверкой preconditions (config, MapGrid, target).
///
/// Ошибки конфигурации ловим здесь, а не посреди тика.
pub fn spawn_ghost(
    world: &mut World,
    target: Entity,
    position: Vec3,
    config: GhostConfig,
) -> Result<Entity, ConfigError> {
    config.validate()?;

    let grid = world
        .get_resource::<MapGrid>()
        .ok_or(ConfigError::MissingGrid)?;
    grid.validate()?;

    if world.get_entity(target).is_err() {
        return Err(ConfigError::MissingTarget(target));
    }

    let ghost = world
        .spawn((
            Ghost::tracking(target),
            config,
            Transform::from_translation(position),
            Tag::Monster,
            Collider::sphere(GHOST_COLLIDER_RADIUS),
            CollisionLayers::new(LAYER_ACTORS),
        ))
        .id();

    crate::log_info(&format!(
        "👻 Ghost {:?} spawned at {:?}, tracking {:?}",
        ghost, position, target
    ));

    Ok(ghost)
}
