//! HAUNT Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 для хоррор-уровня: призраки патрулируют
//! сетку комнат и охотятся на игрока, камера игрока считает очки за
//! монстров в поле зрения.
//!
//! Движок (рендер, физика, сцены, устройства ввода) остаётся у хоста:
//! - хост дёргает `TickHost::on_logic_tick` / `on_physics_tick`
//! - геометрия приходит через `SpatialQuery` (встроенный `ColliderWorld`)
//! - наружу уходят events (`SceneTransitionRequested`, `DoorEvent`,
//!   `ActionTriggered`) и `ViewerReport`

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod achievements;
pub mod ai;
pub mod components;
pub mod doors;
pub mod error;
pub mod input;
pub mod logger;
pub mod schedules;
pub mod spatial;
pub mod vision;

// Re-export базовых типов для удобства
pub use ai::{
    drain_scene_requests, spawn_ghost, Ghost, GhostAiPlugin, GhostConfig, HuntPolicy, PatrolState,
    Perception, SceneTransitionRequested,
};
pub use components::*;
pub use doors::{Door, DoorEvent, DoorPlugin, DoorTrigger, TriggerEvent};
pub use error::ConfigError;
pub use input::{ActionPhase, ActionTriggered, ControlEvent, InputActions, InputPlugin};
pub use logger::*;
pub use schedules::{LogicTick, PhysicsTick, TickClock, TickHost, TickSchedulesPlugin};
pub use spatial::{Collider, ColliderWorld, CollisionLayers, SpatialPlugin, SpatialQuery};
pub use vision::{ViewSweep, ViewerReport, VisionPlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог поставить хост
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins((
            TickSchedulesPlugin,
            SpatialPlugin,
            GhostAiPlugin,
            VisionPlugin,
            DoorPlugin,
            InputPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App со всеми подсистемами
///
/// Тики двигает вызывающий через `TickHost`, `App::update` не нужен.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot компонента T по всем entity (для сравнения детерминизма)
///
/// Формат: `index:generation=Debug` построчно, отсортировано по Entity.
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entries: Vec<_> = query.iter(world).collect();
    entries.sort_by_key(|(entity, _)| *entity);

    let mut snapshot = Vec::new();
    for (entity, component) in entries {
        snapshot.extend_from_slice(
            format!("{}:{}={:?}\n", entity.index(), entity.generation(), component).as_bytes(),
        );
    }

    snapshot
}
