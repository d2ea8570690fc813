//! AI Events: запросы от призраков к хосту
//!
//! Симуляция не грузит сцены сама: kill превращается в событие,
//! которое хост забирает после LogicTick (`drain_scene_requests`).

use bevy::prelude::*;

/// Kill-луч попал в target → хост должен переключить сцену
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneTransitionRequested {
    /// Призрак, который поймал target
    pub ghost: Entity,
    /// Имя сцены (GhostConfig::kill_scene)
    pub scene: String,
}

/// Забрать все накопленные запросы смены сцены
pub fn drain_scene_requests(world: &mut World) -> Vec<SceneTransitionRequested> {
    match world.get_resource_mut::<Events<SceneTransitionRequested>>() {
        Some(mut events) => events.drain().collect(),
        None => Vec::new(),
    }
}
