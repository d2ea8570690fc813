//! ECS Components общие для всех подсистем
//!
//! Организация по доменам:
//! - tags: теги сущностей (Monster, SpecialMonster, Ball, ...)
//! - world: сетка комнат уровня (MapGrid)
//!
//! Компоненты конкретных подсистем живут рядом с ними (ai, vision, doors).

pub mod tags;
pub mod world;

// Re-exports для удобного импорта
pub use tags::*;
pub use world::*;
