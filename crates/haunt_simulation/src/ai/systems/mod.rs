//! AI systems (LogicTick)

pub mod patrol;
pub mod perception;
pub mod steering;

// Re-export all systems
pub use patrol::*;
pub use perception::*;
pub use steering::*;
