//! AI components

pub mod patrol;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod patrol_tests;

// Re-export all components
pub use patrol::*;
