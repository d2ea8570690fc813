//! Vision: field-of-view scorer
//!
//! Каждый PhysicsTick наблюдатель (камера игрока) сметает сферой объём
//! перед собой, оставляет монстров с прямой видимостью и пишет очки в
//! `ViewerReport`.
//!
//! Контракт `ViewerReport`: единственный writer: `update_viewer_report`
//! в PhysicsTick; readers читают после завершения PhysicsTick.
//! Значение перезаписывается целиком, между тиками не копится.

use bevy::prelude::*;

pub mod scoring;

#[cfg(test)]
mod scoring_tests;

pub use scoring::{
    compute_view_score, update_viewer_report, ViewScore, ViewSweep, ViewerReport,
    LINE_OF_SIGHT_EPSILON,
};

use crate::schedules::PhysicsTick;
use crate::spatial::SpatialSync;

/// Vision Plugin
///
/// Регистрирует scorer в PhysicsTick после пересборки ColliderWorld.
pub struct VisionPlugin;

impl Plugin for VisionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerReport>()
            .add_systems(PhysicsTick, update_viewer_report.after(SpatialSync));
    }
}
