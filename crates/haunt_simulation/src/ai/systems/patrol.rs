//! Patrol FSM systems (pause timers, destination sampling, arrival).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{ArrivalReference, Ghost, GhostConfig, PatrolState, PauseTimers};
use crate::components::MapGrid;
use crate::schedules::TickClock;
use crate::DeterministicRng;

/// Что произошло за patrol шаг
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolOutcome {
    /// Ничего не поменялось (идём / стоим)
    Unchanged,
    /// Выбрана новая комната
    Sampled { destination: Vec3 },
    /// Дошли: пауза на `delay` секунд
    Arrived { delay: f32 },
    /// Нужна новая destination, но MapGrid не задан
    NoGrid,
}

/// Длительность паузы: целые секунды из [0, range)
pub fn draw_pause_delay(range: u32, rng: &mut impl Rng) -> f32 {
    if range == 0 {
        0.0
    } else {
        rng.gen_range(0..range) as f32
    }
}

/// Один шаг patrol FSM.
///
/// `NoDestination → Traveling` (sample из grid), затем в том же шаге
/// `Traveling → Paused`, если `reference` ближе `arrival_threshold` к destination.
pub fn patrol_step(
    state: &mut PatrolState,
    reference: Vec3,
    config: &GhostConfig,
    grid: Option<&MapGrid>,
    rng: &mut impl Rng,
) -> PatrolOutcome {
    let mut outcome = PatrolOutcome::Unchanged;

    if *state == PatrolState::NoDestination {
        let Some(grid) = grid else {
            return PatrolOutcome::NoGrid;
        };
        let destination = grid.sample_destination(rng);
        *state = PatrolState::Traveling { destination };
        outcome = PatrolOutcome::Sampled { destination };
    }

    if let PatrolState::Traveling { destination } = *state {
        if reference.distance(destination) < config.arrival_threshold {
            *state = PatrolState::Paused { destination: None };
            return PatrolOutcome::Arrived {
                delay: draw_pause_delay(config.pause_time_range, rng),
            };
        }
    }

    outcome
}

/// Система: poll pause таймеров (первая AI система в LogicTick)
pub fn poll_pause_timers(
    mut timers: ResMut<PauseTimers>,
    clock: Res<TickClock>,
    mut ghosts: Query<&mut PatrolState, With<Ghost>>,
) {
    for entity in timers.poll(clock.delta) {
        // Призрак мог быть despawned пока стоял
        let Ok(mut state) = ghosts.get_mut(entity) else {
            continue;
        };
        state.resume();
        crate::log(&format!("▶️ Ghost {:?} pause over → {:?}", entity, *state));
    }
}

/// Система: patrol шаг для всех призраков
pub fn ghost_patrol(
    mut ghosts: Query<(Entity, &Ghost, &Transform, &GhostConfig, &mut PatrolState)>,
    targets: Query<&Transform>,
    grid: Option<Res<MapGrid>>,
    mut rng: ResMut<DeterministicRng>,
    mut timers: ResMut<PauseTimers>,
) {
    for (entity, ghost, transform, config, mut state) in ghosts.iter_mut() {
        let reference = match config.arrival_reference {
            ArrivalReference::Agent => transform.translation,
            ArrivalReference::Target => match targets.get(ghost.target) {
                Ok(target_transform) => target_transform.translation,
                Err(_) => {
                    crate::log_warning(&format!(
                        "Ghost {:?}: tracked target {:?} не найден, arrival меряем от призрака",
                        entity, ghost.target
                    ));
                    transform.translation
                }
            },
        };

        let outcome = patrol_step(
            &mut state,
            reference,
            config,
            grid.as_deref(),
            &mut rng.rng,
        );

        match outcome {
            PatrolOutcome::Unchanged => {}
            PatrolOutcome::Sampled { destination } => {
                crate::log(&format!("🚶 Ghost {:?} patrol → {:?}", entity, destination));
            }
            PatrolOutcome::Arrived { delay } => {
                timers.schedule(entity, delay);
                crate::log(&format!("⏸️ Ghost {:?} arrived, pause {:.0}s", entity, delay));
            }
            PatrolOutcome::NoGrid => {
                crate::log_warning(&format!(
                    "Ghost {:?}: MapGrid не задан, patrol destination не выбрана",
                    entity
                ));
            }
        }
    }
}
