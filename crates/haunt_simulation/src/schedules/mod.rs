//! Custom schedules и tick clock
//!
//! Симуляция не владеет main loop: хост (движок, headless binary, тесты)
//! дёргает `TickHost::on_logic_tick(dt)` раз в кадр и
//! `TickHost::on_physics_tick(dt)` раз в physics step.
//!
//! # Архитектура
//!
//! **LogicTick** (per frame) → pause timers → perception → patrol → steering
//! **PhysicsTick** (per physics step) → field-of-view score, door triggers
//!
//! Оба schedule однопоточные по смыслу: системы внутри `.chain()`.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use crate::logger;

pub mod timer_systems;

pub use timer_systems::roll_events;

/// Custom schedule: LogicTick (раз в кадр)
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicTick;

/// Custom schedule: PhysicsTick (раз в physics step)
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicsTick;

/// Часы симуляции (детерминистичные, двигаются только хостом)
///
/// `delta`: dt текущего выполняемого schedule.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TickClock {
    pub delta: f32,
    pub logic_elapsed: f64,
    pub physics_elapsed: f64,
    pub logic_ticks: u64,
    pub physics_ticks: u64,
}

impl TickClock {
    pub fn begin_logic(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.logic_elapsed += self.delta as f64;
        self.logic_ticks = self.logic_ticks.wrapping_add(1);
    }

    pub fn begin_physics(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.physics_elapsed += self.delta as f64;
        self.physics_ticks = self.physics_ticks.wrapping_add(1);
    }
}

/// Scheduler interface для host loop
pub trait TickHost {
    fn on_logic_tick(&mut self, dt: f32);
    fn on_physics_tick(&mut self, dt: f32);
}

impl TickHost for World {
    fn on_logic_tick(&mut self, dt: f32) {
        self.get_resource_or_insert_with(TickClock::default)
            .begin_logic(dt);

        if let Err(err) = self.try_run_schedule(LogicTick) {
            logger::log_error(&format!("LogicTick: schedule не зарегистрирован ({:?})", err));
        }
    }

    fn on_physics_tick(&mut self, dt: f32) {
        self.get_resource_or_insert_with(TickClock::default)
            .begin_physics(dt);

        if let Err(err) = self.try_run_schedule(PhysicsTick) {
            logger::log_error(&format!("PhysicsTick: schedule не зарегистрирован ({:?})", err));
        }
    }
}

impl TickHost for App {
    fn on_logic_tick(&mut self, dt: f32) {
        self.world_mut().on_logic_tick(dt);
    }

    fn on_physics_tick(&mut self, dt: f32) {
        self.world_mut().on_physics_tick(dt);
    }
}

/// Plugin: регистрирует оба schedule и TickClock
pub struct TickSchedulesPlugin;

impl Plugin for TickSchedulesPlugin {
    fn build(&self, app: &mut App) {
        app.init_schedule(LogicTick)
            .init_schedule(PhysicsTick)
            .init_resource::<TickClock>();
    }
}
