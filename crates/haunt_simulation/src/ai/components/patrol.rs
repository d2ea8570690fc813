//! Patrol/hunt компоненты призрака (state machine, config, perception).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};
use crate::spatial::{LayerMask, MASK_DEFAULT_RAYCAST};

/// Призрак: патрулирует комнаты, охотится на target, убивает вблизи
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(PatrolState, Locomotion, GhostConfig, Transform)]
pub struct Ghost {
    /// Кого выслеживаем (обычно player)
    pub target: Entity,
}

impl Ghost {
    pub fn tracking(target: Entity) -> Self {
        Self { target }
    }
}

/// Как hunt-луч обращается с паузой патруля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum HuntPolicy {
    /// Destination перезаписывается всегда; пауза досиживается до таймера
    #[default]
    Overwrite,
    /// Hunt прерывает паузу: таймер отменяется, сразу идём к точке
    InterruptPause,
    /// Во время паузы hunt игнорируется
    RespectPause,
}

/// От какой точки меряем "дошли до destination"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum ArrivalReference {
    /// Позиция самого призрака
    #[default]
    Agent,
    /// Позиция отслеживаемого target (поведение старых сцен)
    Target,
}

/// Параметры призрака
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct GhostConfig {
    /// Дистанция kill-луча (метры)
    pub kill_range: f32,
    /// Дистанция hunt-луча (метры)
    pub hunt_range: f32,
    /// Скорость движения (м/с)
    pub speed: f32,
    /// Скорость поворота по yaw (градусы/с)
    pub rotation_speed: f32,
    /// Пауза между переходами: целые секунды из [0, pause_time_range)
    pub pause_time_range: u32,
    /// Ближе этого destination считается достигнутым
    pub arrival_threshold: f32,
    /// Сцена, которую запрашиваем при kill
    pub kill_scene: String,
    /// Слои, которые видят perception лучи
    pub layers_to_hit: LayerMask,
    pub hunt_policy: HuntPolicy,
    pub arrival_reference: ArrivalReference,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            kill_range: 10.0,
            hunt_range: 100.0,
            speed: 3.5,
            rotation_speed: 90.0,
            pause_time_range: 3,
            arrival_threshold: 2.0,
            kill_scene: "JumpScare".to_string(),
            layers_to_hit: MASK_DEFAULT_RAYCAST,
            hunt_policy: HuntPolicy::Overwrite,
            arrival_reference: ArrivalReference::Agent,
        }
    }
}

impl GhostConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("kill_range", self.kill_range)?;
        ensure_positive("hunt_range", self.hunt_range)?;
        ensure_positive("arrival_threshold", self.arrival_threshold)?;
        ensure_non_negative("speed", self.speed)?;
        ensure_non_negative("rotation_speed", self.rotation_speed)?;

        if self.kill_range > self.hunt_range {
            return Err(ConfigError::KillBeyondHunt {
                kill_range: self.kill_range,
                hunt_range: self.hunt_range,
            });
        }
        if self.kill_scene.trim().is_empty() {
            return Err(ConfigError::EmptySceneName);
        }
        Ok(())
    }
}

/// Patrol FSM состояния
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum PatrolState {
    /// Нет цели: на следующем patrol шаге сэмплируем комнату
    #[default]
    NoDestination,

    /// Идём к destination
    Traveling { destination: Vec3 },

    /// Стоим до срабатывания pause таймера.
    /// `destination`: точка, выставленная hunt-лучом во время паузы.
    Paused { destination: Option<Vec3> },
}

impl PatrolState {
    /// Текущая destination (если есть)
    pub fn destination(&self) -> Option<Vec3> {
        match *self {
            PatrolState::NoDestination => None,
            PatrolState::Traveling { destination } => Some(destination),
            PatrolState::Paused { destination } => destination,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PatrolState::Paused { .. })
    }

    /// Скорость движения в этом состоянии
    pub fn pace(&self, speed: f32) -> f32 {
        match self {
            PatrolState::Traveling { .. } => speed,
            _ => 0.0,
        }
    }

    /// Hunt-луч попал в target: перезаписать destination по политике.
    ///
    /// Возвращает `true`, если pending pause таймер надо отменить.
    pub fn apply_hunt(&mut self, point: Vec3, policy: HuntPolicy) -> bool {
        match (*self, policy) {
            (PatrolState::Paused { .. }, HuntPolicy::RespectPause) => false,
            (PatrolState::Paused { .. }, HuntPolicy::Overwrite) => {
                *self = PatrolState::Paused {
                    destination: Some(point),
                };
                false
            }
            (PatrolState::Paused { .. }, HuntPolicy::InterruptPause) => {
                *self = PatrolState::Traveling { destination: point };
                true
            }
            _ => {
                *self = PatrolState::Traveling { destination: point };
                false
            }
        }
    }

    /// Pause таймер сработал
    pub fn resume(&mut self) {
        if let PatrolState::Paused { destination } = *self {
            *self = match destination {
                Some(destination) => PatrolState::Traveling { destination },
                None => PatrolState::NoDestination,
            };
        }
    }
}

/// Результат perception лучей за тик (transient)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Perception {
    /// Target не задет ни одним лучом
    #[default]
    Unaware,
    /// Hunt-луч попал в target
    Hunted { point: Vec3 },
    /// Kill-луч попал в target
    Killed,
}

/// Состояние движения для анимации (читает animation collaborator)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Скорость за последний logic tick (м/с)
    pub velocity: Vec3,
    pub is_moving: bool,
}
