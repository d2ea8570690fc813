//! Init-time ошибки конфигурации
//!
//! Во время тиков симуляция не падает (логируем и пропускаем entity),
//! а вот кривой config/grid отсекаем при спавне.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("kill_range ({kill_range}) must not exceed hunt_range ({hunt_range})")]
    KillBeyondHunt { kill_range: f32, hunt_range: f32 },

    #[error("map grid {width}x{height} with room size {room_size} has no cells to patrol")]
    EmptyGrid {
        width: u32,
        height: u32,
        room_size: u32,
    },

    #[error("map grid {width}x{height} with room size {room_size} is too large")]
    GridTooLarge {
        width: u32,
        height: u32,
        room_size: u32,
    },

    #[error("kill scene name is empty")]
    EmptySceneName,

    #[error("map grid resource is missing, map generation must run before ghosts spawn")]
    MissingGrid,

    #[error("tracked target {0:?} does not exist")]
    MissingTarget(bevy::prelude::Entity),
}

/// Проверка: конечное число > 0
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Проверка: конечное число >= 0
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_checks() {
        assert!(ensure_positive("speed", 1.0).is_ok());
        assert_eq!(
            ensure_positive("speed", 0.0),
            Err(ConfigError::NotPositive { field: "speed", value: 0.0 })
        );
        assert!(ensure_positive("speed", f32::NAN).is_err());
        assert!(ensure_non_negative("speed", 0.0).is_ok());
        assert!(ensure_non_negative("speed", -0.5).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::KillBeyondHunt {
            kill_range: 20.0,
            hunt_range: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "kill_range (20) must not exceed hunt_range (10)"
        );
    }
}
