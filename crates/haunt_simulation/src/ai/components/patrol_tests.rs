//! Tests for patrol components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::patrol::{ArrivalReference, GhostConfig, HuntPolicy, PatrolState};
    use crate::error::ConfigError;

    const HIT: Vec3 = Vec3::new(4.0, 0.0, 9.0);

    #[test]
    fn test_patrol_state_default() {
        let state = PatrolState::default();
        assert_eq!(state, PatrolState::NoDestination);
        assert_eq!(state.destination(), None);
    }

    #[test]
    fn test_ghost_config_default() {
        let config = GhostConfig::default();
        assert_eq!(config.kill_range, 10.0);
        assert_eq!(config.hunt_range, 100.0);
        assert_eq!(config.arrival_threshold, 2.0);
        assert_eq!(config.kill_scene, "JumpScare");
        assert_eq!(config.hunt_policy, HuntPolicy::Overwrite);
        assert_eq!(config.arrival_reference, ArrivalReference::Agent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ghost_config_validation() {
        let config = GhostConfig {
            kill_range: 50.0,
            hunt_range: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::KillBeyondHunt { .. })
        ));

        let config = GhostConfig {
            speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "speed", .. })
        ));

        let config = GhostConfig {
            kill_scene: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySceneName));
    }

    #[test]
    fn test_pace_zero_unless_traveling() {
        assert_eq!(PatrolState::NoDestination.pace(3.0), 0.0);
        assert_eq!(PatrolState::Paused { destination: None }.pace(3.0), 0.0);
        assert_eq!(
            PatrolState::Traveling { destination: HIT }.pace(3.0),
            3.0
        );
    }

    #[test]
    fn test_hunt_overwrites_travel_destination() {
        let mut state = PatrolState::Traveling {
            destination: Vec3::new(50.0, 0.0, 50.0),
        };
        let cancel = state.apply_hunt(HIT, HuntPolicy::Overwrite);

        assert!(!cancel);
        assert_eq!(state, PatrolState::Traveling { destination: HIT });
    }

    #[test]
    fn test_hunt_overwrites_destination_while_paused() {
        let mut state = PatrolState::Paused { destination: None };
        let cancel = state.apply_hunt(HIT, HuntPolicy::Overwrite);

        // Остаёмся на паузе, но destination уже перезаписана
        assert!(!cancel);
        assert!(state.is_paused());
        assert_eq!(state.destination(), Some(HIT));
    }

    #[test]
    fn test_hunt_interrupts_pause() {
        let mut state = PatrolState::Paused { destination: None };
        let cancel = state.apply_hunt(HIT, HuntPolicy::InterruptPause);

        assert!(cancel);
        assert_eq!(state, PatrolState::Traveling { destination: HIT });
    }

    #[test]
    fn test_hunt_respects_pause() {
        let mut state = PatrolState::Paused { destination: None };
        assert!(!state.apply_hunt(HIT, HuntPolicy::RespectPause));
        assert_eq!(state, PatrolState::Paused { destination: None });

        // Вне паузы RespectPause ведёт себя как Overwrite
        let mut state = PatrolState::NoDestination;
        state.apply_hunt(HIT, HuntPolicy::RespectPause);
        assert_eq!(state, PatrolState::Traveling { destination: HIT });
    }

    #[test]
    fn test_resume_after_pause() {
        let mut state = PatrolState::Paused { destination: None };
        state.resume();
        assert_eq!(state, PatrolState::NoDestination);

        let mut state = PatrolState::Paused {
            destination: Some(HIT),
        };
        state.resume();
        assert_eq!(state, PatrolState::Traveling { destination: HIT });

        // resume вне паузы: no-op
        let mut state = PatrolState::Traveling { destination: HIT };
        state.resume();
        assert_eq!(state, PatrolState::Traveling { destination: HIT });
    }
}
