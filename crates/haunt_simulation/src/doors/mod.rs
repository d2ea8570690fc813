//! Doors: trigger-зоны открывают/закрывают двери
//!
//! Physics collaborator присылает `TriggerEvent` (enter/exit коллайдера в
//! trigger-зону). Если вошедший несёт нужный тег: дверь открывается от его
//! позиции (хост решает, в какую сторону распахнуть), на выходе закрывается.

use bevy::prelude::*;

use crate::components::Tag;
use crate::schedules::{roll_events, PhysicsTick};

/// Дверь
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Door {
    pub is_open: bool,
    /// Откуда пришёл открывший (None пока закрыта)
    pub opened_from: Option<Vec3>,
}

impl Door {
    /// Открыть закрытую дверь. Уже открытая не трогается.
    pub fn open(&mut self, from: Vec3) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.opened_from = Some(from);
        true
    }

    /// Закрыть открытую дверь
    pub fn close(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.opened_from = None;
        true
    }
}

/// Trigger-зона, управляющая дверью
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DoorTrigger {
    pub door: Entity,
    /// Какой тег открывает дверь
    pub activator: Tag,
}

impl DoorTrigger {
    pub fn new(door: Entity) -> Self {
        Self {
            door,
            activator: Tag::Ball,
        }
    }
}

/// Enter/exit коллайдера в trigger-зону (от physics collaborator)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Entered { trigger: Entity, other: Entity },
    Exited { trigger: Entity, other: Entity },
}

/// Дверь сменила состояние (для анимации/звука у хоста)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DoorEvent {
    Opened { door: Entity, from: Vec3 },
    Closed { door: Entity },
}

/// Door Plugin
///
/// Регистрирует door систему в PhysicsTick (trigger callbacks: physics step).
pub struct DoorPlugin;

impl Plugin for DoorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerEvent>().add_event::<DoorEvent>();

        app.add_systems(
            PhysicsTick,
            (
                roll_events::<TriggerEvent>,
                roll_events::<DoorEvent>,
                process_door_triggers,
            )
                .chain(),
        );
    }
}

/// Система: TriggerEvent → Door open/close → DoorEvent
pub fn process_door_triggers(
    mut triggers_events: EventReader<TriggerEvent>,
    triggers: Query<&DoorTrigger>,
    others: Query<(&Tag, &Transform)>,
    mut doors: Query<&mut Door>,
    mut door_events: EventWriter<DoorEvent>,
) {
    for event in triggers_events.read() {
        let (trigger_entity, other, entered) = match *event {
            TriggerEvent::Entered { trigger, other } => (trigger, other, true),
            TriggerEvent::Exited { trigger, other } => (trigger, other, false),
        };

        let Ok(trigger) = triggers.get(trigger_entity) else {
            continue;
        };

        // Только entity с нужным тегом
        let Ok((tag, transform)) = others.get(other) else {
            continue;
        };
        if *tag != trigger.activator {
            continue;
        }

        let Ok(mut door) = doors.get_mut(trigger.door) else {
            crate::log_error(&format!(
                "DoorTrigger {:?}: door {:?} не найдена",
                trigger_entity, trigger.door
            ));
            continue;
        };

        if entered {
            if door.open(transform.translation) {
                crate::log(&format!("🚪 Door {:?} opened by {:?}", trigger.door, other));
                door_events.write(DoorEvent::Opened {
                    door: trigger.door,
                    from: transform.translation,
                });
            }
        } else if door.close() {
            crate::log(&format!("🚪 Door {:?} closed", trigger.door));
            door_events.write(DoorEvent::Closed { door: trigger.door });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_open_close_idempotent() {
        let mut door = Door::default();
        let from = Vec3::new(1.0, 0.0, 2.0);

        assert!(door.open(from));
        assert!(!door.open(Vec3::ZERO));
        assert_eq!(door.opened_from, Some(from));

        assert!(door.close());
        assert!(!door.close());
        assert_eq!(door.opened_from, None);
    }

    #[test]
    fn test_trigger_default_activator_is_ball() {
        let trigger = DoorTrigger::new(Entity::PLACEHOLDER);
        assert_eq!(trigger.activator, Tag::Ball);
    }
}
