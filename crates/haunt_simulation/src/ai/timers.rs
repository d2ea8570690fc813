//! Pause timers: delay queue по entity
//!
//! Один pending таймер на призрака: повторный `schedule` заменяет старый.
//! Очередь поллится в начале каждого LogicTick, сработавшие entity
//! возвращаются в порядке Entity (BTreeMap → детерминизм).

use bevy::prelude::*;
use std::collections::BTreeMap;

#[derive(Resource, Debug, Clone, Default)]
pub struct PauseTimers {
    /// Entity → оставшееся время (секунды)
    pending: BTreeMap<Entity, f32>,
}

impl PauseTimers {
    /// Поставить (или заменить) таймер
    pub fn schedule(&mut self, entity: Entity, delay: f32) {
        self.pending.insert(entity, delay.max(0.0));
    }

    pub fn cancel(&mut self, entity: Entity) -> bool {
        self.pending.remove(&entity).is_some()
    }

    pub fn remaining(&self, entity: Entity) -> Option<f32> {
        self.pending.get(&entity).copied()
    }

    pub fn is_pending(&self, entity: Entity) -> bool {
        self.pending.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Продвинуть время на `delta`, вернуть сработавшие entity.
    ///
    /// Таймер с delay 0 срабатывает на ближайшем poll (не в тике постановки).
    pub fn poll(&mut self, delta: f32) -> Vec<Entity> {
        let delta = delta.max(0.0);
        let mut due = Vec::new();

        self.pending.retain(|entity, remaining| {
            *remaining -= delta;
            if *remaining <= 0.0 {
                due.push(*entity);
                false
            } else {
                true
            }
        });

        due
    }
}
