//! Служебные системы для custom schedules

use bevy::prelude::*;

/// System: swap буферов `Events<E>` (первая система schedule)
///
/// Bevy обновляет events в `First` внутри `App::update`, а наши schedules
/// хост запускает вручную. Событие живёт два тика своего schedule,
/// так что reader в следующем тике его ещё увидит.
pub fn roll_events<E: Event>(mut events: ResMut<Events<E>>) {
    events.update();
}
