//! Input: control events → action events
//!
//! Устройства и их опрос у хоста. Хост шлёт `ControlEvent` (path контрола +
//! фаза), `dispatch_controls` раскладывает их по включённым картам ассета и
//! пишет `ActionTriggered`. Для экранных действий есть callback trait
//! `ScreenActions`.

use bevy::prelude::*;

pub mod actions;


pub use actions::{
    ActionDef, ActionKind, ActionMap, ActionPhase, ActionTriggered, Binding, ControlScheme,
    DeviceRequirement, InputActionAsset, InputActions, InputError, DEFAULT_INPUT_ACTIONS_JSON,
    SCREEN_MAP, WALK_ACTION,
};

use crate::schedules::{roll_events, LogicTick};

/// Сырой ввод от хоста
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub path: String,
    pub phase: ActionPhase,
}

impl ControlEvent {
    pub fn new(path: impl Into<String>, phase: ActionPhase) -> Self {
        Self {
            path: path.into(),
            phase,
        }
    }
}

/// Callbacks карты Screen
pub trait ScreenActions {
    fn on_walk(&mut self, phase: ActionPhase);
}

/// Раздать сработавшие действия карты Screen в callbacks
pub fn dispatch_screen<'a>(
    triggered: impl IntoIterator<Item = &'a ActionTriggered>,
    handler: &mut impl ScreenActions,
) {
    for action in triggered {
        if action.map != SCREEN_MAP {
            continue;
        }
        match action.action.as_str() {
            WALK_ACTION => handler.on_walk(action.phase),
            other => crate::log_warning(&format!("Screen: нет callback для '{}'", other)),
        }
    }
}

/// Input Plugin
///
/// Ставит встроенный ассет (если хост не поставил свой) с включённой
/// картой Screen.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ControlEvent>()
            .add_event::<ActionTriggered>();

        if !app.world().contains_resource::<InputActions>() {
            match default_actions() {
                Ok(actions) => {
                    app.insert_resource(actions);
                }
                Err(err) => crate::log_error(&format!("InputPlugin: {}", err)),
            }
        }

        app.add_systems(
            LogicTick,
            (
                roll_events::<ControlEvent>,
                roll_events::<ActionTriggered>,
                dispatch_controls,
            )
                .chain(),
        );
    }
}

fn default_actions() -> Result<InputActions, InputError> {
    let mut actions = InputActions::load_default()?;
    actions.enable_map(SCREEN_MAP)?;
    Ok(actions)
}

/// Система: ControlEvent → ActionTriggered
///
/// Без ассета события просто вычитываются.
pub fn dispatch_controls(
    mut controls: EventReader<ControlEvent>,
    actions: Option<Res<InputActions>>,
    mut triggered: EventWriter<ActionTriggered>,
) {
    let Some(actions) = actions else {
        controls.clear();
        return;
    };

    for control in controls.read() {
        for action in actions.route(&control.path, control.phase) {
            triggered.write(action);
        }
    }
}
