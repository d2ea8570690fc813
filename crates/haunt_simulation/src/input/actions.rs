//! Input action asset: maps → actions → bindings, control schemes.
//!
//! Формат повторяет JSON ассета движка (camelCase поля), поэтому
//! host может отдать нам тот же файл без конвертации.

use std::collections::BTreeSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Встроенный ассет: карта "Screen" с кнопкой "Walk", схема "Touchscreen"
pub const DEFAULT_INPUT_ACTIONS_JSON: &str = r#"{
    "name": "InputActions",
    "maps": [
        {
            "name": "Screen",
            "id": "3d541ed5-f025-4216-b7ff-bc805ad9c9e5",
            "actions": [
                {
                    "name": "Walk",
                    "type": "Button",
                    "id": "2d9232b5-3486-4328-b4cf-90664949717c",
                    "expectedControlType": "Button",
                    "processors": "",
                    "interactions": "",
                    "initialStateCheck": false
                }
            ],
            "bindings": [
                {
                    "name": "",
                    "id": "07bde4a4-4dbe-4e94-b195-95844acc5922",
                    "path": "<Gamepad>/buttonSouth",
                    "interactions": "",
                    "processors": "",
                    "groups": "Touchscreen",
                    "action": "Walk",
                    "isComposite": false,
                    "isPartOfComposite": false
                },
                {
                    "name": "",
                    "id": "10daf771-1947-40f0-8318-399348541edf",
                    "path": "<Gamepad>/buttonNorth",
                    "interactions": "",
                    "processors": "",
                    "groups": "Touchscreen",
                    "action": "Walk",
                    "isComposite": false,
                    "isPartOfComposite": false
                }
            ]
        }
    ],
    "controlSchemes": [
        {
            "name": "Touchscreen",
            "bindingGroup": "Touchscreen",
            "devices": [
                {
                    "devicePath": "<Touchscreen>",
                    "isOptional": false,
                    "isOR": false
                }
            ]
        }
    ]
}"#;

/// Имя карты экранных действий во встроенном ассете
pub const SCREEN_MAP: &str = "Screen";
/// Действие "идти" в карте Screen
pub const WALK_ACTION: &str = "Walk";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse input action asset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("action map '{0}' not found")]
    UnknownMap(String),
    #[error("action '{action}' not found in map '{map}'")]
    UnknownAction { map: String, action: String },
    #[error("control scheme '{0}' not found")]
    UnknownScheme(String),
    #[error("binding '{path}' in map '{map}' refers to missing action '{action}'")]
    DanglingBinding {
        map: String,
        action: String,
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    Button,
    Value,
    PassThrough,
}

/// Фаза срабатывания действия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum ActionPhase {
    Started,
    Performed,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub id: String,
    pub expected_control_type: String,
    pub processors: String,
    pub interactions: String,
    pub initial_state_check: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Binding {
    pub name: String,
    pub id: String,
    /// Control path, например `<Gamepad>/buttonSouth`
    pub path: String,
    pub interactions: String,
    pub processors: String,
    /// Binding groups через `;`
    pub groups: String,
    pub action: String,
    pub is_composite: bool,
    pub is_part_of_composite: bool,
}

impl Binding {
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.split(';').any(|g| g.trim() == group)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionMap {
    pub name: String,
    pub id: String,
    pub actions: Vec<ActionDef>,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRequirement {
    pub device_path: String,
    pub is_optional: bool,
    #[serde(rename = "isOR")]
    pub is_or: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlScheme {
    pub name: String,
    pub binding_group: String,
    pub devices: Vec<DeviceRequirement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputActionAsset {
    pub name: String,
    pub maps: Vec<ActionMap>,
    pub control_schemes: Vec<ControlScheme>,
}

impl InputActionAsset {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let asset: Self = serde_json::from_str(json)?;
        asset.validate()?;
        Ok(asset)
    }

    /// Каждый binding должен ссылаться на существующее действие своей карты
    pub fn validate(&self) -> Result<(), InputError> {
        for map in &self.maps {
            for binding in &map.bindings {
                if binding.is_composite {
                    continue;
                }
                if !map.actions.iter().any(|a| a.name == binding.action) {
                    return Err(InputError::DanglingBinding {
                        map: map.name.clone(),
                        action: binding.action.clone(),
                        path: binding.path.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn find_map(&self, map: &str) -> Result<&ActionMap, InputError> {
        self.maps
            .iter()
            .find(|m| m.name == map)
            .ok_or_else(|| InputError::UnknownMap(map.to_string()))
    }
}

/// Триггер действия (пишется `dispatch_controls`)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ActionTriggered {
    pub map: String,
    pub action: String,
    pub phase: ActionPhase,
}

/// Runtime обёртка над ассетом: какие карты включены, маска схемы
///
/// Все карты стартуют выключенными.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputActions {
    asset: InputActionAsset,
    enabled: BTreeSet<String>,
    /// Binding group активной control scheme (None = все bindings)
    binding_mask: Option<String>,
}

impl InputActions {
    pub fn new(asset: InputActionAsset) -> Self {
        Self {
            asset,
            enabled: BTreeSet::new(),
            binding_mask: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, InputError> {
        InputActionAsset::from_json(json).map(Self::new)
    }

    /// Встроенный ассет
    pub fn load_default() -> Result<Self, InputError> {
        Self::from_json(DEFAULT_INPUT_ACTIONS_JSON)
    }

    pub fn asset(&self) -> &InputActionAsset {
        &self.asset
    }

    pub fn find_action(&self, map: &str, action: &str) -> Result<&ActionDef, InputError> {
        self.asset
            .find_map(map)?
            .actions
            .iter()
            .find(|a| a.name == action)
            .ok_or_else(|| InputError::UnknownAction {
                map: map.to_string(),
                action: action.to_string(),
            })
    }

    pub fn control_scheme(&self, name: &str) -> Result<&ControlScheme, InputError> {
        self.asset
            .control_schemes
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| InputError::UnknownScheme(name.to_string()))
    }

    /// Оставить только bindings группы схемы
    pub fn use_control_scheme(&mut self, name: &str) -> Result<(), InputError> {
        let group = self.control_scheme(name)?.binding_group.clone();
        self.binding_mask = Some(group);
        Ok(())
    }

    pub fn clear_binding_mask(&mut self) {
        self.binding_mask = None;
    }

    pub fn binding_mask(&self) -> Option<&str> {
        self.binding_mask.as_deref()
    }

    pub fn enable_map(&mut self, map: &str) -> Result<(), InputError> {
        self.asset.find_map(map)?;
        self.enabled.insert(map.to_string());
        Ok(())
    }

    pub fn disable_map(&mut self, map: &str) -> Result<(), InputError> {
        self.asset.find_map(map)?;
        self.enabled.remove(map);
        Ok(())
    }

    pub fn enable_all(&mut self) {
        self.enabled = self.asset.maps.iter().map(|m| m.name.clone()).collect();
    }

    pub fn disable_all(&mut self) {
        self.enabled.clear();
    }

    pub fn is_enabled(&self, map: &str) -> bool {
        self.enabled.contains(map)
    }

    /// Control path → действия включённых карт.
    ///
    /// Одно действие срабатывает максимум раз на карту, даже если к control
    /// привязано несколько bindings.
    pub fn route(&self, control_path: &str, phase: ActionPhase) -> Vec<ActionTriggered> {
        let mut triggered = Vec::new();

        for map in self.asset.maps.iter().filter(|m| self.is_enabled(&m.name)) {
            let mut seen = BTreeSet::new();
            for binding in &map.bindings {
                if binding.path != control_path || binding.is_composite {
                    continue;
                }
                if let Some(group) = &self.binding_mask {
                    if !binding.in_group(group) {
                        continue;
                    }
                }
                if seen.insert(binding.action.as_str()) {
                    triggered.push(ActionTriggered {
                        map: map.name.clone(),
                        action: binding.action.clone(),
                        phase,
                    });
                }
            }
        }

        triggered
    }
}
