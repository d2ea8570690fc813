//! Теги сущностей (фильтрация в vision scorer и door triggers)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тег сущности сцены
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash,
    Default, Serialize, Deserialize, Reflect,
)]
#[reflect(Component)]
pub enum Tag {
    #[default]
    Untagged,
    Player,
    Monster,
    SpecialMonster,
    Ball,
}

impl Tag {
    /// Сколько очков даёт монстр в поле зрения (None: не монстр)
    pub fn view_weight(&self) -> Option<f32> {
        match self {
            Tag::Monster => Some(1.0),
            Tag::SpecialMonster => Some(5.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_weights() {
        assert_eq!(Tag::Monster.view_weight(), Some(1.0));
        assert_eq!(Tag::SpecialMonster.view_weight(), Some(5.0));
        assert_eq!(Tag::Player.view_weight(), None);
        assert_eq!(Tag::default(), Tag::Untagged);
    }
}
