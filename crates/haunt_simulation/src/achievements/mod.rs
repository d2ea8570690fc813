//! Achievements menu: модель экрана достижений
//!
//! UI framework у хоста: здесь только данные для каждой строки меню
//! (заголовок, описание, "p/max", ширина полосы прогресса, иконка).
//! Иконка резолвится через `SpriteCatalog`; не нашли: строка пропускается,
//! остальные строятся дальше.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Данные достижения (источник: дочерние объекты holder'а)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub progress: f32,
    pub max_progress: f32,
    pub sprite_path: String,
}

/// Handle загруженного спрайта (выдаёт asset collaborator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u64);

/// Resource lookup для иконок
pub trait SpriteCatalog {
    fn load(&self, path: &str) -> Option<SpriteHandle>;
}

/// Готовая строка меню
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementEntry {
    pub title: String,
    pub description: String,
    /// "progress/max"
    pub progress_label: String,
    /// Ширина заполненной части полосы
    pub bar_fill: f32,
    pub icon: SpriteHandle,
}

/// Настройки меню (prefab строки, контейнер, сцена выхода)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub entry_prefab: Option<String>,
    pub container: Option<String>,
    /// Сцена, куда уходим по "назад"
    pub quit_scene: String,
    /// Полная ширина полосы прогресса
    pub bar_width: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("achievement entry prefab is not set")]
    MissingPrefab,
    #[error("achievement container is not set")]
    MissingContainer,
}

impl MenuConfig {
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.entry_prefab.as_deref().is_none_or(str::is_empty) {
            return Err(MenuError::MissingPrefab);
        }
        if self.container.as_deref().is_none_or(str::is_empty) {
            return Err(MenuError::MissingContainer);
        }
        Ok(())
    }
}

/// Построенное меню
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AchievementMenu {
    pub entries: Vec<AchievementEntry>,
    /// Спрайты, которые не нашлись (строки пропущены)
    pub missing_sprites: Vec<String>,
}

impl AchievementMenu {
    /// Сцена для кнопки "назад"
    pub fn cancel<'a>(&self, config: &'a MenuConfig) -> &'a str {
        &config.quit_scene
    }
}

/// Доля прогресса в [0, 1]; max <= 0 → 0
pub fn progress_ratio(progress: f32, max_progress: f32) -> f32 {
    if max_progress > 0.0 && progress.is_finite() {
        (progress / max_progress).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Собрать строки меню
pub fn build_menu(
    config: &MenuConfig,
    achievements: &[Achievement],
    catalog: &impl SpriteCatalog,
) -> Result<AchievementMenu, MenuError> {
    config.validate()?;

    let mut menu = AchievementMenu::default();

    for achievement in achievements {
        let Some(icon) = catalog.load(&achievement.sprite_path) else {
            crate::log_error(&format!(
                "Achievements: sprite '{}' не найден, '{}' пропущено",
                achievement.sprite_path, achievement.title
            ));
            menu.missing_sprites.push(achievement.sprite_path.clone());
            continue;
        };

        menu.entries.push(AchievementEntry {
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            progress_label: format!("{}/{}", achievement.progress, achievement.max_progress),
            bar_fill: config.bar_width
                * progress_ratio(achievement.progress, achievement.max_progress),
            icon,
        });
    }

    Ok(menu)
}
