//! World компоненты: MapGrid (сетка комнат от генератора карты)

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Предел размера уровня по оси (метры): дальше f32 теряет целые метры
pub const MAX_GRID_EXTENT: u64 = 1 << 24;

/// Сетка комнат уровня (пишет генератор карты, читают патрули)
///
/// Комната (i, j) имеет origin в `(i * room_size, 0, j * room_size)`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct MapGrid {
    pub width: u32,
    pub height: u32,
    pub room_size: u32,
}

impl Default for MapGrid {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            room_size: 10,
        }
    }
}

impl MapGrid {
    pub fn new(width: u32, height: u32, room_size: u32) -> Self {
        Self {
            width,
            height,
            room_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.room_size == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
                room_size: self.room_size,
            });
        }

        let too_large = |cells: u32| u64::from(cells) * u64::from(self.room_size) > MAX_GRID_EXTENT;
        if too_large(self.width) || too_large(self.height) {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                room_size: self.room_size,
            });
        }
        Ok(())
    }

    fn cell_offset(&self, cells: u32) -> f32 {
        (u64::from(cells) * u64::from(self.room_size)) as f32
    }

    /// Размер уровня в метрах (x, z)
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.cell_offset(self.width), self.cell_offset(self.height))
    }

    /// Случайная patrol точка: origin случайной комнаты, y = 0
    ///
    /// Инвариант: `0 <= x < width * room_size`, `0 <= z < height * room_size`.
    /// Пустая сетка (0 комнат) даёт origin.
    pub fn sample_destination(&self, rng: &mut impl Rng) -> Vec3 {
        let column = if self.width > 0 {
            rng.gen_range(0..self.width)
        } else {
            0
        };
        let row = if self.height > 0 {
            rng.gen_range(0..self.height)
        } else {
            0
        };

        Vec3::new(self.cell_offset(column), 0.0, self.cell_offset(row))
    }
}
