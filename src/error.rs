// src/error.rs
//! Таксономия ошибок генерации
//!
//! - `ConfigError` — фатальна, прогон не начинается и сетка не создаётся
//! - `GenerationWarning` — мягкий сбой (исчерпание попыток размещения),
//!   записывается в отчёт, прогон продолжается
//! - `GenerationError::Validation` — жёсткий сбой, коммит отменяется,
//!   список нарушений возвращается вызывающему
//!
//! Все исходы — структурные `Result`/отчёты, никаких паник: решать,
//! перезапускаться ли с новым сидом, должен вызывающий.

use thiserror::Error;

use crate::grid::SemanticTile;
use crate::validate::ValidationReport;

/// Ошибка конфигурации: генерация невозможна с такими настройками.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("map size {width}x{height} leaves no interior inside a border of thickness {border}")]
    MapTooSmall { width: u32, height: u32, border: u32 },

    #[error("{name} = {value} is outside [0, 1]")]
    DensityOutOfRange { name: &'static str, value: f32 },

    #[error("building {tile:?} has an empty footprint {width}x{height}")]
    EmptyFootprint { tile: SemanticTile, width: u32, height: u32 },

    #[error("building {tile:?} has an inverted distance band [{min}, {max}]")]
    InvertedDistanceBand { tile: SemanticTile, min: f32, max: f32 },

    #[error("building {tile:?} footprint {width}x{height} cannot fit inside the border margin")]
    FootprintTooLarge { tile: SemanticTile, width: u32, height: u32 },
}

/// Мягкое предупреждение, не прерывающее прогон.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationWarning {
    /// За 100 попыток не нашлось свободного места под один экземпляр
    /// здания; экземпляр пропущен.
    #[error("no free spot for {tile:?} instance {index} after {tries} tries, skipped")]
    PlacementExhausted {
        tile: SemanticTile,
        index: u32,
        tries: u32,
    },

    /// Валидация не нашла дом игрока, и конвейер вставил стандартный
    /// дом 3×3 у выхода.
    #[error("player house was missing, inserted a default one at ({x}, {y})")]
    PlayerHouseInserted { x: i32, y: i32 },
}

/// Итоговая ошибка прогона генерации.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("structural validation failed:\n{0}")]
    Validation(ValidationReport),
}
