// src/config.rs
//! Конфигурация генерации деревни
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Размеры карты и толщина границы
//! - Геометрия городской площади
//! - Упорядоченный список зданий с полосами дистанций от центра
//! - Плотности декораций и управление сидом
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для настройки через
//! конфигурационные файлы. Поля `path_density` и `path_width`
//! зарезервированы и на текущий алгоритм прокладки троп не влияют.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::ConfigError;
use crate::grid::{Position, SemanticTile};

/// Заявка на размещение одного вида зданий.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Семантический тайл, которым штампуется прямоугольник здания
    pub tile: SemanticTile,

    /// Ширина прямоугольника в ячейках
    #[serde(default = "default_footprint_side")]
    pub width: u32,

    /// Высота прямоугольника в ячейках
    #[serde(default = "default_footprint_side")]
    pub height: u32,

    /// Сколько независимых экземпляров пытаться разместить
    #[serde(default = "default_building_count")]
    pub count: u32,

    /// Минимальная дистанция от центра карты
    #[serde(default = "default_min_dist")]
    pub min_dist: f32,

    /// Максимальная дистанция от центра карты
    #[serde(default = "default_max_dist")]
    pub max_dist: f32,

    /// Прокладывать ли тропу от двери здания к центру
    #[serde(default = "default_requires_path")]
    pub requires_path: bool,
}

fn default_footprint_side() -> u32 {
    3
}
fn default_building_count() -> u32 {
    1
}
fn default_min_dist() -> f32 {
    5.0
}
fn default_max_dist() -> f32 {
    18.0
}
fn default_requires_path() -> bool {
    true
}

impl BuildingSpec {
    /// Заявка с размерами и дистанциями по умолчанию.
    #[must_use]
    pub fn of(tile: SemanticTile, count: u32) -> Self {
        Self {
            tile,
            width: default_footprint_side(),
            height: default_footprint_side(),
            count,
            min_dist: default_min_dist(),
            max_dist: default_max_dist(),
            requires_path: true,
        }
    }
}

/// Полная конфигурация одного прогона генерации.
///
/// Поддерживает загрузку из TOML-файла (`from_toml_file`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Ширина карты в ячейках (по умолчанию 50)
    #[serde(default = "default_map_side")]
    pub map_width: u32,

    /// Высота карты в ячейках (по умолчанию 50)
    #[serde(default = "default_map_side")]
    pub map_height: u32,

    /// Толщина кольца границы; внутренний ряд кольца — стена,
    /// остальное — лесная кромка
    #[serde(default = "default_border_thickness")]
    pub border_thickness: u32,

    /// Сторона городской площади
    #[serde(default = "default_square_size")]
    pub square_size: u32,

    /// Строить ли городскую площадь в центре
    #[serde(default = "default_center_square")]
    pub center_square: bool,

    /// Упорядоченный список заявок на здания
    #[serde(default = "default_buildings")]
    pub buildings: Vec<BuildingSpec>,

    /// Зарезервировано: плотность сети троп
    #[serde(default)]
    pub path_density: f32,

    /// Зарезервировано: ширина троп в ячейках
    #[serde(default = "default_path_width")]
    pub path_width: u32,

    /// Доля свободной травы под деревья, в [0, 1]
    #[serde(default = "default_tree_density")]
    pub tree_density: f32,

    /// Доля оставшейся травы под цветы, в [0, 1]
    #[serde(default = "default_flower_density")]
    pub flower_density: f32,

    /// Сид генератора случайных чисел
    #[serde(default)]
    pub seed: u64,

    /// Игнорировать `seed` и взять случайный (фактический сид попадает
    /// в итоговый отчёт)
    #[serde(default)]
    pub use_random_seed: bool,
}

fn default_map_side() -> u32 {
    50
}
fn default_border_thickness() -> u32 {
    2
}
fn default_square_size() -> u32 {
    7
}
fn default_center_square() -> bool {
    true
}
fn default_path_width() -> u32 {
    1
}
fn default_tree_density() -> f32 {
    0.08
}
fn default_flower_density() -> f32 {
    0.05
}

/// Состав деревни по умолчанию: дом игрока, дом старосты, лавка, гильдия
/// и несколько жилых домов.
fn default_buildings() -> Vec<BuildingSpec> {
    vec![
        BuildingSpec {
            width: 4,
            height: 4,
            max_dist: 14.0,
            ..BuildingSpec::of(SemanticTile::PlayerHouse, 1)
        },
        BuildingSpec {
            width: 4,
            height: 4,
            ..BuildingSpec::of(SemanticTile::ChiefHouse, 1)
        },
        BuildingSpec::of(SemanticTile::Shop, 1),
        BuildingSpec {
            width: 4,
            ..BuildingSpec::of(SemanticTile::Guild, 1)
        },
        BuildingSpec::of(SemanticTile::House1, 2),
        BuildingSpec::of(SemanticTile::House2, 2),
    ]
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            map_width: 50,
            map_height: 50,
            border_thickness: 2,
            square_size: 7,
            center_square: true,
            buildings: default_buildings(),
            path_density: 0.0,
            path_width: 1,
            tree_density: 0.08,
            flower_density: 0.05,
            seed: 0,
            use_random_seed: false,
        }
    }
}

impl GenerationSettings {
    /// Загружает настройки из TOML-файла.
    ///
    /// # Пример
    /// ```toml
    /// # village.toml
    /// map_width = 64
    /// map_height = 64
    /// seed = 42
    ///
    /// [[buildings]]
    /// tile = "Shop"
    /// count = 2
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Центр карты — цель троп и опора полос дистанций.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.map_width as i32 / 2, self.map_height as i32 / 2)
    }

    /// Проверяет настройки до создания сетки. Любая ошибка здесь фатальна.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width <= 2 * self.border_thickness
            || self.map_height <= 2 * self.border_thickness
        {
            return Err(ConfigError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
                border: self.border_thickness,
            });
        }

        for (name, value) in [
            ("tree_density", self.tree_density),
            ("flower_density", self.flower_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::DensityOutOfRange { name, value });
            }
        }

        let margin = self.border_thickness as i32 + 1;
        let room_w = self.map_width as i32 - 2 * margin;
        let room_h = self.map_height as i32 - 2 * margin;
        for spec in &self.buildings {
            if spec.width == 0 || spec.height == 0 {
                return Err(ConfigError::EmptyFootprint {
                    tile: spec.tile,
                    width: spec.width,
                    height: spec.height,
                });
            }
            if spec.min_dist > spec.max_dist || spec.min_dist < 0.0 {
                return Err(ConfigError::InvertedDistanceBand {
                    tile: spec.tile,
                    min: spec.min_dist,
                    max: spec.max_dist,
                });
            }
            if spec.width as i32 > room_w || spec.height as i32 > room_h {
                return Err(ConfigError::FootprintTooLarge {
                    tile: spec.tile,
                    width: spec.width,
                    height: spec.height,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(GenerationSettings::default().validate().is_ok());
    }

    #[test]
    fn tiny_map_is_rejected() {
        let settings = GenerationSettings {
            map_width: 4,
            map_height: 4,
            ..GenerationSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MapTooSmall { .. })
        ));
    }

    #[test]
    fn density_outside_unit_interval_is_rejected() {
        let settings = GenerationSettings {
            tree_density: 1.5,
            ..GenerationSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DensityOutOfRange {
                name: "tree_density",
                ..
            })
        ));
    }

    #[test]
    fn inverted_distance_band_is_rejected() {
        let mut settings = GenerationSettings::default();
        settings.buildings[0].min_dist = 20.0;
        settings.buildings[0].max_dist = 5.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvertedDistanceBand { .. })
        ));
    }

    #[test]
    fn toml_with_defaults_parses() {
        let settings: GenerationSettings = toml::from_str(
            r#"
            seed = 7

            [[buildings]]
            tile = "Shop"
            "#,
        )
        .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.map_width, 50);
        assert_eq!(settings.buildings.len(), 1);
        assert_eq!(settings.buildings[0].count, 1);
        assert!(settings.buildings[0].requires_path);
    }
}
