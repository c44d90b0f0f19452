// src/layers.rs
use serde::{Deserialize, Serialize};

use crate::grid::SemanticTile;

/// Слой отрисовки ячейки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Ground,
    Building,
    Decoration,
}

/// Классификация тайла: слой отрисовки + флаг блокировки движения.
///
/// Сопоставление тотально и проверяется компилятором: добавление нового
/// тайла без ветки здесь не скомпилируется. Ветки с подстановочным
/// образцом запрещены намеренно.
#[must_use]
pub fn classify(tile: SemanticTile) -> (Layer, bool) {
    match tile {
        // Проходимый ландшафт
        SemanticTile::Grass => (Layer::Ground, false),
        SemanticTile::Path => (Layer::Ground, false),
        SemanticTile::Stone => (Layer::Ground, false),
        SemanticTile::Plaza => (Layer::Ground, false),
        SemanticTile::Water => (Layer::Ground, true),
        // Граница карты непроходима целиком
        SemanticTile::Wall => (Layer::Building, true),
        SemanticTile::TreeBorder => (Layer::Decoration, true),
        // Здания блокируют, двери проходимы
        SemanticTile::PlayerHouse => (Layer::Building, true),
        SemanticTile::House1 => (Layer::Building, true),
        SemanticTile::House2 => (Layer::Building, true),
        SemanticTile::Shop => (Layer::Building, true),
        SemanticTile::Guild => (Layer::Building, true),
        SemanticTile::ChiefHouse => (Layer::Building, true),
        SemanticTile::Door => (Layer::Building, false),
        // Природа: деревья блокируют, цветы и грядки нет
        SemanticTile::Tree1 => (Layer::Decoration, true),
        SemanticTile::Tree2 => (Layer::Decoration, true),
        SemanticTile::Flower1 => (Layer::Decoration, false),
        SemanticTile::Flower2 => (Layer::Decoration, false),
        SemanticTile::Flower3 => (Layer::Decoration, false),
        SemanticTile::Crops => (Layer::Decoration, false),
        // Особые объекты
        SemanticTile::Fountain => (Layer::Building, true),
        SemanticTile::QuestBoard => (Layer::Building, true),
        // Маркеры в готовой сетке не живут, но сопоставление тотально
        SemanticTile::Spawn(_) => (Layer::Ground, false),
    }
}

/// Блокирует ли тайл движение.
#[must_use]
pub fn blocks_movement(tile: SemanticTile) -> bool {
    classify(tile).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_are_walkable_buildings() {
        assert_eq!(classify(SemanticTile::Door), (Layer::Building, false));
    }

    #[test]
    fn terrain_is_walkable_except_water() {
        assert!(!blocks_movement(SemanticTile::Grass));
        assert!(!blocks_movement(SemanticTile::Path));
        assert!(!blocks_movement(SemanticTile::Plaza));
        assert!(blocks_movement(SemanticTile::Water));
    }

    #[test]
    fn border_blocks_movement() {
        assert!(blocks_movement(SemanticTile::Wall));
        assert!(blocks_movement(SemanticTile::TreeBorder));
    }
}
