// src/variants.rs
//! Правила выбора конкретного рендер-тайла
//!
//! Семантический тайл описывает *что* стоит в ячейке, но не *как* это
//! рисовать: у тропы есть перекрёстки и повороты, у стены — углы. Выбором
//! занимается резолвер вариантов: у каждого семантического тайла может быть
//! «семейство» вариантов, упорядоченных по приоритету.
//!
//! ## Алгоритм
//!
//! 1. Семейство стабильно сортируется по убыванию приоритета
//!    (равные приоритеты сохраняют авторский порядок)
//! 2. Варианты проверяются по порядку; вариант подходит, если выполнены
//!    **все** его правила соседства
//! 3. Первый подошедший вариант побеждает; иначе — тайл семейства по
//!    умолчанию; у тайлов без семейства — фиксированный базовый id
//!
//! Правило соседства сравнивает тайл в относительном смещении с требуемым.
//! Отсутствующий сосед считается пустым и не равен никакому конкретному
//! тайлу. Цель `Same` сравнивает соседа с тайлом самой ячейки.
//!
//! Таблица семейств передаётся резолверу при конструировании — никакого
//! глобального реестра.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{Position, SemanticTile, VillageGrid};

/// Id рендер-тайла для ячеек, у которых нет ни семейства, ни базового id.
pub const FALLBACK_TILE_ID: u16 = 0;

/// Идентификаторы рендер-тайлов.
///
/// Базовые id идут по одному на семантический тайл, вариантные — от 100.
pub mod render_ids {
    pub const GRASS: u16 = 1;
    pub const PATH: u16 = 2;
    pub const STONE: u16 = 3;
    pub const PLAZA: u16 = 4;
    pub const WATER: u16 = 5;
    pub const WALL: u16 = 6;
    pub const TREE_BORDER: u16 = 7;
    pub const PLAYER_HOUSE: u16 = 8;
    pub const HOUSE1: u16 = 9;
    pub const HOUSE2: u16 = 10;
    pub const SHOP: u16 = 11;
    pub const GUILD: u16 = 12;
    pub const CHIEF_HOUSE: u16 = 13;
    pub const DOOR: u16 = 14;
    pub const TREE1: u16 = 15;
    pub const TREE2: u16 = 16;
    pub const FLOWER1: u16 = 17;
    pub const FLOWER2: u16 = 18;
    pub const FLOWER3: u16 = 19;
    pub const CROPS: u16 = 20;
    pub const FOUNTAIN: u16 = 21;
    pub const QUEST_BOARD: u16 = 22;
    pub const SPAWN: u16 = 23;

    pub const PATH_CROSS: u16 = 100;
    pub const PATH_TEE_NORTH: u16 = 101;
    pub const PATH_CORNER_NE: u16 = 102;
    pub const PATH_HORIZONTAL: u16 = 103;
    pub const PATH_VERTICAL: u16 = 104;
    pub const WALL_HORIZONTAL: u16 = 110;
    pub const WALL_VERTICAL: u16 = 111;
    pub const STONE_CORNER: u16 = 120;
    pub const STONE_EDGE_NORTH: u16 = 121;
    pub const WATER_SHORE: u16 = 130;
}

/// Базовый рендер-тайл семантического тайла (без учёта соседей).
#[must_use]
pub fn base_render_id(tile: SemanticTile) -> u16 {
    use render_ids as id;
    match tile {
        SemanticTile::Grass => id::GRASS,
        SemanticTile::Path => id::PATH,
        SemanticTile::Stone => id::STONE,
        SemanticTile::Plaza => id::PLAZA,
        SemanticTile::Water => id::WATER,
        SemanticTile::Wall => id::WALL,
        SemanticTile::TreeBorder => id::TREE_BORDER,
        SemanticTile::PlayerHouse => id::PLAYER_HOUSE,
        SemanticTile::House1 => id::HOUSE1,
        SemanticTile::House2 => id::HOUSE2,
        SemanticTile::Shop => id::SHOP,
        SemanticTile::Guild => id::GUILD,
        SemanticTile::ChiefHouse => id::CHIEF_HOUSE,
        SemanticTile::Door => id::DOOR,
        SemanticTile::Tree1 => id::TREE1,
        SemanticTile::Tree2 => id::TREE2,
        SemanticTile::Flower1 => id::FLOWER1,
        SemanticTile::Flower2 => id::FLOWER2,
        SemanticTile::Flower3 => id::FLOWER3,
        SemanticTile::Crops => id::CROPS,
        SemanticTile::Fountain => id::FOUNTAIN,
        SemanticTile::QuestBoard => id::QUEST_BOARD,
        SemanticTile::Spawn(_) => id::SPAWN,
    }
}

/// Требуемый тайл в правиле соседства.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborTarget {
    /// Тот же тайл, что и в проверяемой ячейке.
    Same,
    /// Конкретный семантический тайл.
    Tile(SemanticTile),
}

/// Одно правило соседства: смещение, требуемый тайл и полярность.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRule {
    pub dx: i32,
    pub dy: i32,
    pub target: NeighborTarget,
    /// `true` — сосед обязан совпасть, `false` — обязан не совпасть.
    pub matches: bool,
}

impl NeighborRule {
    #[must_use]
    pub const fn same(dx: i32, dy: i32, matches: bool) -> Self {
        Self {
            dx,
            dy,
            target: NeighborTarget::Same,
            matches,
        }
    }

    #[must_use]
    pub const fn tile(dx: i32, dy: i32, tile: SemanticTile, matches: bool) -> Self {
        Self {
            dx,
            dy,
            target: NeighborTarget::Tile(tile),
            matches,
        }
    }
}

/// Вариант рендер-тайла: id, приоритет и список правил (все обязаны
/// выполниться).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileVariant {
    pub tile_id: u16,
    pub priority: i32,
    pub rules: Vec<NeighborRule>,
}

/// Семейство вариантов одного семантического тайла.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantFamily {
    pub default_id: u16,
    pub variants: Vec<TileVariant>,
}

/// Резолвер вариантов. Не имеет побочных эффектов и не мутирует сетку.
#[derive(Debug, Clone)]
pub struct VariantResolver {
    families: HashMap<SemanticTile, VariantFamily>,
}

impl VariantResolver {
    /// Принимает таблицу семейств и один раз стабильно сортирует каждое
    /// семейство по убыванию приоритета.
    #[must_use]
    pub fn new(mut families: HashMap<SemanticTile, VariantFamily>) -> Self {
        for family in families.values_mut() {
            // sort_by_key стабилен: равные приоритеты сохраняют
            // авторский порядок
            family
                .variants
                .sort_by_key(|variant| std::cmp::Reverse(variant.priority));
        }
        Self { families }
    }

    /// Id рендер-тайла для позиции. Пустая ячейка даёт `FALLBACK_TILE_ID`.
    #[must_use]
    pub fn resolve(&self, grid: &VillageGrid, pos: Position) -> u16 {
        let Some(tile) = grid.get(pos) else {
            return FALLBACK_TILE_ID;
        };
        let Some(family) = self.families.get(&tile) else {
            return base_render_id(tile);
        };
        for variant in &family.variants {
            if variant
                .rules
                .iter()
                .all(|rule| rule_matches(grid, pos, tile, rule))
            {
                return variant.tile_id;
            }
        }
        family.default_id
    }
}

fn rule_matches(grid: &VillageGrid, pos: Position, own: SemanticTile, rule: &NeighborRule) -> bool {
    let neighbor = grid.get(pos.offset(rule.dx, rule.dy));
    let required = match rule.target {
        NeighborTarget::Same => own,
        NeighborTarget::Tile(tile) => tile,
    };
    // Отсутствующий сосед = пустота, конкретному тайлу не равен
    (neighbor == Some(required)) == rule.matches
}

/// Таблица семейств по умолчанию: автотайлинг троп, стен, периметра
/// площади и кромки воды.
#[must_use]
pub fn default_rule_table() -> HashMap<SemanticTile, VariantFamily> {
    use render_ids as id;

    let mut families = HashMap::new();

    families.insert(
        SemanticTile::Path,
        VariantFamily {
            default_id: id::PATH,
            variants: vec![
                TileVariant {
                    tile_id: id::PATH_CROSS,
                    priority: 30,
                    rules: vec![
                        NeighborRule::same(0, 1, true),
                        NeighborRule::same(0, -1, true),
                        NeighborRule::same(1, 0, true),
                        NeighborRule::same(-1, 0, true),
                    ],
                },
                TileVariant {
                    tile_id: id::PATH_TEE_NORTH,
                    priority: 20,
                    rules: vec![
                        NeighborRule::same(-1, 0, true),
                        NeighborRule::same(1, 0, true),
                        NeighborRule::same(0, 1, true),
                        NeighborRule::same(0, -1, false),
                    ],
                },
                TileVariant {
                    tile_id: id::PATH_CORNER_NE,
                    priority: 15,
                    rules: vec![
                        NeighborRule::same(0, 1, true),
                        NeighborRule::same(1, 0, true),
                        NeighborRule::same(0, -1, false),
                        NeighborRule::same(-1, 0, false),
                    ],
                },
                TileVariant {
                    tile_id: id::PATH_HORIZONTAL,
                    priority: 10,
                    rules: vec![NeighborRule::same(1, 0, true)],
                },
                TileVariant {
                    tile_id: id::PATH_VERTICAL,
                    priority: 10,
                    rules: vec![NeighborRule::same(0, 1, true)],
                },
            ],
        },
    );

    families.insert(
        SemanticTile::Wall,
        VariantFamily {
            default_id: id::WALL,
            variants: vec![
                TileVariant {
                    tile_id: id::WALL_HORIZONTAL,
                    priority: 10,
                    rules: vec![NeighborRule::same(1, 0, true)],
                },
                TileVariant {
                    tile_id: id::WALL_VERTICAL,
                    priority: 10,
                    rules: vec![NeighborRule::same(0, 1, true)],
                },
            ],
        },
    );

    families.insert(
        SemanticTile::Stone,
        VariantFamily {
            default_id: id::STONE,
            variants: vec![
                TileVariant {
                    tile_id: id::STONE_CORNER,
                    priority: 10,
                    rules: vec![NeighborRule::tile(1, 1, SemanticTile::Plaza, true)],
                },
                TileVariant {
                    tile_id: id::STONE_EDGE_NORTH,
                    priority: 5,
                    rules: vec![NeighborRule::tile(0, -1, SemanticTile::Plaza, true)],
                },
            ],
        },
    );

    families.insert(
        SemanticTile::Water,
        VariantFamily {
            default_id: id::WATER,
            variants: vec![TileVariant {
                tile_id: id::WATER_SHORE,
                priority: 10,
                rules: vec![NeighborRule::tile(0, 1, SemanticTile::Water, false)],
            }],
        },
    );

    families
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(i32, i32, SemanticTile)]) -> VillageGrid {
        let mut grid = VillageGrid::new(8, 8);
        for &(x, y, tile) in cells {
            grid.set(Position::new(x, y), tile);
        }
        grid
    }

    fn family(variants: Vec<TileVariant>) -> HashMap<SemanticTile, VariantFamily> {
        let mut families = HashMap::new();
        families.insert(
            SemanticTile::Grass,
            VariantFamily {
                default_id: 99,
                variants,
            },
        );
        families
    }

    #[test]
    fn higher_priority_wins_regardless_of_authoring_order() {
        // Авторский порядок приоритетов: [3, 1, 2] — оценка идёт [3, 2, 1]
        let resolver = VariantResolver::new(family(vec![
            TileVariant {
                tile_id: 203,
                priority: 3,
                rules: vec![],
            },
            TileVariant {
                tile_id: 201,
                priority: 1,
                rules: vec![],
            },
            TileVariant {
                tile_id: 202,
                priority: 2,
                rules: vec![],
            },
        ]));
        let grid = grid_with(&[(1, 1, SemanticTile::Grass)]);
        assert_eq!(resolver.resolve(&grid, Position::new(1, 1)), 203);
    }

    #[test]
    fn equal_priorities_keep_authoring_order() {
        let never = NeighborRule::tile(0, 1, SemanticTile::Fountain, true);
        let resolver = VariantResolver::new(family(vec![
            TileVariant {
                tile_id: 210,
                priority: 5,
                rules: vec![never],
            },
            TileVariant {
                tile_id: 211,
                priority: 5,
                rules: vec![],
            },
            TileVariant {
                tile_id: 212,
                priority: 5,
                rules: vec![],
            },
        ]));
        let grid = grid_with(&[(1, 1, SemanticTile::Grass)]);
        // 210 не подходит по правилу, из равных 211/212 побеждает первый
        assert_eq!(resolver.resolve(&grid, Position::new(1, 1)), 211);
    }

    #[test]
    fn same_target_compares_with_own_tile() {
        let resolver = VariantResolver::new(family(vec![TileVariant {
            tile_id: 220,
            priority: 1,
            rules: vec![NeighborRule::same(1, 0, true)],
        }]));
        let with_same = grid_with(&[
            (1, 1, SemanticTile::Grass),
            (2, 1, SemanticTile::Grass),
        ]);
        let with_other = grid_with(&[
            (1, 1, SemanticTile::Grass),
            (2, 1, SemanticTile::Path),
        ]);
        assert_eq!(resolver.resolve(&with_same, Position::new(1, 1)), 220);
        assert_eq!(resolver.resolve(&with_other, Position::new(1, 1)), 99);
    }

    #[test]
    fn absent_neighbor_is_empty_not_a_match() {
        let resolver = VariantResolver::new(family(vec![TileVariant {
            tile_id: 230,
            priority: 1,
            rules: vec![NeighborRule::tile(0, 1, SemanticTile::Water, false)],
        }]));
        // Соседа нет вообще: «не совпадает с водой» выполняется
        let grid = grid_with(&[(1, 1, SemanticTile::Grass)]);
        assert_eq!(resolver.resolve(&grid, Position::new(1, 1)), 230);
    }

    #[test]
    fn unregistered_family_uses_base_render_id() {
        let resolver = VariantResolver::new(HashMap::new());
        let grid = grid_with(&[(1, 1, SemanticTile::Fountain)]);
        assert_eq!(
            resolver.resolve(&grid, Position::new(1, 1)),
            base_render_id(SemanticTile::Fountain)
        );
    }

    #[test]
    fn empty_cell_resolves_to_fallback() {
        let resolver = VariantResolver::new(default_rule_table());
        let grid = VillageGrid::new(4, 4);
        assert_eq!(resolver.resolve(&grid, Position::new(0, 0)), FALLBACK_TILE_ID);
    }

    #[test]
    fn default_table_picks_path_cross() {
        let resolver = VariantResolver::new(default_rule_table());
        let grid = grid_with(&[
            (2, 2, SemanticTile::Path),
            (2, 3, SemanticTile::Path),
            (2, 1, SemanticTile::Path),
            (1, 2, SemanticTile::Path),
            (3, 2, SemanticTile::Path),
        ]);
        assert_eq!(
            resolver.resolve(&grid, Position::new(2, 2)),
            render_ids::PATH_CROSS
        );
        // Западный конец: продолжение только на восток
        assert_eq!(
            resolver.resolve(&grid, Position::new(1, 2)),
            render_ids::PATH_HORIZONTAL
        );
    }
}
