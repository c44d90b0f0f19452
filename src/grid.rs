// src/grid.rs
//! Семантическая сетка деревни
//!
//! Сетка хранится разреженно: позиция → семантический тайл.
//! Незаполненные позиции считаются пустыми (Empty) — отдельного варианта
//! для пустоты в перечислении нет, пустота = отсутствие записи.
//!
//! Сетка принадлежит ровно одному прогону генерации: каждый прогон создаёт
//! свою сетку с нуля и при неудаче отбрасывает её целиком.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Целочисленная координата ячейки сетки.
///
/// Ряд y=0 — южный край карты (выход из деревни), y растёт на север.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Позиция, смещённая на (dx, dy).
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Вид точки появления NPC (маркер, извлекаемый парсером).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    Villager,
    Merchant,
    Guard,
    Chief,
}

/// Семантический тайл — закрытое перечисление категорий ячеек.
///
/// Маркеры (`Spawn`) в готовой сетке не встречаются: парсер извлекает их
/// в отдельную коллекцию и подменяет ячейку травой.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticTile {
    // Ландшафт
    Grass,
    Path,
    Stone,
    Plaza,
    Water,
    // Граница карты
    Wall,
    TreeBorder,
    // Здания
    PlayerHouse,
    House1,
    House2,
    Shop,
    Guild,
    ChiefHouse,
    Door,
    // Природа и декорации
    Tree1,
    Tree2,
    Flower1,
    Flower2,
    Flower3,
    Crops,
    // Особые объекты
    Fountain,
    QuestBoard,
    // Маркеры
    Spawn(SpawnKind),
}

impl SemanticTile {
    /// Базовый ландшафт — единственное, что разрешено перезаписывать
    /// тропами и декорациями.
    #[must_use]
    pub fn is_base_terrain(self) -> bool {
        matches!(self, SemanticTile::Grass)
    }

    /// Тайлы зданий, до которых обязана доходить проверка достижимости.
    #[must_use]
    pub fn is_required_reachable(self) -> bool {
        matches!(
            self,
            SemanticTile::Shop | SemanticTile::Guild | SemanticTile::ChiefHouse
        )
    }
}

/// Разреженная семантическая сетка деревни.
#[derive(Debug, Clone, PartialEq)]
pub struct VillageGrid {
    pub width: u32,
    pub height: u32,
    cells: HashMap<Position, SemanticTile>,
}

impl VillageGrid {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Тайл в позиции; `None` = пустая ячейка.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<SemanticTile> {
        self.cells.get(&pos).copied()
    }

    /// Записывает тайл. Позиции вне границ молча игнорируются —
    /// все вызывающие обязаны сами держаться в пределах карты.
    pub fn set(&mut self, pos: Position, tile: SemanticTile) {
        if self.in_bounds(pos) {
            self.cells.insert(pos, tile);
        }
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Заполняет прямоугольник одним тайлом (с отсечением по границам).
    pub fn fill_rect(&mut self, x0: i32, y0: i32, w: i32, h: i32, tile: SemanticTile) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(Position::new(x0 + dx, y0 + dy), tile);
            }
        }
    }

    /// Занятые ячейки в детерминированном порядке: ряд за рядом, с юга
    /// на север. HashMap сам по себе порядок не гарантирует, поэтому все
    /// экспортёры и проверки ходят через этот метод.
    #[must_use]
    pub fn cells_row_major(&self) -> Vec<(Position, SemanticTile)> {
        let mut out = Vec::with_capacity(self.cells.len());
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Position::new(x, y);
                if let Some(tile) = self.get(pos) {
                    out.push((pos, tile));
                }
            }
        }
        out
    }

    /// Все позиции заданного тайла, ряд за рядом.
    #[must_use]
    pub fn positions_of(&self, tile: SemanticTile) -> Vec<Position> {
        self.cells_row_major()
            .into_iter()
            .filter(|&(_, t)| t == tile)
            .map(|(p, _)| p)
            .collect()
    }

    /// Есть ли на карте хотя бы одна ячейка с данным тайлом.
    #[must_use]
    pub fn contains_tile(&self, tile: SemanticTile) -> bool {
        self.cells.values().any(|&t| t == tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_are_empty() {
        let grid = VillageGrid::new(4, 4);
        assert_eq!(grid.get(Position::new(1, 1)), None);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = VillageGrid::new(4, 4);
        grid.set(Position::new(-1, 0), SemanticTile::Grass);
        grid.set(Position::new(4, 0), SemanticTile::Grass);
        grid.set(Position::new(0, 7), SemanticTile::Grass);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut grid = VillageGrid::new(4, 4);
        grid.fill_rect(2, 2, 5, 5, SemanticTile::Water);
        // Внутри карты остаётся только квадрат 2×2
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(grid.get(Position::new(3, 3)), Some(SemanticTile::Water));
    }

    #[test]
    fn row_major_order_is_stable() {
        let mut grid = VillageGrid::new(3, 3);
        grid.set(Position::new(2, 2), SemanticTile::Shop);
        grid.set(Position::new(0, 0), SemanticTile::Grass);
        grid.set(Position::new(1, 0), SemanticTile::Path);
        let cells = grid.cells_row_major();
        let positions: Vec<Position> = cells.iter().map(|&(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 2)
            ]
        );
    }
}
