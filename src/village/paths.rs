// src/village/paths.rs
//! Прокладка троп от ключевых точек к центру деревни
//!
//! Ключевые точки — двери зданий и южный выход с карты. От каждой жадный
//! шагатель идёт к цели: сначала полностью гасится смещение по x, затем
//! по y. Это намеренно не кратчайший маршрут и не обход препятствий:
//! в тропу превращается только базовый ландшафт (трава), здания, граница
//! и площадь никогда не перезаписываются.

use crate::grid::{Position, SemanticTile, VillageGrid};

/// Прокладывает тропу от `from` до `target` (обе точки исключая/включая
/// по пути). Перезаписываются только ячейки травы.
pub fn carve_path(grid: &mut VillageGrid, from: Position, target: Position) {
    let mut current = from;

    while current != target {
        // Сначала весь x, затем весь y
        if current.x != target.x {
            current.x += (target.x - current.x).signum();
        } else {
            current.y += (target.y - current.y).signum();
        }
        carve_cell(grid, current);
    }
}

/// Прокладывает тропы от всех ключевых точек к одной цели.
pub fn carve_all(grid: &mut VillageGrid, key_points: &[Position], target: Position) {
    for &point in key_points {
        carve_path(grid, point, target);
    }
}

fn carve_cell(grid: &mut VillageGrid, pos: Position) {
    if grid
        .get(pos)
        .is_some_and(SemanticTile::is_base_terrain)
    {
        grid.set(pos, SemanticTile::Path);
    }
}
