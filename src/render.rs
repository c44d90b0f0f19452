// src/render.rs
//! Передача готовой сетки на отрисовку
//!
//! Ядро не рисует пиксели и не строит коллайдеры: для каждой занятой
//! ячейки наружу отдаётся кортеж (позиция, id рендер-тайла, слой, флаг
//! блокировки), остальное — забота рендерера.
//!
//! Для отладки сетку можно сохранить в PNG с палитрой по тайлам —
//! удобно диффать прогоны глазами.

use image::{ImageBuffer, Rgb};

use crate::grid::{Position, SemanticTile, VillageGrid};
use crate::layers::{Layer, classify};
use crate::variants::VariantResolver;

/// Одна ячейка в передаче на отрисовку.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub position: Position,
    pub tile_id: u16,
    pub layer: Layer,
    pub blocks: bool,
}

/// Кортежи отрисовки для всех занятых ячеек, ряд за рядом.
#[must_use]
pub fn render_cells(grid: &VillageGrid, resolver: &VariantResolver) -> Vec<RenderCell> {
    grid.cells_row_major()
        .into_iter()
        .map(|(position, tile)| {
            let (layer, blocks) = classify(tile);
            RenderCell {
                position,
                tile_id: resolver.resolve(grid, position),
                layer,
                blocks,
            }
        })
        .collect()
}

/// Отладочная палитра тайлов.
#[must_use]
pub fn tile_rgb(tile: SemanticTile) -> [u8; 3] {
    match tile {
        SemanticTile::Grass => [96, 160, 64],
        SemanticTile::Path => [168, 136, 88],
        SemanticTile::Stone => [140, 140, 140],
        SemanticTile::Plaza => [180, 170, 150],
        SemanticTile::Water => [48, 96, 160],
        SemanticTile::Wall => [90, 90, 100],
        SemanticTile::TreeBorder => [24, 64, 24],
        SemanticTile::PlayerHouse => [200, 80, 60],
        SemanticTile::House1 => [170, 110, 70],
        SemanticTile::House2 => [150, 100, 90],
        SemanticTile::Shop => [210, 170, 60],
        SemanticTile::Guild => [120, 80, 160],
        SemanticTile::ChiefHouse => [180, 60, 120],
        SemanticTile::Door => [240, 220, 140],
        SemanticTile::Tree1 => [40, 110, 40],
        SemanticTile::Tree2 => [60, 130, 50],
        SemanticTile::Flower1 => [230, 100, 120],
        SemanticTile::Flower2 => [230, 200, 80],
        SemanticTile::Flower3 => [170, 120, 220],
        SemanticTile::Crops => [140, 170, 60],
        SemanticTile::Fountain => [100, 180, 220],
        SemanticTile::QuestBoard => [120, 90, 50],
        SemanticTile::Spawn(_) => [255, 0, 255],
    }
}

/// Сохраняет сетку в PNG (одна ячейка = один пиксель, верх картинки =
/// максимальный y). Пустые ячейки — тёмный фон.
pub fn save_as_png(grid: &VillageGrid, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let img = ImageBuffer::from_fn(grid.width, grid.height, |x, y| {
        // Переворот: ряд 0 картинки — северный край карты
        let pos = Position::new(x as i32, grid.height as i32 - 1 - y as i32);
        match grid.get(pos) {
            Some(tile) => Rgb(tile_rgb(tile)),
            None => Rgb([16, 16, 16]),
        }
    });
    img.save(path)?;
    Ok(())
}
