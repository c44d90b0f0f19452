// src/village/decorate.rs
//! Рассадка деревьев и цветов по свободной траве
//!
//! Пул кандидатов — все ячейки, оставшиеся базовым ландшафтом. Сначала из
//! пула без возвращения выбирается `round(пул × tree_density)` ячеек под
//! деревья (вид из двух — равновероятно), затем из оставшегося пула —
//! `round(остаток × flower_density)` под цветы (три вида). Выбранные
//! ячейки покидают пул, двойная посадка исключена.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::grid::{Position, SemanticTile, VillageGrid};

const TREE_KINDS: [SemanticTile; 2] = [SemanticTile::Tree1, SemanticTile::Tree2];
const FLOWER_KINDS: [SemanticTile; 3] = [
    SemanticTile::Flower1,
    SemanticTile::Flower2,
    SemanticTile::Flower3,
];

/// Расставляет декорации; возвращает (деревьев, цветов).
pub fn scatter_decorations(
    grid: &mut VillageGrid,
    rng: &mut ChaCha8Rng,
    tree_density: f32,
    flower_density: f32,
) -> (usize, usize) {
    // Пул собирается ряд за рядом — порядок детерминирован
    let mut pool: Vec<Position> = grid
        .cells_row_major()
        .into_iter()
        .filter(|&(_, tile)| tile.is_base_terrain())
        .map(|(pos, _)| pos)
        .collect();

    let tree_count = (pool.len() as f32 * tree_density).round() as usize;
    plant(grid, rng, &mut pool, tree_count, &TREE_KINDS);

    let flower_count = (pool.len() as f32 * flower_density).round() as usize;
    plant(grid, rng, &mut pool, flower_count, &FLOWER_KINDS);

    (tree_count, flower_count)
}

/// Выбирает `count` ячеек из пула без возвращения и засаживает их.
fn plant(
    grid: &mut VillageGrid,
    rng: &mut ChaCha8Rng,
    pool: &mut Vec<Position>,
    count: usize,
    kinds: &[SemanticTile],
) {
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let i = rng.gen_range(0..pool.len());
        let pos = pool.remove(i);
        let kind = kinds[rng.gen_range(0..kinds.len())];
        grid.set(pos, kind);
    }
}
