// src/village/pipeline.rs
//! Конвейер генерации деревни
//!
//! Детерминированная последовательность стадий над одной сеткой:
//!
//! 1. Заливка базовым ландшафтом (травой)
//! 2. Граница: лесная кромка снаружи, кольцо стены внутри, дверь-выход
//!    на южной кромке и ячейка тропы сразу к северу от неё
//! 3. Городская площадь (опционально): камень по периметру, мостовая
//!    внутри, фонтан в центре, доска заданий южнее фонтана
//! 4. Здания через выборку принятия/отклонения; исчерпание попыток —
//!    мягкий сбой, экземпляр пропускается
//! 5. Тропы от дверей и южного выхода к центру площади
//! 6. Декорации по плотностям
//! 7. Валидация; единственный авточинимый случай — отсутствие дома игрока
//! 8. Коммит: сетка уходит вызывающему вместе с отчётом
//!
//! Один прогон владеет своей сеткой и своим потоком RNG эксклюзивно;
//! прерывания нет — неудачный прогон отбрасывается и перезапускается
//! с новым сидом целиком.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationSettings;
use crate::error::{GenerationError, GenerationWarning};
use crate::grid::{Position, SemanticTile, VillageGrid};
use crate::validate::{ValidationReport, validate};
use crate::village::decorate::scatter_decorations;
use crate::village::paths::carve_all;
use crate::village::placement::{
    MAX_PLACEMENT_TRIES, PlacementRequest, Rect, sample_footprint,
};

/// Готовая деревня: сетка плюс отчёт о прогоне.
#[derive(Debug, Clone)]
pub struct Village {
    pub grid: VillageGrid,
    /// Фактический сид прогона (важно при `use_random_seed`).
    pub seed: u64,
    /// Мягкие сбои и авточинки.
    pub warnings: Vec<GenerationWarning>,
    /// Принятые прямоугольники: площадь (если есть) и здания.
    pub footprints: Vec<Rect>,
}

/// Генерирует деревню по настройкам. Сид берётся из настроек либо,
/// при `use_random_seed`, случайный.
pub fn generate(settings: &GenerationSettings) -> Result<Village, GenerationError> {
    let seed = if settings.use_random_seed {
        rand::random::<u64>()
    } else {
        settings.seed
    };
    generate_with_seed(settings, seed)
}

/// Генерирует деревню с явным сидом: один и тот же сид при одних и тех же
/// настройках даёт побитово идентичную сетку.
pub fn generate_with_seed(
    settings: &GenerationSettings,
    seed: u64,
) -> Result<Village, GenerationError> {
    settings.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = VillageGrid::new(settings.map_width, settings.map_height);
    let mut warnings = Vec::new();
    let mut footprints = Vec::new();
    let mut key_points = Vec::new();

    fill_base(&mut grid);
    build_border(&mut grid, settings.border_thickness as i32);

    if settings.center_square {
        footprints.push(build_square(&mut grid, settings));
    }

    place_buildings(
        &mut grid,
        &mut rng,
        settings,
        &mut footprints,
        &mut key_points,
        &mut warnings,
    );

    // Южный выход — всегда ключевая точка
    key_points.push(Position::new(grid.width as i32 / 2, 0));
    carve_all(&mut grid, &key_points, settings.center());

    scatter_decorations(
        &mut grid,
        &mut rng,
        settings.tree_density,
        settings.flower_density,
    );

    let report = finalize(&mut grid, settings, &mut warnings, &mut footprints);
    if !report.passed() {
        return Err(GenerationError::Validation(report));
    }

    Ok(Village {
        grid,
        seed,
        warnings,
        footprints,
    })
}

/// Стадия 1: вся карта — трава.
fn fill_base(grid: &mut VillageGrid) {
    grid.fill_rect(0, 0, grid.width as i32, grid.height as i32, SemanticTile::Grass);
}

/// Стадия 2: граница и гарантированный выход.
///
/// Кольца на расстоянии d от края: d < thickness - 1 — лесная кромка,
/// d = thickness - 1 — стена. Дверь на (width/2, 0) и тропа на ряд
/// севернее дают минимальную связку «выход → внутренность» независимо
/// от дальнейших стадий.
fn build_border(grid: &mut VillageGrid, thickness: i32) {
    let (w, h) = (grid.width as i32, grid.height as i32);
    for y in 0..h {
        for x in 0..w {
            let edge_dist = x.min(y).min(w - 1 - x).min(h - 1 - y);
            if edge_dist < thickness {
                let tile = if edge_dist == thickness - 1 {
                    SemanticTile::Wall
                } else {
                    SemanticTile::TreeBorder
                };
                grid.set(Position::new(x, y), tile);
            }
        }
    }

    grid.set(Position::new(w / 2, 0), SemanticTile::Door);
    grid.set(Position::new(w / 2, 1), SemanticTile::Path);
}

/// Стадия 3: городская площадь в центре карты.
fn build_square(grid: &mut VillageGrid, settings: &GenerationSettings) -> Rect {
    let size = settings.square_size as i32;
    let center = settings.center();
    let rect = Rect::new(center.x - size / 2, center.y - size / 2, size, size);

    for dy in 0..size {
        for dx in 0..size {
            let on_perimeter = dx == 0 || dy == 0 || dx == size - 1 || dy == size - 1;
            let tile = if on_perimeter {
                SemanticTile::Stone
            } else {
                SemanticTile::Plaza
            };
            grid.set(Position::new(rect.x + dx, rect.y + dy), tile);
        }
    }

    grid.set(center, SemanticTile::Fountain);
    grid.set(center.offset(0, -1), SemanticTile::QuestBoard);
    rect
}

/// Стадия 4: здания.
fn place_buildings(
    grid: &mut VillageGrid,
    rng: &mut ChaCha8Rng,
    settings: &GenerationSettings,
    footprints: &mut Vec<Rect>,
    key_points: &mut Vec<Position>,
    warnings: &mut Vec<GenerationWarning>,
) {
    let margin = settings.border_thickness as i32 + 1;

    for spec in &settings.buildings {
        for index in 0..spec.count {
            let request = PlacementRequest {
                center: settings.center(),
                min_dist: spec.min_dist,
                max_dist: spec.max_dist,
                footprint: (spec.width as i32, spec.height as i32),
                map_width: settings.map_width as i32,
                map_height: settings.map_height as i32,
                margin,
            };
            match sample_footprint(rng, &request, footprints) {
                Some(rect) => {
                    stamp_building(grid, rect, spec.tile);
                    footprints.push(rect);
                    if spec.requires_path {
                        key_points.push(rect.door_position());
                    }
                }
                None => warnings.push(GenerationWarning::PlacementExhausted {
                    tile: spec.tile,
                    index,
                    tries: MAX_PLACEMENT_TRIES,
                }),
            }
        }
    }
}

fn stamp_building(grid: &mut VillageGrid, rect: Rect, tile: SemanticTile) {
    grid.fill_rect(rect.x, rect.y, rect.width, rect.height, tile);
    grid.set(rect.door_position(), SemanticTile::Door);
}

/// Стадии 7–8: валидация с единственной авточинкой и вердикт.
fn finalize(
    grid: &mut VillageGrid,
    settings: &GenerationSettings,
    warnings: &mut Vec<GenerationWarning>,
    footprints: &mut Vec<Rect>,
) -> ValidationReport {
    let report = validate(grid);
    if !report.only_missing_player_house() {
        return report;
    }

    // Вставка обязана уважать уже принятые прямоугольники: если у выхода
    // нет свободного места, сбой остаётся жёстким
    let Some(rect) = insert_default_player_house(grid, settings, footprints) else {
        return report;
    };
    warnings.push(GenerationWarning::PlayerHouseInserted {
        x: rect.x,
        y: rect.y,
    });
    footprints.push(rect);
    // Повторная проверка одна: если не помогло — жёсткий сбой
    validate(grid)
}

/// Стандартный дом игрока 3×3 у выхода: предпочтительно первый внутренний
/// ряд за стеной, дверью на тропу к выходу. Место подбирается детерминированно
/// от предпочтительного: сдвиг вдоль ряда в обе стороны, затем ряд севернее;
/// кандидат, пересекающий принятый прямоугольник или отступ границы,
/// отбрасывается. `None` = свободного места нет вообще.
fn insert_default_player_house(
    grid: &mut VillageGrid,
    settings: &GenerationSettings,
    occupied: &[Rect],
) -> Option<Rect> {
    let margin = settings.border_thickness as i32 + 1;
    let (w, h) = (settings.map_width as i32, settings.map_height as i32);
    let base_x = w / 2 - 1;

    for y in margin..=(h - margin - 3) {
        for shift in 0..=(w - 2 * margin) {
            for x in [base_x + shift, base_x - shift] {
                if x < margin || x + 3 > w - margin {
                    continue;
                }
                let rect = Rect::new(x, y, 3, 3);
                if occupied.iter().any(|other| other.intersects(&rect)) {
                    continue;
                }
                stamp_building(grid, rect, SemanticTile::PlayerHouse);
                return Some(rect);
            }
        }
    }

    None
}
