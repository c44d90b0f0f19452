// src/village/placement.rs
//! Выборка мест под здания методом принятия/отклонения
//!
//! Кандидат строится от центра карты: равномерный угол в [0, 2π) и
//! равномерная дистанция в полосе [min, max] дают точку, вокруг которой
//! центрируется прямоугольник здания. Кандидат принимается, если он не
//! пересекается ни с одним уже занятым прямоугольником (включая городскую
//! площадь) и целиком лежит внутри отступа от границы.
//!
//! Отступ — фиксированный `border_thickness + 1` со всех сторон, без
//! масштабирования под размер здания: у дальнего края полосы крупные
//! здания из-за этого отбраковываются чаще. Поведение сохранено как есть.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// Потолок попыток на один экземпляр здания.
pub const MAX_PLACEMENT_TRIES: u32 = 100;

/// Прямоугольник в координатах сетки (x, y — юго-западный угол).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Стандартное пересечение выровненных прямоугольников.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Ячейка горизонтального центра на ряд южнее прямоугольника —
    /// сюда ставится дверь здания (с отсечением на y = 0).
    #[must_use]
    pub fn door_position(&self) -> Position {
        Position::new(self.x + self.width / 2, (self.y - 1).max(0))
    }
}

/// Входные данные одной выборки: чистая функция от них и курсора RNG.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest {
    pub center: Position,
    pub min_dist: f32,
    pub max_dist: f32,
    pub footprint: (i32, i32),
    pub map_width: i32,
    pub map_height: i32,
    /// Отступ от краёв карты (border_thickness + 1).
    pub margin: i32,
}

/// До `MAX_PLACEMENT_TRIES` попыток найти свободный прямоугольник.
/// `None` = исчерпание (мягкий сбой, решает вызывающий).
#[must_use]
pub fn sample_footprint(
    rng: &mut ChaCha8Rng,
    request: &PlacementRequest,
    occupied: &[Rect],
) -> Option<Rect> {
    let (w, h) = request.footprint;

    for _ in 0..MAX_PLACEMENT_TRIES {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let dist = rng.gen_range(request.min_dist..=request.max_dist);

        let cx = request.center.x as f32 + angle.cos() * dist;
        let cy = request.center.y as f32 + angle.sin() * dist;
        let candidate = Rect::new(
            cx.round() as i32 - w / 2,
            cy.round() as i32 - h / 2,
            w,
            h,
        );

        if !inside_margin(&candidate, request) {
            continue;
        }
        if occupied.iter().any(|rect| rect.intersects(&candidate)) {
            continue;
        }
        return Some(candidate);
    }

    None
}

fn inside_margin(rect: &Rect, request: &PlacementRequest) -> bool {
    rect.x >= request.margin
        && rect.y >= request.margin
        && rect.x + rect.width <= request.map_width - request.margin
        && rect.y + rect.height <= request.map_height - request.margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn request() -> PlacementRequest {
        PlacementRequest {
            center: Position::new(25, 25),
            min_dist: 5.0,
            max_dist: 20.0,
            footprint: (3, 3),
            map_width: 50,
            map_height: 50,
            margin: 3,
        }
    }

    #[test]
    fn accepted_rect_respects_margin_and_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rect = sample_footprint(&mut rng, &request(), &[]).expect("free map has room");
        assert!(rect.x >= 3 && rect.y >= 3);
        assert!(rect.x + rect.width <= 47 && rect.y + rect.height <= 47);
    }

    #[test]
    fn rejects_overlap_with_occupied_rects() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // Всё кольцо допустимых мест занято одним гигантским прямоугольником
        let blocker = Rect::new(0, 0, 50, 50);
        assert_eq!(sample_footprint(&mut rng, &request(), &[blocker]), None);
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            sample_footprint(&mut a, &request(), &[]),
            sample_footprint(&mut b, &request(), &[])
        );
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(3, 0, 3, 3);
        assert!(!a.intersects(&b));
        let c = Rect::new(2, 2, 3, 3);
        assert!(a.intersects(&c));
    }

    #[test]
    fn door_sits_south_of_horizontal_center_clipped_at_zero() {
        let rect = Rect::new(10, 5, 3, 3);
        assert_eq!(rect.door_position(), Position::new(11, 4));
        let at_edge = Rect::new(10, 0, 3, 3);
        assert_eq!(at_edge.door_position(), Position::new(11, 0));
    }
}
