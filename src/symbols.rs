// src/symbols.rs
//! Символьный формат раскладки
//!
//! Авторская раскладка деревни записывается текстом: одна строка = один ряд
//! карты, один символ = одна ячейка. Ряд 0 текста — самый верхний ряд карты,
//! то есть максимальный y (вертикальный переворот относительно хранения).
//!
//! ## Разбор
//!
//! - Неизвестные символы и пробелы дают пустую ячейку (без ошибки)
//! - Строки короче ширины и нехватка строк оставляют остаток пустым
//! - Маркеры (`Spawn`) извлекаются в отдельную коллекцию, а ячейка под ними
//!   подменяется травой
//!
//! ## Сериализация
//!
//! Обратное преобразование: тайл → символ, неотображаемые тайлы выводятся
//! пробелом. Круговой обход «сетка → текст → сетка» теряет маркеры —
//! это задокументированное свойство формата, а не дефект.

use std::collections::HashMap;

use thiserror::Error;

use crate::grid::{Position, SemanticTile, SpawnKind, VillageGrid};

/// Ошибка построения таблицы символов.
#[derive(Debug, Error)]
pub enum SymbolTableError {
    #[error("symbol '{0}' is mapped to more than one tile")]
    DuplicateSymbol(char),
    #[error("tile {0:?} is mapped to more than one symbol")]
    DuplicateTile(SemanticTile),
}

/// Биекция «символ ↔ семантический тайл».
#[derive(Debug, Clone)]
pub struct SymbolTable {
    to_tile: HashMap<char, SemanticTile>,
    to_symbol: HashMap<SemanticTile, char>,
}

impl SymbolTable {
    /// Строит таблицу из пар, отвергая дубликаты в обе стороны.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (char, SemanticTile)>,
    ) -> Result<Self, SymbolTableError> {
        let mut to_tile = HashMap::new();
        let mut to_symbol = HashMap::new();
        for (symbol, tile) in pairs {
            if to_tile.insert(symbol, tile).is_some() {
                return Err(SymbolTableError::DuplicateSymbol(symbol));
            }
            if to_symbol.insert(tile, symbol).is_some() {
                return Err(SymbolTableError::DuplicateTile(tile));
            }
        }
        Ok(Self { to_tile, to_symbol })
    }

    #[must_use]
    pub fn tile_for(&self, symbol: char) -> Option<SemanticTile> {
        self.to_tile.get(&symbol).copied()
    }

    #[must_use]
    pub fn symbol_for(&self, tile: SemanticTile) -> Option<char> {
        self.to_symbol.get(&tile).copied()
    }
}

impl Default for SymbolTable {
    /// Таблица по умолчанию. Покрывает все тайлы, включая маркеры.
    fn default() -> Self {
        Self::from_pairs([
            ('.', SemanticTile::Grass),
            ('#', SemanticTile::Path),
            ('s', SemanticTile::Stone),
            ('q', SemanticTile::Plaza),
            ('w', SemanticTile::Water),
            ('W', SemanticTile::Wall),
            ('B', SemanticTile::TreeBorder),
            ('P', SemanticTile::PlayerHouse),
            ('1', SemanticTile::House1),
            ('2', SemanticTile::House2),
            ('S', SemanticTile::Shop),
            ('G', SemanticTile::Guild),
            ('C', SemanticTile::ChiefHouse),
            ('D', SemanticTile::Door),
            ('t', SemanticTile::Tree1),
            ('T', SemanticTile::Tree2),
            ('f', SemanticTile::Flower1),
            ('y', SemanticTile::Flower2),
            ('z', SemanticTile::Flower3),
            ('c', SemanticTile::Crops),
            ('F', SemanticTile::Fountain),
            ('Q', SemanticTile::QuestBoard),
            ('v', SemanticTile::Spawn(SpawnKind::Villager)),
            ('m', SemanticTile::Spawn(SpawnKind::Merchant)),
            ('g', SemanticTile::Spawn(SpawnKind::Guard)),
            ('h', SemanticTile::Spawn(SpawnKind::Chief)),
        ])
        .expect("default symbol table is a valid bijection")
    }
}

/// Результат разбора авторской раскладки.
#[derive(Debug, Clone)]
pub struct ParsedLayout {
    pub grid: VillageGrid,
    /// Извлечённые маркеры появления NPC, в порядке чтения текста.
    pub markers: Vec<(Position, SpawnKind)>,
}

/// Разбирает текстовую раскладку в семантическую сетку.
///
/// Строки сверх `height` и символы сверх `width` отбрасываются.
#[must_use]
pub fn parse_layout(
    text: &str,
    table: &SymbolTable,
    width: u32,
    height: u32,
) -> ParsedLayout {
    let mut grid = VillageGrid::new(width, height);
    let mut markers = Vec::new();

    for (row, line) in text.lines().enumerate() {
        // Ряд 0 текста — верх карты, то есть y = height - 1
        let y = height as i32 - 1 - row as i32;
        if y < 0 {
            break;
        }
        for (col, symbol) in line.chars().enumerate() {
            if col as u32 >= width {
                break;
            }
            let pos = Position::new(col as i32, y);
            match table.tile_for(symbol) {
                Some(SemanticTile::Spawn(kind)) => {
                    markers.push((pos, kind));
                    grid.set(pos, SemanticTile::Grass);
                }
                Some(tile) => grid.set(pos, tile),
                // Неизвестный символ или пробел = пустая ячейка
                None => {}
            }
        }
    }

    ParsedLayout { grid, markers }
}

/// Сериализует сетку обратно в текст (верхняя строка = максимальный y).
///
/// Маркеров в готовой сетке нет, поэтому формат необратим для них.
#[must_use]
pub fn serialize_layout(grid: &VillageGrid, table: &SymbolTable) -> String {
    let mut out = String::with_capacity((grid.width as usize + 1) * grid.height as usize);
    for y in (0..grid.height as i32).rev() {
        for x in 0..grid.width as i32 {
            let symbol = grid
                .get(Position::new(x, y))
                .and_then(|tile| table.symbol_for(tile))
                .unwrap_or(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}
