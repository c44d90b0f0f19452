pub mod config;
pub mod error;
pub mod grid;
pub mod layers;
pub mod render;
pub mod symbols;
pub mod validate;
pub mod variants;
pub mod village;

pub use config::{BuildingSpec, GenerationSettings};
pub use error::{ConfigError, GenerationError, GenerationWarning};
pub use grid::{Position, SemanticTile, SpawnKind, VillageGrid};
pub use symbols::{SymbolTable, parse_layout, serialize_layout};
pub use variants::{VariantResolver, default_rule_table};
pub use village::{Village, generate, generate_with_seed};
