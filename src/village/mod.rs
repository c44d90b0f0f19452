// src/village/mod.rs
pub mod decorate;
pub mod paths;
pub mod pipeline;
pub mod placement;

pub use pipeline::{Village, generate, generate_with_seed};
pub use placement::{MAX_PLACEMENT_TRIES, Rect};
