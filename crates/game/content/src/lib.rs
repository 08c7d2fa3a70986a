//! Data-driven content definitions and loaders.
//!
//! This crate houses the game's design tables and the loaders that read them:
//! - Table shapes (generated from CSV headers by `cargo xtask gen-shapes`)
//! - Table configuration (data-driven via TOML)
//! - Table files (one CSV per shape under `data/tables/`)
//!
//! Shapes register themselves with `game-tables`, so a registry built in any
//! binary linking this crate discovers them without further wiring.

pub mod shapes;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use shapes::{DialogueData, ItemData, LocalizationData, MonsterData};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, TablesConfig, TablesLoader};
