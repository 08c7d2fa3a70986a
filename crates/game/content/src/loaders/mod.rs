//! Content loaders for reading game data from files.
//!
//! This module provides loaders that turn the data directory into a ready
//! [`TableRegistry`](game_tables::TableRegistry): TOML configuration plus one
//! CSV file per design table.

pub mod config;
pub mod factory;
pub mod tables;

pub use config::{ConfigLoader, TablesConfig};
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
