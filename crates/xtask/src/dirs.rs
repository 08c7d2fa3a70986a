//! Data directory resolution
//!
//! Commands look for design data in this order:
//! 1. `--data-dir` argument
//! 2. `TABLES_DATA_DIR` environment variable (also read from `.env`)
//! 3. The data directory bundled with `game-content`

use std::path::PathBuf;

use anyhow::Result;
use game_content::{ContentFactory, TablesConfig};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TABLES_DATA_DIR";

/// Resolve the data directory from an optional CLI override.
pub fn data_dir(cli: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = cli {
        return dir;
    }
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ContentFactory::bundled().data_dir().to_path_buf(),
    }
}

/// Factory and configuration for a data directory.
pub fn open(cli: Option<PathBuf>) -> Result<(ContentFactory, TablesConfig)> {
    let factory = ContentFactory::new(data_dir(cli));
    let config = factory.load_config()?;
    Ok((factory, config))
}
