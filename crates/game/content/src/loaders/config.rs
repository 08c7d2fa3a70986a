//! Table loading configuration loader.

use std::path::{Path, PathBuf};

use game_tables::RegistryConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Contents of `tables.toml`.
///
/// Registry settings (layout, shape suffix, key columns) sit at the top level
/// next to the directory settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Table directory, relative to the data directory.
    pub directory: PathBuf,
    /// File extension of table files, without the dot.
    pub extension: String,
    #[serde(flatten)]
    pub registry: RegistryConfig,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("tables"),
            extension: "csv".to_string(),
            registry: RegistryConfig::default(),
        }
    }
}

/// Loader for table configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing TablesConfig
    pub fn load(path: &Path) -> LoadResult<TablesConfig> {
        let content = read_file(path)?;
        let config: TablesConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables config TOML: {}", e))?;

        config
            .registry
            .layout
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid table layout in {}: {}", path.display(), e))?;

        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<TablesConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(TablesConfig::default())
        }
    }
}
