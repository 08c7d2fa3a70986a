//! Content factory for loading design tables from a data directory.

use std::path::{Path, PathBuf};

use game_tables::{LoadReport, TableRegistry};

use crate::loaders::{ConfigLoader, LoadResult, TablesConfig, TablesLoader};

/// Content factory that loads all design tables from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml      (optional)
/// └── tables/
///     ├── Dialogue.csv
///     ├── Item.csv
///     ├── Localization.csv
///     └── Monster.csv
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates a factory for the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load table configuration from `tables.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<TablesConfig> {
        let path = self.data_dir.join("tables.toml");
        ConfigLoader::load_or_default(&path)
    }

    /// Directory holding the table files for `config`.
    pub fn tables_dir(&self, config: &TablesConfig) -> PathBuf {
        self.data_dir.join(&config.directory)
    }

    /// Load every design table into a ready registry.
    ///
    /// The report lists tables that failed and rows or cells that were
    /// skipped or defaulted.
    pub fn load_tables(&self) -> LoadResult<(TableRegistry, LoadReport)> {
        let config = self.load_config()?;
        TablesLoader::load(&self.tables_dir(&config), &config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.tables_dir(&TablesConfig::default()),
            Path::new("/tmp/data/tables")
        );
    }

    #[test]
    fn bundled_config_loads() {
        let config = ContentFactory::bundled().load_config().unwrap();
        assert_eq!(config.extension, "csv");
        assert_eq!(
            config.registry.key_columns.get("Localization").map(String::as_str),
            Some("key")
        );
    }
}
