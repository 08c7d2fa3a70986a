//! Design table loader.
//!
//! Reads every table file from a directory and loads it into a
//! [`TableRegistry`]. Each file's stem is its source name, so `Monster.csv`
//! feeds the `MonsterData` shape.

use std::path::Path;

use anyhow::{Context, bail};
use game_tables::{LoadReport, TableRegistry, TableSource};
use tracing::{debug, info};

use crate::loaders::{LoadResult, TablesConfig, read_file};

/// Loader for design tables from a directory of CSV files.
pub struct TablesLoader;

impl TablesLoader {
    /// Reads all files with `extension` in `dir`, sorted by name.
    ///
    /// Subdirectories and files with other extensions are ignored.
    pub fn read_sources(dir: &Path, extension: &str) -> LoadResult<Vec<TableSource>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read table directory {}", dir.display()))?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if !matches_extension {
                debug!(target: "content::tables", path = %path.display(), "Skipping non-table file");
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            sources.push(TableSource::new(name, read_file(&path)?));
        }

        sources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sources)
    }

    /// Loads every table in `dir` using the shapes registered in this binary.
    ///
    /// Broken tables and bad rows end up in the returned [`LoadReport`]. An
    /// unreadable directory, one with no table files, or one where no table
    /// loads is an error; the last carries the report in its
    /// [`RegistryError`](game_tables::RegistryError).
    pub fn load(dir: &Path, config: &TablesConfig) -> LoadResult<(TableRegistry, LoadReport)> {
        let sources = Self::read_sources(dir, &config.extension)?;
        if sources.is_empty() {
            bail!("No .{} tables found in {}", config.extension, dir.display());
        }
        info!(
            target: "content::tables",
            dir = %dir.display(),
            files = sources.len(),
            "Read table sources"
        );

        TableRegistry::load(config.registry.clone(), sources)
            .with_context(|| format!("Failed to load tables from {}", dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_only_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Item.csv"), "a\n").unwrap();
        std::fs::write(dir.path().join("Monster.CSV"), "b\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "c\n").unwrap();
        std::fs::create_dir(dir.path().join("old.csv")).unwrap();

        let sources = TablesLoader::read_sources(dir.path(), "csv").unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Item", "Monster"]);
        assert_eq!(sources[0].text, "a\n");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TablesLoader::load(dir.path(), &TablesConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No .csv tables found"));
    }

    #[test]
    fn directory_with_nothing_loadable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Weather.csv"), "a\nb\nc\nd\n").unwrap();

        let err = TablesLoader::load(dir.path(), &TablesConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load tables from"));
        let report = err
            .downcast_ref::<game_tables::RegistryError>()
            .and_then(|err| err.report())
            .unwrap();
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TablesLoader::read_sources(&dir.path().join("missing"), "csv");
        assert!(result.is_err());
    }
}
