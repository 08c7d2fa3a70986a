//! Table registry: discovers shapes, matches sources, and serves typed lookups.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──discover()──▶ Discovering ──load(sources)──▶ Loading ──▶ Ready
//!                  ShapeCatalog                                      TableRegistry
//! ```
//!
//! Each phase runs once. A [`TableRegistry`] is only handed out once loading
//! finished, and it has no mutation API, so it can be shared across threads
//! without locking.
//!
//! # Failure policy
//!
//! Loading is partial-failure tolerant: unmatched sources, structurally broken
//! tables, and row/cell defects are reported in the [`LoadReport`] while the
//! remaining sources keep loading. The batch only fails when there is nothing
//! to load or nothing loaded.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, error, info, warn};

use crate::config::RegistryConfig;
use crate::container::TableContainer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{RegistryError, TableError};
use crate::key::TableKey;
use crate::row::TableRow;
use crate::shape::{LoadRequest, LoadedTable, ShapeDescriptor, TableInfo};

/// Registry lifecycle phase, reported in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RegistryPhase {
    Uninitialized,
    Discovering,
    Loading,
    Ready,
}

/// Raw text of one table, named by its source name (file stem).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSource {
    pub name: String,
    pub text: String,
}

impl TableSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A table that failed to load.
#[derive(Debug)]
pub struct LoadFailure {
    pub table: String,
    pub error: TableError,
}

/// Outcome of a registry load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Tables that loaded, in load order.
    pub loaded: Vec<String>,
    /// Tables that failed structurally.
    pub failures: Vec<LoadFailure>,
    /// Row/cell defects and unmatched sources.
    pub diagnostics: Diagnostics,
}

impl LoadReport {
    /// Returns true when every source loaded without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.diagnostics.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns the failure for a table, if it failed.
    pub fn failure(&self, table: &str) -> Option<&TableError> {
        self.failures
            .iter()
            .find(|failure| failure.table == table)
            .map(|failure| &failure.error)
    }
}

/// Discovered shapes indexed by source name.
///
/// This is the registry in its `Discovering` phase.
#[derive(Debug)]
pub struct ShapeCatalog {
    config: RegistryConfig,
    shapes: BTreeMap<String, ShapeDescriptor>,
    diagnostics: Diagnostics,
}

impl ShapeCatalog {
    /// Creates a catalog with no shapes.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            shapes: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Builds a catalog from every shape registered with `table_row!`.
    pub fn discover(config: RegistryConfig) -> Self {
        let mut registered: Vec<_> = ShapeDescriptor::registered().copied().collect();
        registered.sort_by_key(|shape| shape.type_name());

        let mut catalog = Self::new(config);
        for shape in registered {
            catalog.insert(shape);
        }

        info!(
            target: "tables::registry",
            phase = %RegistryPhase::Discovering,
            shapes = catalog.len(),
            "Discovered table shapes"
        );
        catalog
    }

    /// Adds a shape explicitly (builder pattern).
    #[must_use]
    pub fn with_shape<R: TableRow>(mut self) -> Self {
        self.insert(ShapeDescriptor::of::<R>());
        self
    }

    fn insert(&mut self, shape: ShapeDescriptor) {
        let Some(source) = self.config.source_name(shape.type_name()) else {
            warn!(
                target: "tables::registry",
                shape = shape.type_name(),
                suffix = %self.config.shape_suffix,
                "Shape name leaves no source name, ignoring"
            );
            return;
        };

        match self.shapes.get(source) {
            Some(existing) if existing.shape_id() == shape.shape_id() => {}
            Some(existing) => {
                let kind = DiagnosticKind::DuplicateShape {
                    kept: existing.type_name(),
                    ignored: shape.type_name(),
                };
                self.diagnostics.table(source, kind);
            }
            None => {
                debug!(
                    target: "tables::registry",
                    shape = shape.type_name(),
                    source,
                    "Registered table shape"
                );
                self.shapes.insert(source.to_string(), shape);
            }
        }
    }

    /// Shape registered for a source name.
    pub fn shape_for(&self, source: &str) -> Option<&ShapeDescriptor> {
        self.shapes.get(source)
    }

    /// Source names with a registered shape, sorted.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Key column for a table: config override, then shape override, then
    /// the configured default.
    pub fn key_column_for<'a>(&'a self, source: &str, shape: &ShapeDescriptor) -> &'a str {
        if let Some(column) = self.config.key_columns.get(source) {
            return column;
        }
        match shape.key_column() {
            Some(column) => column,
            None => &self.config.default_key_column,
        }
    }

    /// Loads every source and returns the ready registry with its report.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NoSources`] if `sources` is empty
    /// - [`RegistryError::NoLoadableSources`] if no source produced a table;
    ///   the error carries the report
    ///
    /// Otherwise every problem is recorded in the returned report.
    pub fn load<I>(mut self, sources: I) -> Result<(TableRegistry, LoadReport), RegistryError>
    where
        I: IntoIterator<Item = TableSource>,
    {
        let mut sources: Vec<TableSource> = sources.into_iter().collect();
        if sources.is_empty() {
            error!(
                target: "tables::registry",
                phase = %RegistryPhase::Loading,
                "No table sources found"
            );
            return Err(RegistryError::NoSources);
        }
        sources.sort_by(|a, b| a.name.cmp(&b.name));

        info!(
            target: "tables::registry",
            phase = %RegistryPhase::Loading,
            sources = sources.len(),
            shapes = self.len(),
            "Loading tables"
        );

        let mut report = LoadReport {
            diagnostics: std::mem::take(&mut self.diagnostics),
            ..LoadReport::default()
        };
        let mut tables: HashMap<TypeId, LoadedTable> = HashMap::new();

        for source in &sources {
            let Some(shape) = self.shape_for(&source.name) else {
                report
                    .diagnostics
                    .table(&source.name, DiagnosticKind::UnmatchedSource);
                continue;
            };

            let request = LoadRequest {
                table_name: &source.name,
                text: &source.text,
                key_column: self.key_column_for(&source.name, shape),
                layout: &self.config.layout,
            };

            match shape.load(&request, &mut report.diagnostics) {
                Ok(table) => {
                    info!(
                        target: "tables::registry",
                        table = %table.info.table_name,
                        shape = table.info.shape_name,
                        key_column = %table.info.key_column,
                        key_type = %table.info.key_type,
                        rows = table.info.rows,
                        "Loaded table"
                    );
                    report.loaded.push(source.name.clone());
                    tables.insert(shape.shape_id(), table);
                }
                Err(err) => {
                    error!(
                        target: "tables::registry",
                        table = %source.name,
                        shape = shape.type_name(),
                        error = %err,
                        "Failed to load table, continuing"
                    );
                    report.failures.push(LoadFailure {
                        table: source.name.clone(),
                        error: err,
                    });
                }
            }
        }

        if tables.is_empty() {
            error!(
                target: "tables::registry",
                phase = %RegistryPhase::Loading,
                sources = sources.len(),
                failed = report.failures.len(),
                warnings = report.warning_count(),
                "No table source could be loaded"
            );
            return Err(RegistryError::NoLoadableSources {
                sources: sources.len(),
                report: Box::new(report),
            });
        }

        info!(
            target: "tables::registry",
            phase = %RegistryPhase::Ready,
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            warnings = report.warning_count(),
            "Table registry ready"
        );

        Ok((TableRegistry { tables }, report))
    }
}

/// Loaded tables indexed by shape, ready for lookup.
///
/// Only [`ShapeCatalog::load`] builds one.
pub struct TableRegistry {
    tables: HashMap<TypeId, LoadedTable>,
}

impl TableRegistry {
    /// Discovers registered shapes and loads `sources` in one call.
    pub fn load<I>(config: RegistryConfig, sources: I) -> Result<(Self, LoadReport), RegistryError>
    where
        I: IntoIterator<Item = TableSource>,
    {
        ShapeCatalog::discover(config).load(sources)
    }

    /// Always [`RegistryPhase::Ready`]; registries only exist once loaded.
    pub fn phase(&self) -> RegistryPhase {
        RegistryPhase::Ready
    }

    /// Returns the table for shape `R` keyed by `K`.
    ///
    /// Integer key columns load as `i64`, string key columns as `String`.
    /// Asking with the other key type logs a warning and returns `None`.
    pub fn table<K: TableKey, R: TableRow>(&self) -> Option<&TableContainer<K, R>> {
        let loaded = self.tables.get(&TypeId::of::<R>())?;
        let container = loaded.container.downcast_ref::<TableContainer<K, R>>();
        if container.is_none() {
            warn!(
                target: "tables::registry",
                shape = R::SHAPE_NAME,
                requested = %K::KEY_TYPE,
                actual = %loaded.info.key_type,
                "Table requested with the wrong key type"
            );
        }
        container
    }

    /// Looks up a single row of shape `R`.
    pub fn get<K: TableKey, R: TableRow>(&self, key: &K) -> Option<&R> {
        self.table::<K, R>()?.get(key)
    }

    /// All keys of the table for `R`; empty if the table is absent.
    pub fn all_keys<K: TableKey, R: TableRow>(&self) -> Vec<K> {
        Self::keys_of(self.table::<K, R>())
    }

    /// Keys of an optional container; empty when it is `None`.
    pub fn keys_of<K: TableKey, R>(container: Option<&TableContainer<K, R>>) -> Vec<K> {
        container
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns true if a table for `R` loaded.
    pub fn contains<R: TableRow>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<R>())
    }

    /// Metadata for every loaded table, sorted by table name.
    pub fn tables(&self) -> Vec<&TableInfo> {
        let mut infos: Vec<_> = self.tables.values().map(|table| &table.info).collect();
        infos.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        infos
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl std::fmt::Debug for TableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRegistry")
            .field("tables", &self.tables())
            .finish()
    }
}
