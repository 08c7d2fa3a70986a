//! Error types for table loading.
//!
//! Errors here are structural: each one stops a single table (or, for
//! [`RegistryError`], the whole batch). Row- and cell-level defects are not
//! errors; they are collected as [`Diagnostic`](crate::Diagnostic)s and the
//! load carries on.

use thiserror::Error;

use crate::column::ColumnType;
use crate::registry::LoadReport;

/// Invalid [`TableLayout`](crate::TableLayout) settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("data rows start at {data_start_row} but the header is at row {name_row}")]
    DataBeforeHeader {
        name_row: usize,
        data_start_row: usize,
    },

    #[error("delimiter {0:?} is not a single ASCII character")]
    NonAsciiDelimiter(char),
}

/// Failures while extracting a schema from a table header.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("table '{table}' has {found} non-empty lines, header needs at least {required}")]
    MissingRow {
        table: String,
        required: usize,
        found: usize,
    },

    #[error("table '{table}' has {names} column names but {types} type tokens")]
    ColumnCountMismatch {
        table: String,
        names: usize,
        types: usize,
    },

    #[error("table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("failed to read table '{table}'")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },
}

/// Structural failures that prevent a single table from loading.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table '{table}' has {found} non-empty lines, header row {required} is missing")]
    MissingHeader {
        table: String,
        required: usize,
        found: usize,
    },

    #[error("table '{table}' has no key column '{column}' in its header")]
    MissingKeyColumn { table: String, column: String },

    #[error("shape {shape} has no field for key column '{column}'")]
    MissingKeyField { shape: &'static str, column: String },

    #[error("shape {shape} key column '{column}' is {column_type}, keys must be int or string")]
    UnsupportedKeyType {
        shape: &'static str,
        column: String,
        column_type: ColumnType,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("failed to read table '{table}'")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },
}

/// Failures that abort a registry load entirely.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no table sources were provided")]
    NoSources,

    #[error(
        "none of {sources} table sources loaded ({} failed, {} diagnostics)",
        .report.failures.len(),
        .report.warning_count()
    )]
    NoLoadableSources {
        sources: usize,
        /// What went wrong with each source.
        report: Box<LoadReport>,
    },
}

impl RegistryError {
    /// Load report of a batch in which nothing loaded.
    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            Self::NoSources => None,
            Self::NoLoadableSources { report, .. } => Some(report.as_ref()),
        }
    }
}
