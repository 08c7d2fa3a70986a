//! Non-fatal load diagnostics.
//!
//! Row- and cell-level defects never stop a load. Each one is logged when it
//! is recorded and kept so callers can inspect or surface the full list.

use thiserror::Error;
use tracing::warn;

use crate::convert::ConvertError;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("no registered shape matches this source")]
    UnmatchedSource,

    #[error("shapes {kept} and {ignored} map to the same source, keeping {kept}")]
    DuplicateShape {
        kept: &'static str,
        ignored: &'static str,
    },

    #[error("field '{field}' has no column in the header, left at default")]
    MissingField { field: &'static str },

    #[error("key {value:?} in column '{column}' is not a valid key, row skipped")]
    InvalidKey { column: String, value: String },

    #[error("duplicate key {key}, row discarded")]
    DuplicateKey { key: String },

    #[error("column '{column}': {error}, field left at default")]
    InvalidCell {
        column: &'static str,
        error: ConvertError,
    },
}

impl DiagnosticKind {
    /// Returns true when the whole row was dropped.
    pub const fn skips_row(&self) -> bool {
        matches!(self, Self::InvalidKey { .. } | Self::DuplicateKey { .. })
    }
}

/// A recorded defect with its table and line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub table: String,
    /// 1-based source line, when the defect belongs to a row.
    pub line: Option<u64>,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.table, line, self.kind),
            None => write!(f, "{}: {}", self.table, self.kind),
        }
    }
}

/// Accumulated diagnostics for one or more tables.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a table-level diagnostic.
    pub fn table(&mut self, table: &str, kind: DiagnosticKind) {
        self.push(Diagnostic {
            table: table.to_string(),
            line: None,
            kind,
        });
    }

    /// Records a diagnostic for a specific source line.
    pub fn row(&mut self, table: &str, line: u64, kind: DiagnosticKind) {
        self.push(Diagnostic {
            table: table.to_string(),
            line: Some(line),
            kind,
        });
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        warn!(
            target: "tables::diagnostics",
            table = %diagnostic.table,
            line = ?diagnostic.line,
            "{}", diagnostic.kind
        );
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics recorded for one table.
    pub fn for_table<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| d.table == table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
