//! Table layout and registry configuration.
//!
//! Defaults describe the spreadsheet export format used by the design team:
//!
//! ```text
//! line 1  display names / comments   (ignored)
//! line 2  column names               (name_row)
//! line 3  type tokens                (type_row)
//! line 4  example / comment row      (skipped)
//! line 5+ data                       (data_start_row)
//! ```
//!
//! Row indices are zero-based and count non-empty lines only.

use std::collections::BTreeMap;

use crate::error::LayoutError;

/// Row positions and delimiter of a table file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableLayout {
    /// Row holding the internal column names.
    pub name_row: usize,
    /// Row holding the declared type tokens.
    pub type_row: usize,
    /// First data row. Must come after `name_row`.
    pub data_start_row: usize,
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
}

impl TableLayout {
    pub const DEFAULT_NAME_ROW: usize = 1;
    pub const DEFAULT_TYPE_ROW: usize = 2;
    pub const DEFAULT_DATA_START_ROW: usize = 4;

    /// Checks the layout and returns the delimiter as a byte.
    pub fn validate(&self) -> Result<u8, LayoutError> {
        if self.data_start_row <= self.name_row {
            return Err(LayoutError::DataBeforeHeader {
                name_row: self.name_row,
                data_start_row: self.data_start_row,
            });
        }
        if !self.delimiter.is_ascii() {
            return Err(LayoutError::NonAsciiDelimiter(self.delimiter));
        }
        Ok(self.delimiter as u8)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            name_row: Self::DEFAULT_NAME_ROW,
            type_row: Self::DEFAULT_TYPE_ROW,
            data_start_row: Self::DEFAULT_DATA_START_ROW,
            delimiter: ',',
        }
    }
}

/// Configuration for shape discovery and table loading.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    pub layout: TableLayout,
    /// Suffix stripped from a shape's type name to get its source name
    /// (`MonsterData` loads from `Monster`).
    pub shape_suffix: String,
    /// Key column used when neither the config nor the shape overrides it.
    pub default_key_column: String,
    /// Per-table key column overrides, keyed by source name.
    pub key_columns: BTreeMap<String, String>,
}

impl RegistryConfig {
    pub const DEFAULT_SHAPE_SUFFIX: &'static str = "Data";
    pub const DEFAULT_KEY_COLUMN: &'static str = "id";

    /// Registers a key column override for a table (builder pattern).
    #[must_use]
    pub fn with_key_column(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.key_columns.insert(table.into(), column.into());
        self
    }

    /// Derives the source name for a shape type name.
    ///
    /// Returns `None` when stripping the suffix leaves nothing.
    pub fn source_name<'a>(&self, type_name: &'a str) -> Option<&'a str> {
        let name = type_name
            .strip_suffix(self.shape_suffix.as_str())
            .unwrap_or(type_name);
        (!name.is_empty()).then_some(name)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            layout: TableLayout::default(),
            shape_suffix: Self::DEFAULT_SHAPE_SUFFIX.to_string(),
            default_key_column: Self::DEFAULT_KEY_COLUMN.to_string(),
            key_columns: BTreeMap::new(),
        }
    }
}
