//! Schema-driven loading of game design tables.
//!
//! Design data is exported from spreadsheets as CSV with a fixed header block
//! (display row, column names, type tokens, example row). This crate turns
//! those files into typed, keyed, immutable tables:
//!
//! - [`Schema`]: column names and declared types read from a header
//! - [`ShapeGenerator`]: offline generation of record shapes from a schema
//! - [`convert`]: total, type-directed cell conversion
//! - [`table_row!`]: record shapes with a static field table, registered for discovery
//! - [`parse`]: binds table text to a shape, collecting [`Diagnostics`]
//! - [`TableContainer`]: immutable key → record map handed to game code
//! - [`ShapeCatalog`] / [`TableRegistry`]: discovers shapes, matches sources,
//!   loads everything once, and serves typed lookups
//!
//! Loading is partial-failure tolerant. Bad cells, bad rows, and broken tables
//! are reported and skipped; only an empty source list aborts a load.

mod binder;
mod codegen;
mod column;
mod config;
mod container;
mod convert;
mod diagnostics;
mod error;
mod key;
mod lines;
mod registry;
mod row;
mod schema;
mod shape;

pub use binder::parse;
pub use codegen::{CodegenError, GeneratedShape, ShapeGenerator, is_identifier, to_snake_case};
pub use column::{ColumnDefinition, ColumnType};
pub use config::{RegistryConfig, TableLayout};
pub use container::TableContainer;
pub use convert::{CellData, CellValue, ConvertError, Converted, convert, convert_dynamic};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{LayoutError, RegistryError, SchemaError, TableError};
pub use key::{KeyType, TableKey};
pub use registry::{
    LoadFailure, LoadReport, RegistryPhase, ShapeCatalog, TableRegistry, TableSource,
};
pub use row::{AssignFn, FieldDef, TableRow};
pub use schema::Schema;
pub use shape::{FieldInfo, ShapeDescriptor, TableInfo};

#[doc(hidden)]
pub use inventory;
