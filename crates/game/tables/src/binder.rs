//! Binds table text to a record shape.
//!
//! # Failure policy
//!
//! - **Fatal** (returns `Err`): missing header row, key column absent from
//!   the header, invalid layout, unreadable text.
//! - **Row skipped**: empty key cell (silently), unparsable key, duplicate
//!   key (first occurrence wins), row shorter than the header (silently).
//! - **Field defaulted**: a cell that fails conversion keeps the field's
//!   default; the rest of the row is kept.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use crate::config::TableLayout;
use crate::container::TableContainer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::TableError;
use crate::key::TableKey;
use crate::lines::read_lines;
use crate::row::{FieldDef, TableRow};

/// Parses `text` into a container of `R` keyed by `key_column`.
///
/// Header columns without a matching field are ignored, so shapes may lag
/// behind newly added columns. Fields without a matching column are reported
/// and stay at their default.
pub fn parse<K, R>(
    table_name: &str,
    text: &str,
    key_column: &str,
    layout: &TableLayout,
    diagnostics: &mut Diagnostics,
) -> Result<TableContainer<K, R>, TableError>
where
    K: TableKey,
    R: TableRow,
{
    let delimiter = layout.validate()?;
    let lines = read_lines(text, delimiter).map_err(|source| TableError::Csv {
        table: table_name.to_string(),
        source,
    })?;

    let header = lines
        .get(layout.name_row)
        .ok_or_else(|| TableError::MissingHeader {
            table: table_name.to_string(),
            required: layout.name_row + 1,
            found: lines.len(),
        })?;
    let columns: Vec<&str> = header.trimmed_cells().collect();

    let key_index = columns
        .iter()
        .position(|column| *column == key_column)
        .ok_or_else(|| TableError::MissingKeyColumn {
            table: table_name.to_string(),
            column: key_column.to_string(),
        })?;

    let bindings = resolve_fields::<R>(table_name, &columns, diagnostics);
    let key_field = R::field(key_column);

    let mut rows: HashMap<K, R> = HashMap::new();
    for line in lines.iter().skip(layout.data_start_row) {
        if line.cells.len() < columns.len() {
            trace!(
                target: "tables::binder",
                table = table_name,
                line = line.number,
                cells = line.cells.len(),
                "Skipping short row"
            );
            continue;
        }

        let raw_key = line.cell(key_index);
        if raw_key.is_empty() {
            continue;
        }

        let Some(key) = parse_key::<K, R>(raw_key, key_field) else {
            diagnostics.row(
                table_name,
                line.number,
                DiagnosticKind::InvalidKey {
                    column: key_column.to_string(),
                    value: raw_key.to_string(),
                },
            );
            continue;
        };

        let slot = match rows.entry(key) {
            Entry::Occupied(existing) => {
                diagnostics.row(
                    table_name,
                    line.number,
                    DiagnosticKind::DuplicateKey {
                        key: existing.key().to_string(),
                    },
                );
                continue;
            }
            Entry::Vacant(slot) => slot,
        };

        let mut record = R::default();
        for (index, field) in &bindings {
            let raw = line.cells.get(*index).unwrap_or_default();
            if let Err(error) = (field.assign)(&mut record, raw) {
                diagnostics.row(
                    table_name,
                    line.number,
                    DiagnosticKind::InvalidCell {
                        column: field.name,
                        error,
                    },
                );
            }
        }
        slot.insert(record);
    }

    debug!(
        target: "tables::binder",
        table = table_name,
        shape = R::SHAPE_NAME,
        key_column,
        rows = rows.len(),
        "Bound table"
    );

    Ok(TableContainer::new(table_name, key_column, rows))
}

/// Parses a key cell, which must also fit the record's own key field.
///
/// Int keys are `i64` while the field may be narrower; a key the field cannot
/// hold would leave the stored record disagreeing with its key.
fn parse_key<K: TableKey, R: TableRow>(
    raw_key: &str,
    key_field: Option<&'static FieldDef<R>>,
) -> Option<K> {
    let key = K::parse_cell(raw_key)?;
    if let Some(field) = key_field {
        let mut scratch = R::default();
        (field.assign)(&mut scratch, raw_key).ok()?;
    }
    Some(key)
}

/// Pairs each field of `R` with its header position.
fn resolve_fields<R: TableRow>(
    table_name: &str,
    columns: &[&str],
    diagnostics: &mut Diagnostics,
) -> Vec<(usize, &'static FieldDef<R>)> {
    R::FIELDS
        .iter()
        .filter_map(|field| {
            let index = columns.iter().position(|column| *column == field.name);
            if index.is_none() {
                diagnostics.table(
                    table_name,
                    DiagnosticKind::MissingField { field: field.name },
                );
            }
            index.map(|index| (index, field))
        })
        .collect()
}
