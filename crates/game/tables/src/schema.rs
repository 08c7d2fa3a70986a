//! Schema extraction from table headers.
//!
//! A schema is only needed at design time: the shape generator turns it into
//! a record type, after which the schema itself is discarded.

use std::collections::HashSet;

use tracing::debug;

use crate::column::{ColumnDefinition, ColumnType};
use crate::config::TableLayout;
use crate::convert::{CellData, Converted, convert_dynamic};
use crate::error::SchemaError;
use crate::lines::read_lines;

/// Ordered column description of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl Schema {
    /// Extracts a schema from the name and type rows of `text`.
    ///
    /// Columns whose name or type token is empty are dropped; sparse headers
    /// are common in exported sheets. Unknown type tokens become strings.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingRow`] if the text ends before the name or type row
    /// - [`SchemaError::ColumnCountMismatch`] if the two rows differ in length
    /// - [`SchemaError::DuplicateColumn`] if a surviving column name repeats
    pub fn extract(
        table_name: impl Into<String>,
        text: &str,
        layout: &TableLayout,
    ) -> Result<Self, SchemaError> {
        let table_name = table_name.into();
        let delimiter = layout.validate()?;
        let lines = read_lines(text, delimiter).map_err(|source| SchemaError::Csv {
            table: table_name.clone(),
            source,
        })?;

        let required = layout.name_row.max(layout.type_row) + 1;
        if lines.len() < required {
            return Err(SchemaError::MissingRow {
                table: table_name,
                required,
                found: lines.len(),
            });
        }

        let names: Vec<&str> = lines[layout.name_row].trimmed_cells().collect();
        let types: Vec<&str> = lines[layout.type_row].trimmed_cells().collect();
        if names.len() != types.len() {
            return Err(SchemaError::ColumnCountMismatch {
                table: table_name,
                names: names.len(),
                types: types.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(names.len());
        for (position, (name, token)) in names.into_iter().zip(types).enumerate() {
            if name.is_empty() || token.is_empty() {
                debug!(
                    target: "tables::schema",
                    table = %table_name,
                    position,
                    name,
                    token,
                    "Dropping column with empty name or type"
                );
                continue;
            }
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateColumn {
                    table: table_name,
                    column: name.to_string(),
                });
            }
            columns.push(ColumnDefinition::new(name, ColumnType::from_token(token)));
        }

        Ok(Self {
            table_name,
            columns,
        })
    }

    /// Converts up to `limit` data rows of `text` by declared column type.
    ///
    /// Each returned row has one entry per schema column, in schema order.
    /// Used for previews in tooling; loading goes through the binder.
    pub fn preview(
        &self,
        text: &str,
        layout: &TableLayout,
        limit: usize,
    ) -> Result<Vec<Vec<Converted<CellData>>>, SchemaError> {
        let delimiter = layout.validate()?;
        let lines = read_lines(text, delimiter).map_err(|source| SchemaError::Csv {
            table: self.table_name.clone(),
            source,
        })?;
        let header = lines.get(layout.name_row).ok_or_else(|| SchemaError::MissingRow {
            table: self.table_name.clone(),
            required: layout.name_row + 1,
            found: lines.len(),
        })?;
        let positions: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|column| header.trimmed_cells().position(|name| name == column.name))
            .collect();

        let rows = lines
            .iter()
            .skip(layout.data_start_row)
            .take(limit)
            .map(|line| {
                self.columns
                    .iter()
                    .zip(&positions)
                    .map(|(column, position)| {
                        let raw = position.map(|index| line.cell(index)).unwrap_or_default();
                        convert_dynamic(raw, column.column_type)
                    })
                    .collect()
            })
            .collect();

        Ok(rows)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONSTER: &str = "\
Monster ID,Display Name,Hit Points,Boss?,Memo
id,name,hp,is_boss,
int,string,INT,bool,string
0,example,0,0,
1,Goblin,30,0,
";

    fn extract(text: &str) -> Result<Schema, SchemaError> {
        Schema::extract("Monster", text, &TableLayout::default())
    }

    #[test]
    fn extracts_columns_in_order() {
        let schema = extract(MONSTER).unwrap();
        let names: Vec<_> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "hp", "is_boss"]);
        assert_eq!(schema.column("hp").unwrap().column_type, ColumnType::Int);
        assert_eq!(schema.column("is_boss").unwrap().column_type, ColumnType::Bool);
    }

    #[test]
    fn drops_columns_with_empty_name_or_type() {
        let text = "display\nid,,level,rank\nint,string,,enum\n";
        let schema = extract(text).unwrap();
        assert_eq!(
            schema.columns,
            vec![
                ColumnDefinition::new("id", ColumnType::Int),
                ColumnDefinition::new("rank", ColumnType::Int),
            ]
        );
    }

    #[test]
    fn unknown_type_tokens_become_strings() {
        let schema = extract("display\nid,pos\nint,vector2\n").unwrap();
        assert_eq!(schema.column("pos").unwrap().column_type, ColumnType::String);
    }

    #[test]
    fn short_text_is_rejected() {
        let err = extract("display\nid,name\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingRow {
                required: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let err = extract("display\nid,name,hp\nint,string\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ColumnCountMismatch {
                names: 3,
                types: 2,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = extract("display\nid,id\nint,int\n").unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { column, .. } if column == "id"));
    }

    #[test]
    fn preview_converts_by_declared_type() {
        let schema = extract(MONSTER).unwrap();
        let rows = schema.preview(MONSTER, &TableLayout::default(), 10).unwrap();

        assert_eq!(rows.len(), 1);
        let goblin: Vec<_> = rows[0].iter().map(|cell| cell.value.clone()).collect();
        assert_eq!(
            goblin,
            [
                CellData::Int(1),
                CellData::String("Goblin".into()),
                CellData::Int(30),
                CellData::Bool(false),
            ]
        );
    }

    #[test]
    fn custom_rows_are_honoured() {
        let layout = TableLayout {
            name_row: 0,
            type_row: 1,
            data_start_row: 2,
            delimiter: ';',
        };
        let schema = Schema::extract("Shop", "id;price\nint;float\n", &layout).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.column("price").unwrap().column_type, ColumnType::Float);
    }
}
