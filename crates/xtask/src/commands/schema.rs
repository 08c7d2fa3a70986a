//! Show the schema extracted from a table header
//!
//! Prints each surviving column with its declared type, optionally followed
//! by a preview of data rows converted according to those types.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_tables::{Schema, TableLayout};
use std::path::PathBuf;

use crate::dirs;

/// Print the schema extracted from a table header
#[derive(Parser, Debug)]
pub struct ShowSchema {
    /// Table name (e.g. `Monster`) or path to a table file
    #[arg(value_name = "TABLE")]
    table: String,

    /// Custom data directory (defaults to TABLES_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Number of data rows to convert and print
    #[arg(short, long, default_value = "0")]
    preview: usize,

    /// Print the schema as JSON instead of a table
    #[arg(long, conflicts_with = "preview")]
    json: bool,
}

/// A table file and the schema read from its header.
struct LoadedTable {
    path: PathBuf,
    text: String,
    layout: TableLayout,
    schema: Schema,
}

impl ShowSchema {
    pub fn execute(self) -> Result<()> {
        let table = self.load()?;

        if self.json {
            println!("{}", to_json(&table.schema)?);
            return Ok(());
        }

        println!(
            "{} {}",
            style("Schema").green().bold(),
            style(&table.schema.table_name).cyan().bold()
        );
        println!("  File: {}", style(table.path.display()).dim());
        println!();
        for (index, column) in table.schema.columns.iter().enumerate() {
            println!(
                "  {:>3}  {:<24} {}",
                index,
                column.name,
                style(column.column_type).yellow()
            );
        }

        if self.preview > 0 {
            println!();
            println!("{}", style("Preview").green().bold());
            for line in preview_lines(&table, self.preview)? {
                println!("  {line}");
            }
        }

        Ok(())
    }

    /// Resolves the table argument to a file and extracts its schema.
    fn load(&self) -> Result<LoadedTable> {
        let (factory, config) = dirs::open(self.data_dir.clone())?;

        let direct = PathBuf::from(&self.table);
        let path = if direct.is_file() {
            direct
        } else {
            factory
                .tables_dir(&config)
                .join(format!("{}.{}", self.table, config.extension))
        };
        let table_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.table)
            .to_string();

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?;
        let layout = config.registry.layout;
        let schema = Schema::extract(&table_name, &text, &layout)
            .with_context(|| format!("Failed to extract schema from {}", path.display()))?;

        Ok(LoadedTable {
            path,
            text,
            layout,
            schema,
        })
    }
}

fn to_json(schema: &Schema) -> Result<String> {
    serde_json::to_string_pretty(schema).context("Failed to serialize schema to JSON")
}

/// One `column=value` line per previewed data row.
fn preview_lines(table: &LoadedTable, limit: usize) -> Result<Vec<String>> {
    let rows = table.schema.preview(&table.text, &table.layout, limit)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let cells: Vec<String> = table
                .schema
                .columns
                .iter()
                .zip(row)
                .map(|(column, cell)| match cell.error {
                    None => format!("{}={}", column.name, cell.value),
                    Some(error) => format!(
                        "{}={}",
                        column.name,
                        style(format!("!{:?}", error.value)).red()
                    ),
                })
                .collect();
            cells.join("  ")
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = "\
Shop
id,name,price,on_sale
int,string,float,bool
0,example,0,0
1,Rope,2.5,1
2,Lamp,cheap,0
";

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("tables")).unwrap();
        std::fs::write(dir.path().join("tables/Shop.csv"), SHOP).unwrap();
        dir
    }

    fn command(dir: &tempfile::TempDir, preview: usize, json: bool) -> ShowSchema {
        ShowSchema {
            table: "Shop".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            preview,
            json,
        }
    }

    #[test]
    fn table_name_resolves_inside_the_data_dir() {
        let dir = data_dir();
        let table = command(&dir, 0, false).load().unwrap();

        assert_eq!(table.path, dir.path().join("tables/Shop.csv"));
        assert_eq!(table.schema.table_name, "Shop");
        assert_eq!(table.schema.len(), 4);
    }

    #[test]
    fn table_path_is_accepted_directly() {
        let dir = data_dir();
        let mut cmd = command(&dir, 0, false);
        cmd.table = dir.path().join("tables/Shop.csv").display().to_string();

        assert_eq!(cmd.load().unwrap().schema.table_name, "Shop");
    }

    #[test]
    fn json_lists_columns_in_order() {
        let dir = data_dir();
        let table = command(&dir, 0, true).load().unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&table.schema).unwrap()).unwrap();

        assert_eq!(json["table_name"], "Shop");
        let names: Vec<_> = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|column| column["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["id", "name", "price", "on_sale"]);
    }

    #[test]
    fn preview_converts_rows_and_marks_bad_cells() {
        let dir = data_dir();
        let table = command(&dir, 5, false).load().unwrap();
        let lines = preview_lines(&table, 5).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "id=1  name=\"Rope\"  price=2.5  on_sale=true");
        assert!(lines[1].starts_with("id=2  name=\"Lamp\"  price="));
        assert!(lines[1].contains("cheap"));
        assert!(lines[1].ends_with("on_sale=false"));
    }

    #[test]
    fn both_modes_execute() {
        let dir = data_dir();
        command(&dir, 2, false).execute().unwrap();
        command(&dir, 0, true).execute().unwrap();
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = data_dir();
        let mut cmd = command(&dir, 0, false);
        cmd.table = "Weather".to_string();

        let err = cmd.load().err().unwrap();
        assert!(err.to_string().contains("Failed to read table file"));
    }
}
