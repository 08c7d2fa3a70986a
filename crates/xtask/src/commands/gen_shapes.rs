//! Generate record shapes from table headers
//!
//! Reads every table file in the data directory, extracts its schema, and
//! writes one `table_row!` shape per table plus a `mod.rs` re-exporting them.
//! With `--check`, nothing is written and stale files fail the command.

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use game_content::TablesLoader;
use game_tables::{GeneratedShape, Schema, ShapeGenerator, TableLayout, TableSource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dirs;

/// Generate record shapes from table headers
#[derive(Parser, Debug)]
pub struct GenShapes {
    /// Custom data directory (defaults to TABLES_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output directory for generated shapes
    #[arg(short, long, value_name = "DIR", default_value = default_out_dir())]
    out: PathBuf,

    /// Key column override emitted as `keyed_by`, e.g. `Dialogue=dialogue_id`
    #[arg(short, long = "key", value_name = "TABLE=COLUMN", value_parser = parse_key_override)]
    keys: Vec<(String, String)>,

    /// Path used to reach `table_row!` from the generated code
    #[arg(long, default_value = "game_tables")]
    crate_path: String,

    /// Fail if generated files differ from what is on disk, without writing
    #[arg(long)]
    check: bool,
}

fn default_out_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/src/shapes")
}

/// Parses a `TABLE=COLUMN` key override.
fn parse_key_override(value: &str) -> Result<(String, String), String> {
    let (table, column) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TABLE=COLUMN, got '{value}'"))?;
    let (table, column) = (table.trim(), column.trim());
    if table.is_empty() || column.is_empty() {
        return Err(format!("expected TABLE=COLUMN, got '{value}'"));
    }
    Ok((table.to_string(), column.to_string()))
}

/// Generates shapes for `sources` and the module file declaring them.
///
/// Returns `(file name, contents)` pairs, `mod.rs` last.
fn generate_all(
    sources: &[TableSource],
    layout: &TableLayout,
    generator: &ShapeGenerator,
    keys: &BTreeMap<String, String>,
) -> Result<Vec<(String, String)>> {
    let mut shapes: Vec<GeneratedShape> = Vec::with_capacity(sources.len());
    for source in sources {
        let schema = Schema::extract(&source.name, &source.text, layout)
            .with_context(|| format!("Failed to extract schema for table '{}'", source.name))?;

        let key = keys.get(&source.name).map(String::as_str);
        if let Some(key) = key {
            if schema.column(key).is_none() {
                bail!(
                    "Key column '{}' is not a column of table '{}'",
                    key,
                    source.name
                );
            }
        }

        shapes.push(
            generator
                .generate(&schema, key)
                .with_context(|| format!("Failed to generate shape for table '{}'", source.name))?,
        );
    }

    let module = generator.generate_module(&shapes);
    let mut files: Vec<(String, String)> = shapes
        .into_iter()
        .map(|shape| (shape.file_name(), shape.source))
        .collect();
    files.push(("mod.rs".to_string(), module));
    Ok(files)
}

impl GenShapes {
    pub fn execute(self) -> Result<()> {
        let (factory, config) = dirs::open(self.data_dir.clone())?;
        let tables_dir = factory.tables_dir(&config);
        let sources = TablesLoader::read_sources(&tables_dir, &config.extension)?;
        if sources.is_empty() {
            bail!(
                "No .{} tables found in {}",
                config.extension,
                tables_dir.display()
            );
        }

        let keys: BTreeMap<String, String> = self.keys.iter().cloned().collect();
        for table in keys.keys() {
            if !sources.iter().any(|source| &source.name == table) {
                bail!("--key names unknown table '{}'", table);
            }
        }

        let generator = ShapeGenerator::new()
            .with_crate_path(&self.crate_path)
            .with_suffix(&config.registry.shape_suffix);
        let files = generate_all(&sources, &config.registry.layout, &generator, &keys)?;

        println!("{}", style("Generate Table Shapes").yellow().bold());
        println!("  Tables: {}", style(tables_dir.display()).dim());
        println!("  Output: {}", style(self.out.display()).dim());
        println!();

        if self.check {
            self.check_files(&files)
        } else {
            self.write_files(&files)
        }
    }

    fn write_files(&self, files: &[(String, String)]) -> Result<()> {
        std::fs::create_dir_all(&self.out)
            .with_context(|| format!("Failed to create {}", self.out.display()))?;

        for (name, contents) in files {
            let path = self.out.join(name);
            let status = if is_current(&path, contents) {
                style("unchanged").dim()
            } else {
                std::fs::write(&path, contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                style("written").green()
            };
            println!("  {} {:<28} {}", style("→").cyan(), name, status);
        }

        println!();
        println!(
            "{}",
            style(format!("✓ Generated {} shapes", files.len() - 1))
                .green()
                .bold()
        );
        Ok(())
    }

    fn check_files(&self, files: &[(String, String)]) -> Result<()> {
        let stale: Vec<&str> = files
            .iter()
            .filter(|(name, contents)| !is_current(&self.out.join(name), contents))
            .map(|(name, _)| name.as_str())
            .collect();

        if stale.is_empty() {
            println!("{}", style("✓ Shapes are up to date").green().bold());
            return Ok(());
        }

        for name in &stale {
            println!("  {} {}", style("✗").red().bold(), name);
        }
        bail!(
            "{} shape file(s) out of date; run `cargo xtask gen-shapes`",
            stale.len()
        )
    }
}

fn is_current(path: &Path, contents: &str) -> bool {
    std::fs::read_to_string(path).is_ok_and(|existing| existing == contents)
}
