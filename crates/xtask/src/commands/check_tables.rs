//! Load every table and report defects
//!
//! Runs the same load game code performs and prints the loaded tables,
//! structural failures, and row/cell diagnostics grouped by table.

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use game_tables::{LoadReport, RegistryError, TableRegistry};
use std::path::PathBuf;

use crate::dirs;

/// Load every table and report defects
#[derive(Parser, Debug)]
pub struct CheckTables {
    /// Custom data directory (defaults to TABLES_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Fail on any failure or diagnostic, not only on an unusable data set
    #[arg(long)]
    strict: bool,
}

impl CheckTables {
    pub fn execute(self) -> Result<()> {
        let (factory, _) = dirs::open(self.data_dir.clone())?;

        println!("{}", style("Check Design Tables").yellow().bold());
        println!("  Data: {}", style(factory.data_dir().display()).dim());
        println!();

        let (registry, report) = match factory.load_tables() {
            Ok(loaded) => loaded,
            Err(err) => {
                if let Some(report) = err
                    .downcast_ref::<RegistryError>()
                    .and_then(RegistryError::report)
                {
                    print_failures(report);
                    print_diagnostics(report);
                }
                return Err(err);
            }
        };

        print_tables(&registry);
        print_failures(&report);
        print_diagnostics(&report);

        verdict(&report, self.strict)
    }
}

fn print_tables(registry: &TableRegistry) {
    println!("{}", style("Loaded").green().bold());
    for info in registry.tables() {
        println!(
            "  {} {:<20} {:>5} rows  key {} ({})  {}",
            style("✓").green(),
            style(&info.table_name).cyan(),
            info.rows,
            info.key_column,
            info.key_type,
            style(info.shape_name).dim()
        );
    }
    println!();
}

fn print_failures(report: &LoadReport) {
    if report.failures.is_empty() {
        return;
    }
    println!("{}", style("Failed").red().bold());
    for failure in &report.failures {
        println!(
            "  {} {:<20} {}",
            style("✗").red().bold(),
            style(&failure.table).cyan(),
            failure.error
        );
    }
    println!();
}

fn print_diagnostics(report: &LoadReport) {
    if report.diagnostics.is_empty() {
        return;
    }
    println!(
        "{} {}",
        style("Diagnostics").yellow().bold(),
        style(format!("({})", report.warning_count())).dim()
    );
    for diagnostic in &report.diagnostics {
        let marker = if diagnostic.kind.skips_row() {
            style("skip").red()
        } else {
            style("warn").yellow()
        };
        println!("  {marker} {diagnostic}");
    }
    println!();
}

/// Decides the command outcome for a finished load.
fn verdict(report: &LoadReport, strict: bool) -> Result<()> {
    if report.is_clean() {
        println!("{}", style("✓ All tables clean").green().bold());
        return Ok(());
    }

    let summary = format!(
        "{} table(s) failed, {} diagnostic(s)",
        report.failures.len(),
        report.warning_count()
    );
    if strict {
        bail!("{}", summary);
    }
    println!("{}", style(summary).yellow().bold());
    Ok(())
}
