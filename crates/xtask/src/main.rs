//! Development tasks for the game data tables
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{CheckTables, GenShapes, ShowSchema};

/// Development tasks for the game data tables
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for design tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print the schema extracted from a table header
    Schema(ShowSchema),

    /// Generate record shapes from table headers
    GenShapes(GenShapes),

    /// Load every table and report defects
    CheckTables(CheckTables),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for TABLES_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Schema(cmd) => cmd.execute(),
        Command::GenShapes(cmd) => cmd.execute(),
        Command::CheckTables(cmd) => cmd.execute(),
    }
}
