//! navdex CLI - Documentation navigation index tool.
//!
//! Provides commands for:
//! - `check`: Validate and lint an index file
//! - `tree`: Print the index as an outline
//! - `find`: Show the breadcrumb trail for a link
//! - `export`: Convert the index to records, script or outline form

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, FindArgs, TreeArgs};
use output::Output;

/// navdex - Documentation navigation index tool.
#[derive(Parser)]
#[command(name = "navdex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and lint the navigation index.
    Check(CheckArgs),
    /// Print the navigation index as an indented outline.
    Tree(TreeArgs),
    /// Show the breadcrumb trail of the entry with a given link.
    Find(FindArgs),
    /// Write the navigation index in another format.
    Export(ExportArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.index.verbose,
            Self::Tree(args) => args.index.verbose,
            Self::Find(args) => args.index.verbose,
            Self::Export(args) => args.index.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Find(args) => args.execute(),
        Commands::Export(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
