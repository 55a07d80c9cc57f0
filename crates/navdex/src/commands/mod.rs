//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod find;
pub(crate) mod tree;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use find::FindArgs;
pub(crate) use tree::TreeArgs;

use std::path::PathBuf;

use clap::Args;
use navdex_config::{CliSettings, Config};
use navdex_index::NavIndex;

use crate::error::CliError;

/// Arguments shared by every command that reads an index.
#[derive(Args)]
pub(crate) struct IndexArgs {
    /// Path to configuration file (default: auto-discover navdex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Index file to read (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl IndexArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn config(&self, variable: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source: self.source.clone(),
            variable,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and the index it points to.
    pub(crate) fn load(&self, variable: Option<String>) -> Result<(Config, NavIndex), CliError> {
        let config = self.config(variable)?;
        tracing::info!(source = %config.index.source.display(), "Loading navigation index");
        let index = NavIndex::load_file(&config.index.source)?;
        Ok((config, index))
    }
}
