//! `navdex export` command implementation.

use clap::{Args, ValueEnum};

use super::IndexArgs;
use crate::error::CliError;
use crate::output::Output;

/// Export output format.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum Format {
    /// Pretty-printed JSON array of records.
    #[default]
    Records,
    /// Generated script form (`var index = [...];`).
    Script,
    /// Indented plain-text outline.
    Outline,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    /// Variable name for script output (overrides config).
    #[arg(long)]
    variable: Option<String>,

    #[command(flatten)]
    pub index: IndexArgs,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, index) = self.index.load(self.variable)?;

        let text = match self.format {
            Format::Records => {
                let mut json = serde_json::to_string_pretty(&index.to_records())?;
                json.push('\n');
                json
            }
            Format::Script => index.to_script(&config.index.variable),
            Format::Outline => index.to_outline(),
        };

        output.data(&text)?;
        Ok(())
    }
}
