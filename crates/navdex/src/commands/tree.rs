//! `navdex tree` command implementation.

use clap::Args;

use super::IndexArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub index: IndexArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, index) = self.index.load(None)?;

        if index.is_empty() {
            output.info("Index has no entries");
            return Ok(());
        }

        output.data(&index.to_outline())?;
        Ok(())
    }
}
