//! `navdex find` command implementation.

use clap::Args;

use super::IndexArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the find command.
#[derive(Args)]
pub(crate) struct FindArgs {
    /// Link to look up (e.g., `Aliasing.html#sec-aliasing`).
    link: String,

    #[command(flatten)]
    pub index: IndexArgs,
}

impl FindArgs {
    /// Execute the find command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotFound`] if no entry has the link.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, index) = self.index.load(None)?;

        let trail = index
            .breadcrumbs(&self.link)
            .ok_or_else(|| CliError::NotFound(self.link.clone()))?;

        let text = trail
            .iter()
            .map(|entry| entry.title.as_str())
            .collect::<Vec<_>>()
            .join(" > ");
        output.data(&format!("{text}\n"))?;
        Ok(())
    }
}
