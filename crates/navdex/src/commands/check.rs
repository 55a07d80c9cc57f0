//! `navdex check` command implementation.

use clap::Args;
use navdex_index::{Severity, lint};

use super::IndexArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Treat lint warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be loaded or lint reports errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, index) = self.index.load(None)?;

        output.highlight(&format!("Checking {}", config.index.source.display()));
        output.detail(&format!(
            "{} entries, {} pages, depth {}",
            index.len(),
            index.pages().len(),
            index.depth()
        ));

        let findings = lint(&index, &config.lint.options(self.strict));
        let errors = findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count();

        for finding in &findings {
            match finding.severity {
                Severity::Warning => output.warning(&finding.to_string()),
                Severity::Error => output.error(&finding.to_string()),
            }
        }

        if errors > 0 {
            return Err(CliError::Validation(format!(
                "{errors} lint error(s), {} warning(s)",
                findings.len() - errors
            )));
        }

        if findings.is_empty() {
            output.success("Index is valid");
        } else {
            output.success(&format!("Index is valid ({} warning(s))", findings.len()));
        }
        Ok(())
    }
}
