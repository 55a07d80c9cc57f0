//! CLI error types.

use navdex_config::ConfigError;
use navdex_index::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No entry links to '{0}'")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}
