//! CLI error types.

use o2b_bookstack::BookstackError;
use o2b_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Bookstack(#[from] BookstackError),
}
