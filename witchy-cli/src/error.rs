use thiserror::Error;
use witchy_catalog::SeedParseError;
use witchy_lib::PathError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Data directory could not be resolved or created
    #[error("{0}")]
    Path(#[from] PathError),

    /// The built-in datasets are malformed
    #[error("Seed data error: {0}")]
    Seed(#[from] SeedParseError),

    /// Arguments parsed but cannot form a command
    #[error("Usage error: {0}")]
    Usage(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
