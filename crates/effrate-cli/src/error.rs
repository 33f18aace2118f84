//! CLI error types.

use std::path::PathBuf;

use effrate_core::EffRateError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid `DATE:AMOUNT` flow argument.
    #[error("Invalid flow: {0}. Use DATE:AMOUNT, e.g. 2024-01-01:-1000.")]
    InvalidFlow(String),

    /// A scenario file could not be read or written.
    #[error("{}: {source}", path.display())]
    ScenarioFile {
        /// File involved.
        path: PathBuf,
        /// Underlying failure.
        source: EffRateError,
    },

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] EffRateError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
