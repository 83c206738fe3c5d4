//! Error types for the CLI

use core_types::GemError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Lex, parse or runtime error from the script, with its traceback
    #[error("{}", .0.report())]
    Gem(#[from] GemError),

    /// Script file could not be read
    #[error("Could not read file '{path}': {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Line editor failure
    #[error("REPL error: {0}")]
    Repl(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
