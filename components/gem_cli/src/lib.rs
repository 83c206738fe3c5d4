//! Gemstone CLI library
//!
//! Provides the Runtime struct and supporting modules for the `gem` binary:
//! argument parsing, logging setup, script execution and the REPL.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod logging;
pub mod repl;
pub mod runtime;

pub use cli::{Cli, CLI_MAX_CALL_DEPTH};
pub use error::{CliError, CliResult};
pub use runtime::Runtime;
