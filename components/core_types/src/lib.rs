//! Shared error and source-location types for the Gemstone language.
//!
//! Every stage of the pipeline (lexer, parser, interpreter, host surface)
//! reports failures as a [`GemError`], so the outer runner has exactly one
//! error type to catch at its recovery boundary.
//!
//! # Overview
//!
//! - [`GemError`] - A language error with kind, message and call trace
//! - [`ErrorKind`] - The error taxonomy (lex, parse, name, type, ...)
//! - [`SourcePosition`] - Line/column location in source text
//! - [`StackFrame`] - One user-function frame an error unwound through
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, GemError};
//!
//! let error = GemError::new(ErrorKind::NameError, "'x' is not defined");
//! assert_eq!(error.to_string(), "NameError: 'x' is not defined");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, GemError, GemResult};
pub use source::{SourcePosition, StackFrame};
