//! Tree-walking interpreter for Gemstone
//!
//! This crate provides:
//! - The runtime `Value` model with shared lists and dictionaries
//! - Scopes with parent lookup (`Environment`)
//! - The evaluator (`Interpreter`) with explicit return signalling
//! - A native function registry that host layers populate
//!
//! # Example
//!
//! ```
//! use interpreter::{CaptureWriter, Interpreter, Value};
//!
//! let (writer, output) = CaptureWriter::new();
//! let mut interp = Interpreter::new().with_console(Box::new(writer));
//! interp.register_native("double", |_, args| match args.first() {
//!     Some(Value::Int(n)) => Ok(Value::Int(n * 2)),
//!     _ => Ok(Value::Nothing),
//! });
//!
//! let program = parser::parse_source("emit double(21)").unwrap();
//! interp.run(&program).unwrap();
//! assert_eq!(*output.borrow(), vec!["42".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod operators;
pub mod value;

// Re-export main types at crate root
pub use console::{CaptureWriter, ConsoleWriter, StdoutWriter};
pub use environment::{Environment, Scope};
pub use interpreter::{Completion, Interpreter, DEFAULT_MAX_CALL_DEPTH};
pub use value::{DictKey, DictRef, Function, ListRef, NativeFn, NativeFunction, Value};
