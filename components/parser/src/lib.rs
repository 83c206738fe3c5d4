//! Gemstone Parser Component
//!
//! Provides the lexer, token vocabulary, AST and recursive-descent parser
//! for the Gemstone scripting language.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes Gemstone source text
//! - [`Token`] - Token types including identifiers, literals, keywords
//! - [`Parser`] - Recursive descent parser producing top-level [`Node`]s
//! - [`Node`] - Abstract Syntax Tree node types
//!
//! # Example
//!
//! ```
//! use parser::{parse_source, Node};
//!
//! let program = parse_source("mem x = 1 + 2 emit x").unwrap();
//! assert_eq!(program.len(), 2);
//! assert!(matches!(program[1], Node::Emit { .. }));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{to_source, BinaryOperator, Node, Number, Statement, UnaryOperator};
pub use lexer::{tokenize, Keyword, Lexer, Punctuator, SpannedToken, Token};
pub use parser::{parse_source, Parser};
