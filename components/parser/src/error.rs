//! Lexer and parser error helpers

use core_types::{ErrorKind, GemError, SourcePosition};

/// Create a lex error at a given position
pub fn lex_error(message: impl Into<String>, position: SourcePosition) -> GemError {
    GemError::new(ErrorKind::LexError, message).with_position(position)
}

/// Create a parse error at a given position
pub fn syntax_error(message: impl Into<String>, position: SourcePosition) -> GemError {
    GemError::new(ErrorKind::ParseError, message).with_position(position)
}

/// Create an unexpected token error
pub fn unexpected_token(expected: &str, got: &str, position: SourcePosition) -> GemError {
    syntax_error(format!("Expected {}, got {}", expected, got), position)
}
