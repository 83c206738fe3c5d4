//! Gemstone error types.
//!
//! One error struct carries every failure kind. Errors are raised at the
//! point of detection and propagate unchanged to the runner, which is the
//! single recovery boundary.

use crate::{SourcePosition, StackFrame};
use std::fmt;

/// The kind of a Gemstone error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Illegal character or unterminated string
    LexError,
    /// Unexpected token or missing keyword
    ParseError,
    /// Lookup of a name bound in no enclosing scope
    NameError,
    /// Operand, index, member or call on a value of the wrong kind
    TypeError,
    /// User function called with the wrong number of arguments
    ArityError,
    /// List or string index out of range
    IndexError,
    /// Dictionary key not present
    KeyError,
    /// `for` over something that is neither a list nor a string
    IterationError,
    /// Division by zero
    ZeroDivisionError,
    /// Integer arithmetic left the 64-bit range
    OverflowError,
    /// Call depth limit exceeded
    RecursionError,
    /// Host file access failed
    IoError,
    /// Interpreter invariant broken
    InternalError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::LexError => "LexError",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::NameError => "NameError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ArityError => "ArityError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::IterationError => "IterationError",
            ErrorKind::ZeroDivisionError => "ZeroDivisionError",
            ErrorKind::OverflowError => "OverflowError",
            ErrorKind::RecursionError => "RecursionError",
            ErrorKind::IoError => "IoError",
            ErrorKind::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// A Gemstone error with message, call trace and optional source position.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, GemError, SourcePosition};
///
/// let error = GemError::new(ErrorKind::LexError, "Illegal character: '$'")
///     .with_position(SourcePosition::new(1, 4, 3));
///
/// assert_eq!(
///     error.to_string(),
///     "LexError: Illegal character: '$' (line 1, column 4)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}{}", position_suffix(.source_position))]
pub struct GemError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// User functions the error unwound through, innermost first
    pub stack: Vec<StackFrame>,
    /// Source position where the error occurred
    pub source_position: Option<SourcePosition>,
}

fn position_suffix(position: &Option<SourcePosition>) -> String {
    match position {
        Some(pos) => format!(" ({})", pos),
        None => String::new(),
    }
}

impl GemError {
    /// Create an error without position or trace
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: vec![],
            source_position: None,
        }
    }

    /// Attach the source position the error was detected at
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.source_position = Some(position);
        self
    }

    /// Record that the error unwound through a call to `function_name`
    pub fn push_frame(&mut self, function_name: impl Into<String>) {
        self.stack.push(StackFrame {
            function_name: function_name.into(),
        });
    }

    /// Render the error followed by one traceback line per frame
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        for frame in &self.stack {
            out.push_str("\n  ");
            out.push_str(&frame.to_string());
        }
        out
    }
}

/// Result alias used throughout the workspace
pub type GemResult<T> = Result<T, GemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_without_position() {
        let error = GemError::new(ErrorKind::TypeError, "Not a function: 3");
        assert_eq!(error.to_string(), "TypeError: Not a function: 3");
    }

    #[test]
    fn test_push_frame_order() {
        let mut error = GemError::new(ErrorKind::NameError, "'y' is not defined");
        error.push_frame("inner");
        error.push_frame("outer");
        assert_eq!(error.stack[0].function_name, "inner");
        assert_eq!(
            error.report(),
            "NameError: 'y' is not defined\n  in inner()\n  in outer()"
        );
    }
}
