//! Runtime error helpers

use crate::Value;
use core_types::{ErrorKind, GemError};

/// Operand or receiver of the wrong kind
pub fn type_error(message: impl Into<String>) -> GemError {
    GemError::new(ErrorKind::TypeError, message)
}

/// Lookup of an unbound name
pub fn name_error(name: &str) -> GemError {
    GemError::new(ErrorKind::NameError, format!("'{}' is not defined", name))
}

/// User function called with the wrong argument count
pub fn arity_error(function: &str, expected: usize, got: usize) -> GemError {
    GemError::new(
        ErrorKind::ArityError,
        format!(
            "{}() takes {} argument{} but {} {} given",
            function,
            expected,
            if expected == 1 { "" } else { "s" },
            got,
            if got == 1 { "was" } else { "were" }
        ),
    )
}

/// Index outside a list or string
pub fn index_error(index: i64, base: &Value) -> GemError {
    GemError::new(
        ErrorKind::IndexError,
        format!("Index {} out of range for {}", index, base.repr()),
    )
}

/// Dictionary key or member that is not present
pub fn key_error(key: &Value, base: &Value) -> GemError {
    GemError::new(
        ErrorKind::KeyError,
        format!("Key {} not found in {}", key.repr(), base.repr()),
    )
}

/// Binary operator applied to unsupported operand kinds
pub fn unsupported_operands(op: &str, left: &Value, right: &Value) -> GemError {
    type_error(format!(
        "Unsupported operand types for {}: '{}' and '{}'",
        op,
        left.type_name(),
        right.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_error_names_both_counts() {
        let err = arity_error("add", 2, 3);
        assert_eq!(err.kind, ErrorKind::ArityError);
        assert_eq!(err.message, "add() takes 2 arguments but 3 were given");
    }

    #[test]
    fn test_index_error_names_value() {
        let err = index_error(5, &Value::list(vec![Value::Int(1)]));
        assert_eq!(err.message, "Index 5 out of range for [1]");
    }
}
