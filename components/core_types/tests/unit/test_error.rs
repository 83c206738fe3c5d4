//! Unit tests for GemError and ErrorKind

use core_types::{ErrorKind, GemError, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_display_names() {
        assert_eq!(ErrorKind::LexError.to_string(), "LexError");
        assert_eq!(ErrorKind::ParseError.to_string(), "ParseError");
        assert_eq!(ErrorKind::NameError.to_string(), "NameError");
        assert_eq!(ErrorKind::ArityError.to_string(), "ArityError");
        assert_eq!(ErrorKind::IterationError.to_string(), "IterationError");
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::TypeError, ErrorKind::TypeError);
        assert_ne!(ErrorKind::IndexError, ErrorKind::KeyError);
    }
}

#[cfg(test)]
mod gem_error_tests {
    use super::*;

    #[test]
    fn test_gem_error_new_is_bare() {
        let error = GemError::new(ErrorKind::KeyError, "'missing'");
        assert_eq!(error.kind, ErrorKind::KeyError);
        assert!(error.stack.is_empty());
        assert!(error.source_position.is_none());
    }

    #[test]
    fn test_gem_error_display_with_position() {
        let error = GemError::new(ErrorKind::ParseError, "Expected 'end', got EOF")
            .with_position(SourcePosition::new(4, 1, 30));
        assert_eq!(
            error.to_string(),
            "ParseError: Expected 'end', got EOF (line 4, column 1)"
        );
    }

    #[test]
    fn test_gem_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        let error = GemError::new(ErrorKind::InternalError, "unreachable state");
        takes_error(&error);
    }

    #[test]
    fn test_report_without_frames_matches_display() {
        let error = GemError::new(ErrorKind::ZeroDivisionError, "division by zero");
        assert_eq!(error.report(), error.to_string());
    }

    #[test]
    fn test_gem_error_clone_keeps_frames() {
        let mut error = GemError::new(ErrorKind::RecursionError, "too deep");
        error.push_frame("loop");
        let copy = error.clone();
        assert_eq!(copy, error);
        assert_eq!(copy.stack.len(), 1);
    }
}
