//! Unit tests for SourcePosition and StackFrame

use core_types::{SourcePosition, StackFrame};

#[test]
fn test_source_position_default_is_zero() {
    let pos = SourcePosition::default();
    assert_eq!(pos, SourcePosition::new(0, 0, 0));
}

#[test]
fn test_source_position_display() {
    let pos = SourcePosition::new(12, 3, 200);
    assert_eq!(pos.to_string(), "line 12, column 3");
}

#[test]
fn test_source_position_is_copy() {
    let a = SourcePosition::new(1, 1, 0);
    let b = a;
    assert_eq!(a, b);
}

#[test]
fn test_stack_frame_equality() {
    let a = StackFrame {
        function_name: "add".to_string(),
    };
    let b = StackFrame {
        function_name: "add".to_string(),
    };
    assert_eq!(a, b);
}
