//! Argument checking shared by the natives

use core_types::{ErrorKind, GemError, GemResult};
use interpreter::error::{arity_error, type_error};
use interpreter::{ListRef, Value};

/// Require between `min` and `max` arguments (inclusive)
pub fn check_arity(name: &str, args: &[Value], min: usize, max: usize) -> GemResult<()> {
    let got = args.len();
    if got >= min && got <= max {
        return Ok(());
    }
    if min == max {
        return Err(arity_error(name, min, got));
    }
    Err(GemError::new(
        ErrorKind::ArityError,
        format!(
            "{}() takes {} to {} arguments but {} {} given",
            name,
            min,
            max,
            got,
            if got == 1 { "was" } else { "were" }
        ),
    ))
}

fn wrong_type(name: &str, position: usize, expected: &str, got: &Value) -> GemError {
    type_error(format!(
        "{}() argument {} must be {}, not {}",
        name,
        position + 1,
        expected,
        got.type_name()
    ))
}

/// Numeric argument as a float
pub fn number_arg(name: &str, args: &[Value], position: usize) -> GemResult<f64> {
    let value = args.get(position).unwrap_or(&Value::Nothing);
    value
        .as_f64()
        .ok_or_else(|| wrong_type(name, position, "a number", value))
}

/// Numeric argument truncated toward zero
pub fn int_arg(name: &str, args: &[Value], position: usize) -> GemResult<i64> {
    match args.get(position) {
        Some(Value::Int(n)) => Ok(*n),
        Some(Value::Float(x)) => float_to_int(*x),
        Some(other) => Err(wrong_type(name, position, "a number", other)),
        None => Err(wrong_type(name, position, "a number", &Value::Nothing)),
    }
}

/// Convert a float to an int, rejecting NaN and out-of-range values
pub fn float_to_int(x: f64) -> GemResult<i64> {
    if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Ok(x as i64)
    } else {
        Err(GemError::new(
            ErrorKind::OverflowError,
            format!("Cannot convert {} to an integer", Value::Float(x)),
        ))
    }
}

/// String argument
pub fn string_arg(name: &str, args: &[Value], position: usize) -> GemResult<String> {
    match args.get(position) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(name, position, "a string", other)),
        None => Err(wrong_type(name, position, "a string", &Value::Nothing)),
    }
}

/// List argument
pub fn list_arg(name: &str, args: &[Value], position: usize) -> GemResult<ListRef> {
    match args.get(position) {
        Some(Value::List(items)) => Ok(items.clone()),
        Some(other) => Err(wrong_type(name, position, "a list", other)),
        None => Err(wrong_type(name, position, "a list", &Value::Nothing)),
    }
}

/// Callable argument
pub fn callable_arg(name: &str, args: &[Value], position: usize) -> GemResult<Value> {
    match args.get(position) {
        Some(value) if value.is_callable() => Ok(value.clone()),
        Some(other) => Err(wrong_type(name, position, "a function", other)),
        None => Err(wrong_type(name, position, "a function", &Value::Nothing)),
    }
}

/// Optional argument rendered with its display form, or a default
pub fn text_arg_or(args: &[Value], position: usize, default: &str) -> String {
    args.get(position)
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}
