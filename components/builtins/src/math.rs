//! Math natives: Random, Sin, Cos, Floor

use crate::args::{check_arity, float_to_int, int_arg, number_arg};
use core_types::GemResult;
use interpreter::error::type_error;
use interpreter::{Interpreter, Value};
use rand::Rng;

/// Register the math natives
pub fn register(interp: &mut Interpreter) {
    interp.register_native("Random", random);
    interp.register_native("Sin", sin);
    interp.register_native("Cos", cos);
    interp.register_native("Floor", floor);
}

/// Random(a, b): uniform integer in `a..=b`
pub fn random(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("Random", &args, 2, 2)?;
    let low = int_arg("Random", &args, 0)?;
    let high = int_arg("Random", &args, 1)?;
    if low > high {
        return Err(type_error(format!(
            "Random() range is empty: {} > {}",
            low, high
        )));
    }
    let mut rng = rand::thread_rng();
    Ok(Value::Int(rng.gen_range(low..=high)))
}

/// Sin(x) in radians
pub fn sin(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("Sin", &args, 1, 1)?;
    Ok(Value::Float(number_arg("Sin", &args, 0)?.sin()))
}

/// Cos(x) in radians
pub fn cos(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("Cos", &args, 1, 1)?;
    Ok(Value::Float(number_arg("Cos", &args, 0)?.cos()))
}

/// Floor(x): largest integer not above `x`, as an int
pub fn floor(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("Floor", &args, 1, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        _ => Ok(Value::Int(float_to_int(number_arg("Floor", &args, 0)?.floor())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ErrorKind;

    fn call(f: fn(&mut Interpreter, Vec<Value>) -> GemResult<Value>, args: Vec<Value>) -> GemResult<Value> {
        let mut interp = Interpreter::new();
        f(&mut interp, args)
    }

    #[test]
    fn test_random_stays_in_range() {
        for _ in 0..200 {
            match call(random, vec![Value::Int(-2), Value::Int(3)]).unwrap() {
                Value::Int(n) => assert!((-2..=3).contains(&n)),
                other => panic!("expected int, got {:?}", other),
            }
        }
        assert_eq!(
            call(random, vec![Value::Int(4), Value::Int(4)]).unwrap(),
            Value::Int(4)
        );
    }

    #[test]
    fn test_random_empty_range() {
        let err = call(random, vec![Value::Int(5), Value::Int(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_trig() {
        assert_eq!(call(sin, vec![Value::Int(0)]).unwrap(), Value::Float(0.0));
        assert_eq!(call(cos, vec![Value::Float(0.0)]).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn test_floor_returns_int() {
        assert!(matches!(call(floor, vec![Value::Float(2.7)]).unwrap(), Value::Int(2)));
        assert!(matches!(call(floor, vec![Value::Float(-2.1)]).unwrap(), Value::Int(-3)));
        assert!(matches!(call(floor, vec![Value::Int(9)]).unwrap(), Value::Int(9)));
        assert_eq!(
            call(floor, vec![Value::from("x")]).unwrap_err().kind,
            ErrorKind::TypeError
        );
    }
}
