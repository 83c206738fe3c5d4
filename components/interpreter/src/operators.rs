//! Operator semantics: arithmetic, comparison, indexing and member access

use crate::error::{index_error, key_error, type_error, unsupported_operands};
use crate::{DictKey, Value};
use core_types::{ErrorKind, GemError, GemResult};
use parser::{BinaryOperator, UnaryOperator};
use std::cmp::Ordering;

/// Apply a binary operator to two evaluated operands
pub fn binary(op: BinaryOperator, left: Value, right: Value) -> GemResult<Value> {
    match op {
        BinaryOperator::Add => add(left, right),
        BinaryOperator::Sub => sub(left, right),
        BinaryOperator::Mul => mul(left, right),
        BinaryOperator::Div => div(left, right),
        BinaryOperator::Eq => Ok(Value::from_bool(left == right)),
        BinaryOperator::NotEq => Ok(Value::from_bool(left != right)),
        BinaryOperator::Lt => compare(op, &left, &right, |o| o == Ordering::Less),
        BinaryOperator::Gt => compare(op, &left, &right, |o| o == Ordering::Greater),
        BinaryOperator::LtEq => compare(op, &left, &right, |o| o != Ordering::Greater),
        BinaryOperator::GtEq => compare(op, &left, &right, |o| o != Ordering::Less),
    }
}

/// Apply a prefix operator
pub fn unary(op: UnaryOperator, operand: Value) -> GemResult<Value> {
    match (op, operand) {
        (UnaryOperator::Minus, Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(overflow),
        (UnaryOperator::Minus, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOperator::Plus, value @ (Value::Int(_) | Value::Float(_))) => Ok(value),
        (op, other) => Err(type_error(format!(
            "Bad operand type for unary {}: '{}'",
            op.as_str(),
            other.type_name()
        ))),
    }
}

fn overflow() -> GemError {
    GemError::new(ErrorKind::OverflowError, "Integer result out of range")
}

fn add(a: Value, b: Value) -> GemResult<Value> {
    match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => x.checked_add(*y).map(Value::Int).ok_or_else(overflow),
        (Value::String(s1), Value::String(s2)) => Ok(Value::String(format!("{}{}", s1, s2))),
        (Value::List(l1), Value::List(l2)) => {
            let mut items = l1.borrow().clone();
            items.extend(l2.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(x + y)),
            _ => Err(unsupported_operands("+", &a, &b)),
        },
    }
}

fn sub(a: Value, b: Value) -> GemResult<Value> {
    match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => x.checked_sub(*y).map(Value::Int).ok_or_else(overflow),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(x - y)),
            _ => Err(unsupported_operands("-", &a, &b)),
        },
    }
}

fn mul(a: Value, b: Value) -> GemResult<Value> {
    match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => x.checked_mul(*y).map(Value::Int).ok_or_else(overflow),
        (Value::String(s), Value::Int(n)) | (Value::Int(n), Value::String(s)) => {
            Ok(Value::String(s.repeat(repeat_count(*n))))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            let items = items.borrow();
            let mut out = Vec::new();
            for _ in 0..repeat_count(*n) {
                out.extend(items.iter().cloned());
            }
            Ok(Value::list(out))
        }
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(x * y)),
            _ => Err(unsupported_operands("*", &a, &b)),
        },
    }
}

fn repeat_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn div(a: Value, b: Value) -> GemResult<Value> {
    match (a.as_f64(), b.as_f64()) {
        (Some(_), Some(y)) if y == 0.0 => Err(GemError::new(
            ErrorKind::ZeroDivisionError,
            "division by zero",
        )),
        (Some(x), Some(y)) => Ok(Value::Float(x / y)),
        _ => Err(unsupported_operands("/", &a, &b)),
    }
}

fn compare(
    op: BinaryOperator,
    a: &Value,
    b: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> GemResult<Value> {
    let ordering = match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => {
                return Err(type_error(format!(
                    "'{}' not supported between '{}' and '{}'",
                    op.as_str(),
                    a.type_name(),
                    b.type_name()
                )))
            }
        },
    };
    // NaN compares false both ways
    Ok(Value::from_bool(ordering.map(accept).unwrap_or(false)))
}

fn list_position(index: &Value, len: usize, base: &Value) -> GemResult<usize> {
    let i = match index {
        Value::Int(i) => *i,
        other => {
            return Err(type_error(format!(
                "Indices must be integers, not {}",
                other.type_name()
            )))
        }
    };
    usize::try_from(i)
        .ok()
        .filter(|pos| *pos < len)
        .ok_or_else(|| index_error(i, base))
}

/// Read `base[index]`
pub fn get_index(base: &Value, index: &Value) -> GemResult<Value> {
    match base {
        Value::List(items) => {
            let items_ref = items.borrow();
            let pos = list_position(index, items_ref.len(), base)?;
            Ok(items_ref[pos].clone())
        }
        Value::String(s) => {
            let count = s.chars().count();
            let pos = list_position(index, count, base)?;
            Ok(s.chars()
                .nth(pos)
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Nothing))
        }
        Value::Dict(entries) => {
            let key = DictKey::from_value(index)?;
            entries
                .borrow()
                .get(&key)
                .cloned()
                .ok_or_else(|| key_error(index, base))
        }
        other => Err(type_error(format!(
            "Cannot index into {} {}",
            other.type_name(),
            other.repr()
        ))),
    }
}

/// Write `base[index] = value` in place
pub fn set_index(base: &Value, index: &Value, value: Value) -> GemResult<()> {
    match base {
        Value::List(items) => {
            let len = items.borrow().len();
            let pos = list_position(index, len, base)?;
            items.borrow_mut()[pos] = value;
            Ok(())
        }
        Value::Dict(entries) => {
            let key = DictKey::from_value(index)?;
            entries.borrow_mut().insert(key, value);
            Ok(())
        }
        Value::String(_) => Err(type_error("Strings are immutable")),
        other => Err(type_error(format!(
            "Cannot assign index of {} {}",
            other.type_name(),
            other.repr()
        ))),
    }
}

/// Read `base.member`, defined only on dictionaries
pub fn get_member(base: &Value, member: &str) -> GemResult<Value> {
    match base {
        Value::Dict(entries) => entries
            .borrow()
            .get(&DictKey::String(member.to_string()))
            .cloned()
            .ok_or_else(|| key_error(&Value::from(member), base)),
        other => Err(type_error(format!(
            "Cannot access member '{}' of {} {}",
            member,
            other.type_name(),
            other.repr()
        ))),
    }
}

/// Write `base.member = value`, defined only on dictionaries
pub fn set_member(base: &Value, member: &str, value: Value) -> GemResult<()> {
    match base {
        Value::Dict(entries) => {
            entries
                .borrow_mut()
                .insert(DictKey::String(member.to_string()), value);
            Ok(())
        }
        other => Err(type_error(format!(
            "Cannot set member '{}' of {} {}",
            member,
            other.type_name(),
            other.repr()
        ))),
    }
}
