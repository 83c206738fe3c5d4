//! Runtime value representation.
//!
//! Scalars are stored inline. Lists and dictionaries are shared mutable
//! references, so `mem b = a` aliases rather than copies.

use crate::Interpreter;
use core_types::{ErrorKind, GemError, GemResult};
use parser::Node;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Shared list storage
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Shared dictionary storage, ordered by key
pub type DictRef = Rc<RefCell<BTreeMap<DictKey, Value>>>;

/// Signature of a host callback
pub type NativeFn = dyn Fn(&mut Interpreter, Vec<Value>) -> GemResult<Value>;

/// Any Gemstone value.
///
/// There is no boolean type: comparisons produce `Int(1)` or `Int(0)`.
///
/// # Examples
///
/// ```
/// use interpreter::Value;
///
/// let list = Value::list(vec![Value::Int(1), Value::from("a")]);
/// assert_eq!(list.to_string(), "[1, 'a']");
/// assert!(!Value::Nothing.is_truthy());
/// assert_eq!(Value::Int(2), Value::Float(2.0));
/// ```
#[derive(Clone)]
pub enum Value {
    /// Result of statements that produce nothing
    Nothing,
    /// 64-bit signed integer
    Int(i64),
    /// IEEE 754 double
    Float(f64),
    /// Immutable string
    String(String),
    /// Mutable shared list
    List(ListRef),
    /// Mutable shared dictionary
    Dict(DictRef),
    /// User-defined function
    Function(Rc<Function>),
    /// Host callback
    NativeFunction(Rc<NativeFunction>),
}

/// A user-defined function: parameter names plus body.
///
/// Functions do not capture their defining scope. A call runs in a fresh
/// scope whose parent is the global scope.
#[derive(Debug)]
pub struct Function {
    /// Name the function was defined under
    pub name: String,
    /// Parameter names, bound positionally
    pub params: Vec<String>,
    /// Body statements
    pub body: Vec<Node>,
}

/// A named host callback.
pub struct NativeFunction {
    /// Name the callback is registered under
    pub name: String,
    callback: Box<NativeFn>,
}

impl NativeFunction {
    /// Wrap a callback under a name
    pub fn new(
        name: impl Into<String>,
        callback: impl Fn(&mut Interpreter, Vec<Value>) -> GemResult<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }

    /// Invoke the callback
    pub fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
        (self.callback)(interpreter, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Dictionary key.
///
/// Integral floats normalize to `Int`, so `d[1]` and `d[1.0]` address the
/// same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DictKey {
    /// Integer key
    Int(i64),
    /// Non-integral float key, stored by bit pattern
    Float(u64),
    /// String key
    String(String),
}

impl DictKey {
    /// Convert a value into a key, rejecting unhashable kinds
    pub fn from_value(value: &Value) -> GemResult<Self> {
        match value {
            Value::Int(n) => Ok(DictKey::Int(*n)),
            Value::Float(x) => {
                if x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64 {
                    Ok(DictKey::Int(*x as i64))
                } else {
                    Ok(DictKey::Float(x.to_bits()))
                }
            }
            Value::String(s) => Ok(DictKey::String(s.clone())),
            other => Err(GemError::new(
                ErrorKind::TypeError,
                format!("Unhashable type: '{}'", other.type_name()),
            )),
        }
    }

    /// The key as a value
    pub fn to_value(&self) -> Value {
        match self {
            DictKey::Int(n) => Value::Int(*n),
            DictKey::Float(bits) => Value::Float(f64::from_bits(*bits)),
            DictKey::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for DictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value().repr())
    }
}

impl Value {
    /// Build a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Build a dictionary value
    pub fn dict(entries: BTreeMap<DictKey, Value>) -> Self {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    /// Comparison result as a value
    pub fn from_bool(b: bool) -> Self {
        Value::Int(i64::from(b))
    }

    /// Zero, empty and nothing are falsy; everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nothing => false,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Dict(entries) => !entries.borrow().is_empty(),
            Value::Function(_) | Value::NativeFunction(_) => true,
        }
    }

    /// Name of the value's kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Function(_) => "function",
            Value::NativeFunction(_) => "native function",
        }
    }

    /// Numeric view of ints and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Whether the value can be called
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::NativeFunction(_))
    }

    /// Display form used inside containers: strings are quoted
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.render(true, &mut Vec::new(), &mut out);
        out
    }

    /// Append the display form to `out`.
    ///
    /// `open` holds the containers currently being rendered; meeting one
    /// again prints `[...]` or `{...}` instead of recursing.
    fn render(&self, quoted: bool, open: &mut Vec<*const ()>, out: &mut String) {
        match self {
            Value::Nothing => out.push_str("none"),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(x) => out.push_str(&format_float(*x)),
            Value::String(s) if quoted => out.push_str(&quote(s)),
            Value::String(s) => out.push_str(s),
            Value::List(items) => {
                let id = Rc::as_ptr(items) as *const ();
                if open.contains(&id) {
                    out.push_str("[...]");
                    return;
                }
                open.push(id);
                out.push('[');
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render(true, open, out);
                }
                out.push(']');
                open.pop();
            }
            Value::Dict(entries) => {
                let id = Rc::as_ptr(entries) as *const ();
                if open.contains(&id) {
                    out.push_str("{...}");
                    return;
                }
                open.push(id);
                out.push('{');
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&key.to_string());
                    out.push_str(": ");
                    value.render(true, open, out);
                }
                out.push('}');
                open.pop();
            }
            Value::Function(func) => {
                out.push_str("<function ");
                out.push_str(&func.name);
                out.push('>');
            }
            Value::NativeFunction(native) => {
                out.push_str("<native ");
                out.push_str(&native.name);
                out.push('>');
            }
        }
    }

    /// Structural equality. A pair of containers already being compared
    /// further up counts as equal, so cyclic values terminate.
    fn equals(&self, other: &Value, open: &mut Vec<(*const (), *const ())>) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let pair = (Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ());
                if open.contains(&pair) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return false;
                }
                open.push(pair);
                let equal = a.iter().zip(b.iter()).all(|(x, y)| x.equals(y, open));
                open.pop();
                equal
            }
            (Value::Dict(a), Value::Dict(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let pair = (Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ());
                if open.contains(&pair) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return false;
                }
                open.push(pair);
                let equal = a
                    .iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && va.equals(vb, open));
                open.pop();
                equal
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if x != 0.0 && (x.abs() >= 1e16 || x.abs() < 1e-4) {
        exponent_form(x)
    } else if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// `1e+16`, `2.5e-07`: signed exponent of at least two digits
fn exponent_form(x: f64) -> String {
    let plain = format!("{:e}", x);
    match plain.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(e) => format!(
                "{}e{}{:02}",
                mantissa,
                if e < 0 { '-' } else { '+' },
                e.unsigned_abs()
            ),
            Err(_) => plain,
        },
        None => plain,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(false, &mut Vec::new(), &mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "Nothing"),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(_) => f.debug_tuple("List").field(&format_args!("{}", self)).finish(),
            Value::Dict(_) => f.debug_tuple("Dict").field(&format_args!("{}", self)).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(&func.name).finish(),
            Value::NativeFunction(native) => {
                f.debug_tuple("NativeFunction").field(&native.name).finish()
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, &mut Vec::new())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(!Value::dict(BTreeMap::new()).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::list(vec![Value::Nothing]).is_truthy());
    }

    #[test]
    fn test_float_display() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(0.1).to_string(), "0.1");
        assert_eq!(Value::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(0.0).to_string(), "0.0");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(Value::Float(1e16).to_string(), "1e+16");
        assert_eq!(Value::Float(-2.5e20).to_string(), "-2.5e+20");
        assert_eq!(Value::Float(1e-7).to_string(), "1e-07");
        assert_eq!(Value::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Value::Float(1e-300).to_string(), "1e-300");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(1e15).to_string(), "1000000000000000.0");
    }

    #[test]
    fn test_cyclic_containers_display() {
        let list = Value::list(vec![Value::Int(1)]);
        if let Value::List(items) = &list {
            items.borrow_mut().push(list.clone());
        }
        assert_eq!(list.to_string(), "[1, [...]]");
        assert_eq!(list.repr(), "[1, [...]]");
        assert_eq!(format!("{:?}", list), "List([1, [...]])");

        let dict = Value::dict(BTreeMap::new());
        if let Value::Dict(entries) = &dict {
            entries.borrow_mut().insert(DictKey::String("me".into()), dict.clone());
            entries.borrow_mut().insert(DictKey::String("xs".into()), list.clone());
        }
        assert_eq!(dict.to_string(), "{'me': {...}, 'xs': [1, [...]]}");
    }

    #[test]
    fn test_shared_but_acyclic_is_printed_twice() {
        let inner = Value::list(vec![Value::Int(0)]);
        let outer = Value::list(vec![inner.clone(), inner]);
        assert_eq!(outer.to_string(), "[[0], [0]]");
    }

    #[test]
    fn test_cyclic_containers_equality_terminates() {
        let make = || {
            let list = Value::list(vec![Value::Int(1)]);
            if let Value::List(items) = &list {
                items.borrow_mut().push(list.clone());
            }
            list
        };
        let (a, b) = (make(), make());
        assert_eq!(a, b);
        assert_eq!(a, a.clone());

        let c = Value::list(vec![Value::Int(2)]);
        if let Value::List(items) = &c {
            items.borrow_mut().push(c.clone());
        }
        assert_ne!(a, c);
    }

    #[test]
    fn test_container_display_quotes_strings() {
        let mut entries = BTreeMap::new();
        entries.insert(DictKey::String("k".into()), Value::list(vec![Value::from("it's")]));
        let dict = Value::dict(entries);
        assert_eq!(dict.to_string(), "{'k': ['it\\'s']}");
        assert_eq!(Value::from("raw").to_string(), "raw");
        assert_eq!(Value::Nothing.to_string(), "none");
    }

    #[test]
    fn test_numeric_equality_across_kinds() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_list_equality_is_structural() {
        let a = Value::list(vec![Value::Int(1), Value::from("x")]);
        let b = Value::list(vec![Value::Float(1.0), Value::from("x")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dict_key_normalizes_integral_floats() {
        assert_eq!(
            DictKey::from_value(&Value::Float(2.0)).unwrap(),
            DictKey::Int(2)
        );
        assert!(matches!(
            DictKey::from_value(&Value::Float(2.5)).unwrap(),
            DictKey::Float(_)
        ));
        let err = DictKey::from_value(&Value::list(vec![])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_dict_display_orders_keys() {
        let mut entries = BTreeMap::new();
        entries.insert(DictKey::String("b".into()), Value::Int(2));
        entries.insert(DictKey::Int(1), Value::Int(1));
        assert_eq!(Value::dict(entries).to_string(), "{1: 1, 'b': 2}");
    }

    #[test]
    fn test_native_display() {
        let native = NativeFunction::new("len", |_, _| Ok(Value::Nothing));
        assert_eq!(Value::NativeFunction(Rc::new(native)).to_string(), "<native len>");
    }
}
