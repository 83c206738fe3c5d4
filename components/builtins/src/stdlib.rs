//! General natives: print, input, len, push, pop

use crate::args::{check_arity, list_arg};
use crate::input::LineReader;
use core_types::{ErrorKind, GemError, GemResult};
use interpreter::error::type_error;
use interpreter::{Interpreter, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Register the general natives
pub fn register(interp: &mut Interpreter, reader: Rc<RefCell<dyn LineReader>>) {
    interp.register_native("print", print);
    interp.register_native("input", move |_, args| input(&reader, args));
    interp.register_native("len", len);
    interp.register_native("push", push);
    interp.register_native("pop", pop);
}

/// print(...values): display forms joined by spaces
pub fn print(interp: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    let line = args
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    interp.console().write(&line);
    Ok(Value::Nothing)
}

/// input([prompt]): one line from the reader, nothing at end of input
fn input(reader: &Rc<RefCell<dyn LineReader>>, args: Vec<Value>) -> GemResult<Value> {
    check_arity("input", &args, 0, 1)?;
    let prompt = args.first().map(|v| v.to_string()).unwrap_or_default();
    let line = reader.borrow_mut().read_line(&prompt)?;
    Ok(line.map(Value::String).unwrap_or(Value::Nothing))
}

/// len(x): characters of a string, items of a list, entries of a dict
pub fn len(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("len", &args, 1, 1)?;
    let count = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.borrow().len(),
        Value::Dict(entries) => entries.borrow().len(),
        other => {
            return Err(type_error(format!(
                "Object of type '{}' has no len()",
                other.type_name()
            )))
        }
    };
    Ok(Value::Int(count as i64))
}

/// push(list, value): append in place
pub fn push(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("push", &args, 2, 2)?;
    let items = list_arg("push", &args, 0)?;
    items.borrow_mut().push(args[1].clone());
    Ok(Value::Nothing)
}

/// pop(list): remove and return the last item
pub fn pop(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("pop", &args, 1, 1)?;
    let items = list_arg("pop", &args, 0)?;
    let last = items.borrow_mut().pop();
    last.ok_or_else(|| GemError::new(ErrorKind::IndexError, "pop from empty list"))
}
