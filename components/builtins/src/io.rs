//! File natives: ReadFile, WriteFile

use crate::args::{check_arity, string_arg};
use core_types::{ErrorKind, GemError, GemResult};
use interpreter::{Interpreter, Value};
use std::fs;
use tracing::{debug, warn};

/// Register the file natives
pub fn register(interp: &mut Interpreter) {
    interp.register_native("ReadFile", read_file);
    interp.register_native("WriteFile", write_file);
}

/// ReadFile(path): file contents, or `""` if the file cannot be read
pub fn read_file(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("ReadFile", &args, 1, 1)?;
    let path = string_arg("ReadFile", &args, 0)?;
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!(path = %path, bytes = contents.len(), "read file");
            Ok(Value::String(contents))
        }
        Err(e) => {
            warn!(path = %path, error = %e, "ReadFile failed");
            Ok(Value::String(String::new()))
        }
    }
}

/// WriteFile(path, value): write the display form of `value`
pub fn write_file(_: &mut Interpreter, args: Vec<Value>) -> GemResult<Value> {
    check_arity("WriteFile", &args, 2, 2)?;
    let path = string_arg("WriteFile", &args, 0)?;
    let contents = args[1].to_string();
    fs::write(&path, contents.as_bytes()).map_err(|e| {
        GemError::new(ErrorKind::IoError, format!("Cannot write '{}': {}", path, e))
    })?;
    debug!(path = %path, bytes = contents.len(), "wrote file");
    Ok(Value::Nothing)
}
