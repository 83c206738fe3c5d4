//! Host natives for Gemstone
//!
//! This crate provides the native functions a Gemstone host installs into
//! an interpreter:
//! - General natives (`print`, `input`, `len`, `push`, `pop`)
//! - Math natives (`Random`, `Sin`, `Cos`, `Floor`)
//! - File natives (`ReadFile`, `WriteFile`)
//! - A headless `Surface` backing window, drawing, input, frame loop and
//!   UI button natives
//!
//! # Example
//!
//! ```
//! use builtins::{register_all, ScriptedReader, Surface, SurfaceConfig};
//! use interpreter::{CaptureWriter, Interpreter};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let (writer, output) = CaptureWriter::new();
//! let mut interp = Interpreter::new().with_console(Box::new(writer));
//! let surface = Surface::shared(SurfaceConfig::default());
//! register_all(&mut interp, &surface, Rc::new(RefCell::new(ScriptedReader::default())));
//!
//! let program = parser::parse_source("mem l = [1, 2] push(l, 3) print(len(l), l)").unwrap();
//! interp.run(&program).unwrap();
//! assert_eq!(*output.borrow(), vec!["3 [1, 2, 3]".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod input;
pub mod io;
pub mod math;
pub mod stdlib;
pub mod surface;

// Re-export main types for convenience
pub use input::{LineReader, ScriptedReader, StdinReader};
pub use surface::{
    dispatch_clicks, run_frame_loop, Button, DrawCommand, InputState, SharedSurface, Surface,
    SurfaceConfig, Window,
};

use interpreter::Interpreter;
use std::cell::RefCell;
use std::rc::Rc;

/// Install every host native into `interp`
pub fn register_all(
    interp: &mut Interpreter,
    surface: &SharedSurface,
    reader: Rc<RefCell<dyn LineReader>>,
) {
    stdlib::register(interp, reader);
    math::register(interp);
    io::register(interp);
    surface::register(interp, surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_binds_every_native() {
        let mut interp = Interpreter::new();
        let surface = Surface::shared(SurfaceConfig::default());
        register_all(&mut interp, &surface, Rc::new(RefCell::new(ScriptedReader::default())));

        for name in [
            "print", "input", "len", "push", "pop", "Random", "Sin", "Cos", "Floor", "ReadFile",
            "WriteFile", "InitWindow", "GemApp", "CloseWindow", "Rect", "DrawBox", "Text",
            "DrawText", "LoadImage", "DrawImage", "KeyDown", "MouseX", "MouseY", "MouseDown",
            "GameLoop", "UIButton", "Run",
        ] {
            let value = interp.get_global(name);
            assert!(
                matches!(value, Some(interpreter::Value::NativeFunction(_))),
                "{} not registered",
                name
            );
        }
    }
}
