//! Contract tests for builtins component
//!
//! These tests drive the natives through parsed Gemstone programs.

mod frame_loop_tests;
mod surface_natives_tests;
mod ui_button_tests;

use builtins::{register_all, ScriptedReader, SharedSurface, Surface, SurfaceConfig};
use core_types::GemResult;
use interpreter::{CaptureWriter, Interpreter, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Interpreter with every native installed and a fast, bounded frame loop
pub struct Host {
    pub interp: Interpreter,
    pub surface: SharedSurface,
    pub output: Rc<RefCell<Vec<String>>>,
}

impl Host {
    pub fn new(max_frames: Option<u64>) -> Self {
        let (writer, output) = CaptureWriter::new();
        let mut interp = Interpreter::new().with_console(Box::new(writer));
        let surface = Surface::shared(SurfaceConfig {
            frame_interval: Duration::ZERO,
            max_frames,
            ..SurfaceConfig::default()
        });
        register_all(&mut interp, &surface, Rc::new(RefCell::new(ScriptedReader::default())));
        Self {
            interp,
            surface,
            output,
        }
    }

    pub fn run(&mut self, source: &str) -> GemResult<Value> {
        let program = parser::parse_source(source)?;
        self.interp.run(&program)
    }

    pub fn lines(&self) -> Vec<String> {
        self.output.borrow().clone()
    }
}
