//! Output sink for `emit` and host printing

use std::cell::RefCell;
use std::rc::Rc;

/// Console output writer trait
pub trait ConsoleWriter {
    /// Write one line of program output
    fn write(&self, message: &str);
}

/// Default console writer that prints to stdout
#[derive(Debug, Default)]
pub struct StdoutWriter;

impl ConsoleWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{}", message);
    }
}

/// Writer that records every line into a shared buffer
#[derive(Debug, Clone)]
pub struct CaptureWriter {
    output: Rc<RefCell<Vec<String>>>,
}

impl CaptureWriter {
    /// Create a writer appending into `output`
    pub fn new_with_output(output: Rc<RefCell<Vec<String>>>) -> Self {
        Self { output }
    }

    /// Create a writer with a fresh buffer, returning both
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let output = Rc::new(RefCell::new(Vec::new()));
        (Self::new_with_output(Rc::clone(&output)), output)
    }
}

impl ConsoleWriter for CaptureWriter {
    fn write(&self, message: &str) {
        self.output.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_writer_records_lines() {
        let (writer, output) = CaptureWriter::new();
        writer.write("a");
        writer.write("b");
        assert_eq!(*output.borrow(), vec!["a".to_string(), "b".to_string()]);
    }
}
