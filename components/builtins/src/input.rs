//! Line sources for the `input` native

use core_types::{ErrorKind, GemError, GemResult};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A source of input lines
pub trait LineReader {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> GemResult<Option<String>>;
}

/// Reads from the process stdin
#[derive(Debug, Default)]
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> GemResult<Option<String>> {
        let io_error = |e: io::Error| GemError::new(ErrorKind::IoError, e.to_string());

        if !prompt.is_empty() {
            let mut stdout = io::stdout();
            stdout.write_all(prompt.as_bytes()).map_err(io_error)?;
            stdout.flush().map_err(io_error)?;
        }

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Serves a fixed list of lines, for embedding hosts and tests
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    /// Create a reader that yields `lines` in order
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> GemResult<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
