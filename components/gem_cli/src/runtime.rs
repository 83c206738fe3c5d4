//! Runtime orchestration for Gemstone execution
//!
//! The Runtime struct ties the components together:
//! - Lexer and Parser for turning source into a program
//! - Interpreter for execution
//! - The host surface and natives from `builtins`

use crate::error::{CliError, CliResult};
use builtins::{LineReader, SharedSurface, StdinReader, Surface, SurfaceConfig};
use interpreter::{ConsoleWriter, Interpreter, Value};
use parser::{Node, Statement};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Main runtime that owns one interpreter and its host surface
pub struct Runtime {
    /// Whether to print the token stream before execution
    print_tokens: bool,
    /// Whether to print the AST before execution
    print_ast: bool,
    /// Persistent interpreter, so globals survive between REPL lines
    interpreter: Interpreter,
    /// Host surface shared with the natives
    surface: SharedSurface,
}

impl Runtime {
    /// Create a runtime with every native registered, reading `input`
    /// from stdin and writing to stdout
    ///
    /// # Example
    /// ```
    /// use gem_cli::Runtime;
    ///
    /// let mut runtime = Runtime::new();
    /// let result = runtime.execute_string("mem x = 40 + 2").unwrap();
    /// assert_eq!(result.to_string(), "42");
    /// ```
    pub fn new() -> Self {
        let surface = Surface::shared(SurfaceConfig::default());
        let mut interpreter = Interpreter::new();
        builtins::register_all(
            &mut interpreter,
            &surface,
            Rc::new(RefCell::new(StdinReader)),
        );
        Self {
            print_tokens: false,
            print_ast: false,
            interpreter,
            surface,
        }
    }

    /// Send program output to `console`
    pub fn with_console(mut self, console: Box<dyn ConsoleWriter>) -> Self {
        self.interpreter = std::mem::take(&mut self.interpreter).with_console(console);
        self
    }

    /// Serve `input` from `reader`
    pub fn with_reader(mut self, reader: Rc<RefCell<dyn LineReader>>) -> Self {
        builtins::stdlib::register(&mut self.interpreter, reader);
        self
    }

    /// Enable token printing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable AST printing
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Reconfigure the host surface. The natives keep their handle.
    pub fn with_surface_config(self, config: SurfaceConfig) -> Self {
        *self.surface.borrow_mut() = Surface::new(config);
        self
    }

    /// Set the nested call limit
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.interpreter = std::mem::take(&mut self.interpreter).with_max_call_depth(depth);
        self
    }

    /// Execute a script file
    ///
    /// # Errors
    /// Returns `CliError::Io` if the file cannot be read and
    /// `CliError::Gem` if lexing, parsing or execution fails
    ///
    /// # Example
    /// ```no_run
    /// use gem_cli::Runtime;
    ///
    /// let mut runtime = Runtime::new();
    /// runtime.execute_file("game.gem").unwrap();
    /// ```
    pub fn execute_file(&mut self, path: &str) -> CliResult<Value> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        info!(path, bytes = source.len(), "executing file");
        self.execute_string(&source)
    }

    /// Execute a source string as one program unit
    ///
    /// Returns the value of the last statement, or the value of a
    /// top-level `return`.
    pub fn execute_string(&mut self, source: &str) -> CliResult<Value> {
        let program = self.parse(source)?;
        Ok(self.interpreter.run_statements(&program)?)
    }

    /// Execute one REPL input.
    ///
    /// `echo` receives the result of every top-level statement other than
    /// `emit` whose value is not nothing.
    pub fn execute_line(&mut self, line: &str, mut echo: impl FnMut(&Value)) -> CliResult<()> {
        let program = self.parse(line)?;
        for statement in &program {
            let completion = self.interpreter.run_located(statement)?;
            let stop = completion.is_return();
            let value = completion.into_value();
            if !matches!(statement.node, Node::Emit { .. }) && !matches!(value, Value::Nothing) {
                echo(&value);
            }
            if stop {
                break;
            }
        }
        Ok(())
    }

    fn parse(&self, source: &str) -> CliResult<Vec<Statement>> {
        let tokens = parser::tokenize(source)?;
        debug!(tokens = tokens.len(), "lexed source");

        if self.print_tokens {
            let rendered: Vec<String> = tokens.iter().map(|t| t.token.to_string()).collect();
            println!("Tokens: [{}]", rendered.join(", "));
        }

        let program = parser::Parser::new(tokens).parse_statements()?;

        if self.print_ast {
            let nodes: Vec<&Node> = program.iter().map(|s| &s.node).collect();
            println!("AST: {:#?}", nodes);
        }

        Ok(program)
    }

    /// The host surface
    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    /// Access to the interpreter for direct manipulation
    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Start the REPL (Read-Eval-Print Loop)
    ///
    /// # Errors
    /// Returns `CliError::Repl` if the line editor fails
    ///
    /// # Example
    /// ```no_run
    /// use gem_cli::Runtime;
    ///
    /// let mut runtime = Runtime::new();
    /// runtime.repl().unwrap();
    /// ```
    pub fn repl(&mut self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }

    /// Check if token printing is enabled
    pub fn is_print_tokens_enabled(&self) -> bool {
        self.print_tokens
    }

    /// Check if AST printing is enabled
    pub fn is_print_ast_enabled(&self) -> bool {
        self.print_ast
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
