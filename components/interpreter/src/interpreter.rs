//! Tree-walking evaluator.
//!
//! `visit` is an exhaustive match over `Node`. A `return` does not travel as
//! an error: every visit yields a [`Completion`], and statement sequences
//! stop as soon as they see `Completion::Return`.

use crate::console::{ConsoleWriter, StdoutWriter};
use crate::environment::{Environment, Scope};
use crate::error::{arity_error, name_error, type_error};
use crate::operators;
use crate::value::{DictKey, Function, NativeFunction};
use crate::Value;
use core_types::{ErrorKind, GemError, GemResult};
use parser::{Node, Number, Statement};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// Default limit on nested user function calls
///
/// Sized so that hitting the limit raises a RecursionError on an ordinary
/// 8 MiB thread instead of overflowing the native stack. Hosts running on a
/// larger stack raise it with [`Interpreter::with_max_call_depth`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Outcome of evaluating a node
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Evaluation finished with a value
    Normal(Value),
    /// A `return` is unwinding toward the nearest call boundary
    Return(Value),
}

impl Completion {
    /// The carried value, whichever way evaluation finished
    pub fn into_value(self) -> Value {
        match self {
            Completion::Normal(value) | Completion::Return(value) => value,
        }
    }

    /// Whether a `return` is pending
    pub fn is_return(&self) -> bool {
        matches!(self, Completion::Return(_))
    }
}

/// Evaluate a sub-expression, handing a pending return straight back to the caller
macro_rules! value {
    ($completion:expr) => {
        match $completion {
            Completion::Normal(value) => value,
            ret @ Completion::Return(_) => return Ok(ret),
        }
    };
}

/// The Gemstone interpreter.
///
/// Holds the global scope, the current scope and the console that `emit`
/// writes to. Host callbacks receive `&mut Interpreter` and can re-enter it
/// with [`Interpreter::call_function`].
///
/// # Examples
///
/// ```
/// use interpreter::{CaptureWriter, Interpreter};
///
/// let (writer, output) = CaptureWriter::new();
/// let mut interp = Interpreter::new().with_console(Box::new(writer));
///
/// let program = parser::parse_source("def add(a, b) return a + b end emit add(2, 3)").unwrap();
/// interp.run(&program).unwrap();
///
/// assert_eq!(*output.borrow(), vec!["5".to_string()]);
/// ```
pub struct Interpreter {
    globals: Scope,
    current: Scope,
    console: Box<dyn ConsoleWriter>,
    call_depth: usize,
    max_call_depth: usize,
}

impl Interpreter {
    /// Create an interpreter with an empty global scope writing to stdout
    pub fn new() -> Self {
        let globals = Environment::new().into_scope();
        Self {
            current: Rc::clone(&globals),
            globals,
            console: Box::new(StdoutWriter),
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Replace the output sink
    pub fn with_console(mut self, console: Box<dyn ConsoleWriter>) -> Self {
        self.console = console;
        self
    }

    /// Set the nested call limit
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// The output sink
    pub fn console(&self) -> &dyn ConsoleWriter {
        self.console.as_ref()
    }

    /// Handle to the global scope
    pub fn globals(&self) -> Scope {
        Rc::clone(&self.globals)
    }

    /// Current nesting of user function calls
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Look up a global binding
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }

    /// Bind a global name
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().set(name, value);
    }

    /// Bind a host callback under `name` in the global scope
    pub fn register_native(
        &mut self,
        name: &str,
        callback: impl Fn(&mut Interpreter, Vec<Value>) -> GemResult<Value> + 'static,
    ) {
        trace!(name, "registering native");
        let native = NativeFunction::new(name, callback);
        self.set_global(name, Value::NativeFunction(Rc::new(native)));
    }

    /// Run a program unit.
    ///
    /// Statements execute in order. A top-level `return` stops the unit and
    /// its value becomes the result; otherwise the result is the value of
    /// the last statement.
    pub fn run(&mut self, program: &[Node]) -> GemResult<Value> {
        trace!(statements = program.len(), "running program");
        let mut last = Value::Nothing;
        for statement in program {
            match self.run_statement(statement)? {
                Completion::Normal(value) => last = value,
                Completion::Return(value) => return Ok(value),
            }
        }
        Ok(last)
    }

    /// Run a program unit whose statements carry source positions.
    ///
    /// Same as [`Interpreter::run`], but an error without a position is
    /// reported at the start of the top-level statement that raised it.
    pub fn run_statements(&mut self, program: &[Statement]) -> GemResult<Value> {
        trace!(statements = program.len(), "running program");
        let mut last = Value::Nothing;
        for statement in program {
            match self.run_located(statement)? {
                Completion::Normal(value) => last = value,
                Completion::Return(value) => return Ok(value),
            }
        }
        Ok(last)
    }

    /// Run one top-level statement
    pub fn run_statement(&mut self, statement: &Node) -> GemResult<Completion> {
        self.visit(statement)
    }

    /// Run one positioned top-level statement
    pub fn run_located(&mut self, statement: &Statement) -> GemResult<Completion> {
        self.visit(&statement.node).map_err(|err| {
            if err.source_position.is_some() {
                err
            } else {
                err.with_position(statement.position)
            }
        })
    }

    /// Evaluate a node
    pub fn visit(&mut self, node: &Node) -> GemResult<Completion> {
        let value = match node {
            Node::Number(Number::Int(n)) => Value::Int(*n),
            Node::Number(Number::Float(x)) => Value::Float(*x),
            Node::String(s) => Value::String(s.clone()),

            Node::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(value!(self.visit(element)?));
                }
                Value::list(items)
            }

            Node::Dict(pairs) => {
                let mut entries = BTreeMap::new();
                for (key_node, value_node) in pairs {
                    let key = value!(self.visit(key_node)?);
                    let key = DictKey::from_value(&key)?;
                    let value = value!(self.visit(value_node)?);
                    entries.insert(key, value);
                }
                Value::dict(entries)
            }

            Node::BinOp { left, op, right } => {
                let left = value!(self.visit(left)?);
                let right = value!(self.visit(right)?);
                operators::binary(*op, left, right)?
            }

            Node::UnaryOp { op, operand } => {
                let operand = value!(self.visit(operand)?);
                operators::unary(*op, operand)?
            }

            Node::VarAccess { name } => self
                .current
                .borrow()
                .get(name)
                .ok_or_else(|| name_error(name))?,

            Node::VarAssign { target, value } => {
                let value = value!(self.visit(value)?);
                value!(self.assign(target, value.clone())?);
                value
            }

            Node::IndexAccess { target, index } => {
                let base = value!(self.visit(target)?);
                let index = value!(self.visit(index)?);
                operators::get_index(&base, &index)?
            }

            Node::MemberAccess { target, member } => {
                let base = value!(self.visit(target)?);
                operators::get_member(&base, member)?
            }

            Node::Emit { expression } => {
                let value = value!(self.visit(expression)?);
                self.console.write(&value.to_string());
                Value::Nothing
            }

            Node::If { cases, else_case } => {
                for (condition, body) in cases {
                    if value!(self.visit(condition)?).is_truthy() {
                        return self.execute_block(body);
                    }
                }
                match else_case {
                    Some(body) => return self.execute_block(body),
                    None => Value::Nothing,
                }
            }

            Node::While { condition, body } => {
                while value!(self.visit(condition)?).is_truthy() {
                    value!(self.execute_block(body)?);
                }
                Value::Nothing
            }

            Node::For {
                variable,
                iterable,
                body,
            } => {
                let iterable = value!(self.visit(iterable)?);
                for item in iteration_items(&iterable)? {
                    self.current.borrow_mut().set(variable.as_str(), item);
                    value!(self.execute_block(body)?);
                }
                Value::Nothing
            }

            Node::FuncDef { name, params, body } => {
                let function = Value::Function(Rc::new(Function {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                }));
                self.current.borrow_mut().set(name.as_str(), function.clone());
                function
            }

            Node::FuncCall { callee, args } => {
                let callee = value!(self.visit(callee)?);
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(value!(self.visit(arg)?));
                }
                self.call_function(&callee, arg_values)?
            }

            Node::Return { value } => {
                let value = value!(self.visit(value)?);
                return Ok(Completion::Return(value));
            }
        };
        Ok(Completion::Normal(value))
    }

    fn assign(&mut self, target: &Node, value: Value) -> GemResult<Completion> {
        match target {
            Node::VarAccess { name } => {
                self.current.borrow_mut().set(name.as_str(), value);
            }
            Node::IndexAccess { target, index } => {
                let base = value!(self.visit(target)?);
                let index = value!(self.visit(index)?);
                operators::set_index(&base, &index, value)?;
            }
            Node::MemberAccess { target, member } => {
                let base = value!(self.visit(target)?);
                operators::set_member(&base, member, value)?;
            }
            other => {
                return Err(GemError::new(
                    ErrorKind::InternalError,
                    format!("Invalid assignment target: {}", other),
                ))
            }
        }
        Ok(Completion::Normal(Value::Nothing))
    }

    /// Run a statement sequence, stopping at the first pending return
    fn execute_block(&mut self, body: &[Node]) -> GemResult<Completion> {
        for statement in body {
            if let ret @ Completion::Return(_) = self.visit(statement)? {
                return Ok(ret);
            }
        }
        Ok(Completion::Normal(Value::Nothing))
    }

    /// Call a function value with evaluated arguments.
    ///
    /// Natives receive the arguments as-is. User functions require an exact
    /// argument count and run in a fresh scope parented to the globals. The
    /// caller's scope is restored whether or not the call fails.
    pub fn call_function(&mut self, callee: &Value, args: Vec<Value>) -> GemResult<Value> {
        match callee {
            Value::NativeFunction(native) => {
                let native = Rc::clone(native);
                debug!(function = %native.name, args = args.len(), "calling native");
                native.call(self, args)
            }
            Value::Function(function) => {
                let function = Rc::clone(function);
                if args.len() != function.params.len() {
                    return Err(arity_error(&function.name, function.params.len(), args.len()));
                }
                self.call_user_function(function, args)
            }
            other => Err(type_error(format!(
                "'{}' object is not callable: {}",
                other.type_name(),
                other.repr()
            ))),
        }
    }

    fn call_user_function(&mut self, function: Rc<Function>, args: Vec<Value>) -> GemResult<Value> {
        if self.call_depth >= self.max_call_depth {
            let mut err = GemError::new(
                ErrorKind::RecursionError,
                format!("Maximum call depth of {} exceeded", self.max_call_depth),
            );
            err.push_frame(function.name.as_str());
            return Err(err);
        }

        let mut scope = Environment::with_parent(Rc::clone(&self.globals));
        for (param, arg) in function.params.iter().zip(args) {
            scope.set(param.as_str(), arg);
        }

        debug!(function = %function.name, depth = self.call_depth + 1, "calling function");
        let previous = std::mem::replace(&mut self.current, scope.into_scope());
        self.call_depth += 1;
        let outcome = self.execute_block(&function.body);
        self.call_depth -= 1;
        self.current = previous;

        match outcome {
            Ok(completion) => Ok(completion.into_value()),
            Err(mut err) => {
                err.push_frame(function.name.as_str());
                Err(err)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Elements a `for` loop walks: list items or string characters.
///
/// Lists are snapshotted, so mutating the list inside the loop does not
/// change the iteration.
fn iteration_items(iterable: &Value) -> GemResult<Vec<Value>> {
    match iterable {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::String(s) => Ok(s.chars().map(|c| Value::String(c.to_string())).collect()),
        other => Err(GemError::new(
            ErrorKind::IterationError,
            format!("'{}' object is not iterable: {}", other.type_name(), other.repr()),
        )),
    }
}
