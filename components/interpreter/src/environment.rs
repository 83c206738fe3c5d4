//! Scopes: name to value maps with an optional parent.

use crate::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A scope shared between the interpreter and the calls running in it
pub type Scope = Rc<RefCell<Environment>>;

/// Symbol table with an optional parent for outer-scope lookup.
///
/// Lookup walks the parent chain. Assignment always binds in this table.
#[derive(Debug, Default)]
pub struct Environment {
    symbols: HashMap<String, Value>,
    parent: Option<Scope>,
}

impl Environment {
    /// Create a root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope whose lookups fall back to `parent`
    pub fn with_parent(parent: Scope) -> Self {
        Self {
            symbols: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Wrap into a shared scope handle
    pub fn into_scope(self) -> Scope {
        Rc::new(RefCell::new(self))
    }

    /// Resolve a name through the scope chain.
    ///
    /// `None` means the name is unbound everywhere. A name bound to
    /// `Value::Nothing` resolves to `Some(Value::Nothing)`.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.symbols.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|p| p.borrow().get(name)),
        }
    }

    /// Bind a name in this scope
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Names bound in this scope, sorted
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.symbols.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let globals = Environment::new().into_scope();
        globals.borrow_mut().set("x", Value::Int(1));

        let local = Environment::with_parent(Rc::clone(&globals));
        assert_eq!(local.get("x"), Some(Value::Int(1)));
        assert_eq!(local.get("y"), None);
    }

    #[test]
    fn test_set_shadows_without_touching_parent() {
        let globals = Environment::new().into_scope();
        globals.borrow_mut().set("x", Value::Int(1));

        let mut local = Environment::with_parent(Rc::clone(&globals));
        local.set("x", Value::Int(2));

        assert_eq!(local.get("x"), Some(Value::Int(2)));
        assert_eq!(globals.borrow().get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn test_bound_nothing_is_not_unbound() {
        let mut env = Environment::new();
        env.set("n", Value::Nothing);
        assert_eq!(env.get("n"), Some(Value::Nothing));
        assert_eq!(env.get("m"), None);
        assert_eq!(env.local_names(), vec!["n".to_string()]);
    }
}
