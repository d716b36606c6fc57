//! The shared variable environment

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::value::Value;

/// The captured scope a do-block reads from and writes into
///
/// Cloning is cheap and shares the underlying bindings: the interpreter's
/// continuations and the caller all observe the same scope, and `define`
/// through any clone is visible to every other. Bindings keep insertion
/// order.
///
/// The environment is single-owner for the duration of one interpretation
/// and is not safe for concurrent interpretation of overlapping blocks.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<IndexMap<String, Value>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a binding into the scope, overwriting any previous value
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Look up a name
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Names bound so far, in insertion order
    pub fn names(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bindings.borrow().iter()).finish()
    }
}
