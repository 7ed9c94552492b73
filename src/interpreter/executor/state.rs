//! Evaluation state - the variable table

use std::collections::HashMap;

use crate::interpreter::errors::{BasicError, BasicResult};

/// Variable name to integer value
///
/// Lives for a whole session and is only emptied by an explicit reset.
/// Reading a name that was never set is an error, never an implicit zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalState {
    vars: HashMap<String, i32>,
}

impl EvalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind or rebind `name`
    pub fn set_value(&mut self, name: &str, value: i32) {
        self.vars.insert(name.to_string(), value);
    }

    pub fn get_value(&self, name: &str) -> BasicResult<i32> {
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| BasicError::undefined_variable(name))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn reset(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Snapshot of every binding
    pub fn bindings(&self) -> &HashMap<String, i32> {
        &self.vars
    }
}
