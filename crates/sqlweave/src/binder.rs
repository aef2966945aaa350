//! Ordered parameter collection for one compilation pass.

use crate::dialect::Dialect;
use crate::value::Value;

/// Collects literal values in emission order and hands out placeholder tokens.
///
/// Values are never deduplicated or reordered: every literal occurrence gets
/// its own slot. One binder is shared by a statement and all of its nested
/// CTEs and subqueries, so numbered placeholders stay monotonic across the
/// whole text.
#[derive(Debug)]
pub struct Binder {
    dialect: &'static Dialect,
    params: Vec<Value>,
}

impl Binder {
    /// Create an empty binder for the dialect.
    pub fn new(dialect: &'static Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Append a value and return its placeholder token.
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.dialect.placeholder(self.params.len()).into_owned()
    }

    /// Append a value and write its placeholder token into `out`.
    pub(crate) fn bind_into(&mut self, value: Value, out: &mut String) {
        self.params.push(value);
        out.push_str(&self.dialect.placeholder(self.params.len()));
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no value has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consume the binder, returning the parameters in placeholder order.
    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}
