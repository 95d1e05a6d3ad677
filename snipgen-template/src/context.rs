//! Named values bound for a single render.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

/// The global variables visible to a template.
///
/// A context is built per render call and read-only while rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    globals: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.globals.insert(name.into(), value.into());
    }

    /// Bind a variable (builder form).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind a serializable value under its serialized field names.
    pub fn insert_serialize<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let value = Value::from_serialize(value)?;
        self.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Names of all bound variables, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }
}
