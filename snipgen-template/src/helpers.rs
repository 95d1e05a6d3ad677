//! Capability table of helper functions callable from templates.

use indexmap::IndexMap;

/// A helper function taking a single text argument.
///
/// Helpers must be pure: no I/O, no shared mutable state.
#[derive(Debug, Clone, Copy)]
pub enum HelperFn {
    Infallible(fn(&str) -> String),
    Fallible(fn(&str) -> Result<String, String>),
}

impl HelperFn {
    pub fn call(&self, arg: &str) -> Result<String, String> {
        match self {
            HelperFn::Infallible(f) => Ok(f(arg)),
            HelperFn::Fallible(f) => f(arg),
        }
    }
}

/// Helper functions available to a render, keyed by the name templates use.
///
/// The table is passed to each render explicitly; templates can only call
/// what was registered here.
#[derive(Debug, Clone, Default)]
pub struct Helpers {
    table: IndexMap<String, HelperFn>,
}

impl Helpers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper that cannot fail.
    pub fn register(mut self, name: impl Into<String>, f: fn(&str) -> String) -> Self {
        self.table.insert(name.into(), HelperFn::Infallible(f));
        self
    }

    /// Register a helper that reports failures as a message.
    pub fn register_fallible(
        mut self,
        name: impl Into<String>,
        f: fn(&str) -> Result<String, String>,
    ) -> Self {
        self.table.insert(name.into(), HelperFn::Fallible(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<HelperFn> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered helper names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(s: &str) -> String {
        s.to_ascii_uppercase()
    }

    fn strict(s: &str) -> Result<String, String> {
        if s.is_empty() {
            Err("empty input".to_string())
        } else {
            Ok(s.to_string())
        }
    }

    #[test]
    fn test_register_and_call() {
        let helpers = Helpers::new()
            .register("shout", shout)
            .register_fallible("strict", strict);

        assert_eq!(helpers.get("shout").unwrap().call("hi"), Ok("HI".to_string()));
        assert_eq!(
            helpers.get("strict").unwrap().call(""),
            Err("empty input".to_string())
        );
        assert!(helpers.get("missing").is_none());
        assert_eq!(helpers.names().collect::<Vec<_>>(), vec!["shout", "strict"]);
    }
}
