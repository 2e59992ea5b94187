//! Per-request token bindings used to fill URI template placeholders

use std::collections::HashMap;

/// The literal value that turns a named gate off
pub const FALSE_TOKEN: &str = "false";

/// Mapping from placeholder name to its string value
///
/// Create one per logical request (or task), bind the tokens known for that
/// request, render, then drop or [`clear`](Self::clear) it. Never share one
/// instance between overlapping requests.
///
/// ```
/// use hyperrel::core::tokens::TokenBindings;
///
/// let mut bindings = TokenBindings::new();
/// bindings.bind("entryId", 42).bind("adminRole", true);
///
/// assert_eq!(bindings.get("entryId"), Some("42"));
/// assert!(bindings.is_truthy("adminRole"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBindings {
    values: HashMap<String, String>,
}

impl TokenBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the string form of `value`, replacing any prior value
    pub fn bind(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Remove a single binding, returning its value
    pub fn unbind(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// True when `name` is bound to anything other than the literal `"false"`
    ///
    /// An unbound name is not truthy. The empty string is truthy.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| value != FALSE_TOKEN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TokenBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = TokenBindings::new();
        for (name, value) in iter {
            bindings.bind(name, value);
        }
        bindings
    }
}
