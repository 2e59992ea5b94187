//! Placeholder scanning and substitution for URI templates
//!
//! A placeholder is any `{name}` span. Substitution is best effort: names
//! without a binding are left in place, braces included. No RFC 6570
//! operators, no percent-encoding, no nested expansion.

use crate::core::tokens::TokenBindings;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^{}]*)\}").unwrap())
}

/// Names of every placeholder in `template`, in order of appearance
///
/// ```
/// use hyperrel::core::template::placeholders;
///
/// assert_eq!(placeholders("/blogs/{blogId}/entries/{entryId}"), vec!["blogId", "entryId"]);
/// ```
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// True when every placeholder in `template` has a binding
pub fn is_fully_bound(template: &str, bindings: &TokenBindings) -> bool {
    placeholders(template)
        .into_iter()
        .all(|name| bindings.contains(name))
}

/// Replace bound placeholders, leaving unbound ones untouched
pub fn substitute(template: &str, bindings: &TokenBindings) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Replace every placeholder, or return `None` if any is unbound
pub fn substitute_all(template: &str, bindings: &TokenBindings) -> Option<String> {
    if is_fully_bound(template, bindings) {
        Some(substitute(template, bindings))
    } else {
        None
    }
}
