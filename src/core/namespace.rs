//! Namespaces (CURIE prefixes) describing rel vocabularies

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A declared (prefix, URI-template) pair, e.g. `ea` → `http://example.com/rels/{rel}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Namespace {
    /// The prefix used in compact rel names (e.g., "ea" in "ea:orders")
    pub name: String,

    /// Template for the documentation URI of rels under this prefix
    pub href: String,
}

impl Namespace {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

/// Insertion-ordered set of namespaces keyed by name
///
/// Adding a namespace whose name is already present replaces its template
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    entries: IndexMap<String, Namespace>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a namespace
    pub fn add(&mut self, namespace: Namespace) {
        self.entries.insert(namespace.name.clone(), namespace);
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.entries.values()
    }

    /// Snapshot in declaration order, for attaching to a resource
    pub fn to_vec(&self) -> Vec<Namespace> {
        self.entries.values().cloned().collect()
    }
}

impl FromIterator<Namespace> for Namespaces {
    fn from_iter<I: IntoIterator<Item = Namespace>>(iter: I) -> Self {
        let mut namespaces = Namespaces::new();
        for namespace in iter {
            namespaces.add(namespace);
        }
        namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_preserve_insertion_order() {
        let namespaces: Namespaces = vec![
            Namespace::new("ea", "http://namespaces.example.com/{rel}"),
            Namespace::new("blog", "http://blog.example.com/{rel}"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = namespaces.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(names, vec!["ea", "blog"]);
    }

    #[test]
    fn test_duplicate_name_overwrites_in_place() {
        let mut namespaces = Namespaces::new();
        namespaces.add(Namespace::new("ea", "http://old.example.com/{rel}"));
        namespaces.add(Namespace::new("blog", "http://blog.example.com/{rel}"));
        namespaces.add(Namespace::new("ea", "http://new.example.com/{rel}"));

        assert_eq!(namespaces.len(), 2);
        assert_eq!(
            namespaces.get("ea").unwrap().href,
            "http://new.example.com/{rel}"
        );
        assert_eq!(namespaces.to_vec()[0].name, "ea");
    }

    #[test]
    fn test_empty_namespaces() {
        let namespaces = Namespaces::new();
        assert!(namespaces.is_empty());
        assert!(namespaces.to_vec().is_empty());
    }
}
