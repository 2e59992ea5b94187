//! Link definitions (what a type declares) and rendered links (what a request sees)

use crate::core::template;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Condition controlling whether an optional definition is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Render only once every placeholder of the definition (href and all
    /// query templates) has a binding. Typical for paging links.
    DefaultGate,

    /// Render only when the named token is bound to anything but `"false"`,
    /// regardless of the definition's own placeholders. Typical for
    /// permission-gated actions.
    NamedGate(String),
}

/// A parametric link declared once for a subject key
///
/// Definitions are immutable once the registry is frozen and are rendered
/// into [`Link`]s by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDefinition {
    /// The relation name (e.g., "self", "next", "edit")
    pub rel: String,

    /// URI template for the href, e.g. "/entries/{entryId}"
    pub href: String,

    /// Query templates appended when fully bound, e.g. "limit={limit}"
    pub query: Vec<String>,

    /// Rendering attributes copied verbatim onto the link (e.g., method, title)
    pub attributes: IndexMap<String, String>,

    /// `None` means the link is always rendered
    pub optional: Option<Gate>,

    /// Declared through the plural `rels` helper: the rel stands for a list
    pub array: bool,
}

impl LinkDefinition {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            query: Vec::new(),
            attributes: IndexMap::new(),
            optional: None,
            array: false,
        }
    }

    /// Every placeholder referenced by the href and the query templates
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = template::placeholders(&self.href);
        for query in &self.query {
            names.extend(template::placeholders(query));
        }
        names
    }

    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }
}

/// A concrete link produced for one rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
