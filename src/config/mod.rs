//! Configuration loading: declare namespaces and rels in YAML
//!
//! ```yaml
//! namespaces:
//!   - name: ea
//!     href: "http://namespaces.example.com/{rel}"
//! subjects:
//!   - type: blog
//!     mode: collection
//!     rels:
//!       - rel: self
//!         href: /blogs
//!         query: ["limit={limit}", "offset={offset}"]
//!       - rel: next
//!         href: "/blogs?limit={nextLimit}&offset={nextOffset}"
//!         optional: true
//!   - type: entry
//!     rels:
//!       - rel: edit
//!         href: "/entries/{entryId}/edit"
//!         optional: adminRole
//!         attributes:
//!           method: PUT
//! ```

use crate::core::error::ConfigError;
use crate::core::namespace::Namespace;
use crate::core::subject::{SubjectKey, SubjectMode};
use crate::links::registry::RelationshipRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a configured rel is gated
///
/// `true` means the default gate, a string names the gating token, `false`
/// (or leaving it out) means the link is always rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionalConfig {
    Flag(bool),
    Token(String),
}

/// Configuration for one link definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelConfig {
    /// Relation name (e.g., "self")
    pub rel: String,

    /// URI template for the href
    pub href: String,

    /// Query templates, appended when fully bound
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,

    /// Rendering attributes (e.g., method, title)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<OptionalConfig>,

    /// Register through the plural helper (array rel); only consulted for
    /// singular subjects
    #[serde(default)]
    pub array: bool,
}

/// All rels declared for one subject key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfig {
    /// Type name used at rendering time
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub mode: SubjectMode,

    #[serde(default)]
    pub rels: Vec<RelConfig>,
}

impl SubjectConfig {
    pub fn key(&self) -> SubjectKey {
        SubjectKey {
            type_name: self.type_name.clone(),
            mode: self.mode,
        }
    }
}

/// Complete configuration for a relationship registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelsConfig {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,

    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
}

impl RelsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge several configurations (e.g., one per module)
    ///
    /// Namespaces are deduplicated by name, later declarations winning.
    /// Subjects are concatenated in order, so rels keep their declaration
    /// order across files.
    pub fn merge(configs: Vec<RelsConfig>) -> Self {
        let mut namespaces: IndexMap<String, Namespace> = IndexMap::new();
        let mut subjects = Vec::new();

        for config in configs {
            for namespace in config.namespaces {
                namespaces.insert(namespace.name.clone(), namespace);
            }
            subjects.extend(config.subjects);
        }

        Self {
            namespaces: namespaces.into_values().collect(),
            subjects,
        }
    }

    /// Register every namespace and rel into `registry`
    ///
    /// All or nothing: on error the registry is left exactly as it was.
    pub fn apply(&self, registry: &mut RelationshipRegistry) -> Result<(), ConfigError> {
        let mut staged = registry.clone();
        self.apply_into(&mut staged)?;
        *registry = staged;

        tracing::debug!(
            subjects = self.subjects.len(),
            namespaces = self.namespaces.len(),
            "Applied rels configuration"
        );
        Ok(())
    }

    fn apply_into(&self, registry: &mut RelationshipRegistry) -> Result<(), ConfigError> {
        registry.add_namespaces(self.namespaces.iter().cloned())?;

        for subject in &self.subjects {
            let key = subject.key();

            for rel in &subject.rels {
                let mut builder = if rel.array {
                    registry.define_array(key.clone(), rel.rel.as_str(), rel.href.as_str())?
                } else {
                    registry.define(key.clone(), rel.rel.as_str(), rel.href.as_str())?
                };

                for query in &rel.query {
                    builder = builder.with_query(query.as_str());
                }
                for (name, value) in &rel.attributes {
                    builder = builder.attribute(name.as_str(), value.as_str());
                }

                match &rel.optional {
                    None | Some(OptionalConfig::Flag(false)) => {}
                    Some(OptionalConfig::Flag(true)) => {
                        builder.optional();
                    }
                    Some(OptionalConfig::Token(token)) => {
                        builder.optional_on(token)?;
                    }
                }
            }
        }

        Ok(())
    }
}
