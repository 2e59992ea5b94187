//! Resource factory strategies
//!
//! The assembler owns links and namespaces; everything else about a resource
//! (its properties and embedded sub-resources) comes from a pluggable
//! [`ResourceFactory`]. Strategies are registered per key, typically a media
//! type, with `*` as the catch-all.

use crate::core::error::FactoryError;
use crate::core::resource::Properties;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Strategy key matching any request
pub const WILDCARD_STRATEGY: &str = "*";

/// A domain instance to render, tagged with its registered type name
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub type_name: String,
    pub value: serde_json::Value,
}

impl Subject {
    pub fn new(type_name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            value,
        }
    }

    /// Build a subject from any serializable domain value
    pub fn from_serialize<T: Serialize>(
        type_name: impl Into<String>,
        value: &T,
    ) -> Result<Self, FactoryError> {
        let type_name = type_name.into();
        let value = serde_json::to_value(value).map_err(|source| FactoryError::Serialization {
            type_name: type_name.clone(),
            source,
        })?;
        Ok(Self { type_name, value })
    }
}

/// Embedded sub-instances found under one rel of a subject
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    One(Subject),
    Many(Vec<Subject>),
}

impl Embedded {
    pub fn into_subjects(self) -> Vec<Subject> {
        match self {
            Embedded::One(subject) => vec![subject],
            Embedded::Many(subjects) => subjects,
        }
    }
}

/// Extracts the non-link parts of a resource from a subject
pub trait ResourceFactory: Send + Sync {
    /// Properties rendered on the resource itself
    fn extract_properties(&self, subject: &Subject) -> Result<Properties, FactoryError>;

    /// Sub-instances rendered as embedded resources, keyed by rel
    fn extract_embedded(
        &self,
        subject: &Subject,
    ) -> Result<IndexMap<String, Embedded>, FactoryError>;
}

/// Strategy that extracts nothing, for when only link structure matters
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResourceFactory;

impl ResourceFactory for NullResourceFactory {
    fn extract_properties(&self, _subject: &Subject) -> Result<Properties, FactoryError> {
        Ok(Properties::new())
    }

    fn extract_embedded(
        &self,
        _subject: &Subject,
    ) -> Result<IndexMap<String, Embedded>, FactoryError> {
        Ok(IndexMap::new())
    }
}

/// Where an embedded field's values are rendered, and as which type
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmbeddedField {
    field: String,
    type_name: String,
}

/// Strategy reading subjects as JSON objects
///
/// Every top-level field becomes a property, except fields declared with
/// [`embed`](Self::embed), which become embedded sub-resources under a rel
/// named after the field. `null` subjects produce an empty resource.
#[derive(Debug, Clone, Default)]
pub struct JsonResourceFactory {
    embedded: HashMap<String, Vec<EmbeddedField>>,
}

impl JsonResourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `field` of `type_name` as embedded instances of `embedded_type`
    pub fn embed(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        embedded_type: impl Into<String>,
    ) -> Self {
        self.embedded
            .entry(type_name.into())
            .or_default()
            .push(EmbeddedField {
                field: field.into(),
                type_name: embedded_type.into(),
            });
        self
    }

    fn embedded_fields(&self, type_name: &str) -> &[EmbeddedField] {
        self.embedded.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_embedded_field(&self, type_name: &str, field: &str) -> bool {
        self.embedded_fields(type_name)
            .iter()
            .any(|declared| declared.field == field)
    }

    fn object<'a>(
        subject: &'a Subject,
    ) -> Result<Option<&'a serde_json::Map<String, serde_json::Value>>, FactoryError> {
        match &subject.value {
            serde_json::Value::Object(map) => Ok(Some(map)),
            serde_json::Value::Null => Ok(None),
            _ => Err(FactoryError::NotAnObject {
                type_name: subject.type_name.clone(),
            }),
        }
    }
}

impl ResourceFactory for JsonResourceFactory {
    fn extract_properties(&self, subject: &Subject) -> Result<Properties, FactoryError> {
        let Some(map) = Self::object(subject)? else {
            return Ok(Properties::new());
        };

        Ok(map
            .iter()
            .filter(|(field, _)| !self.is_embedded_field(&subject.type_name, field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect())
    }

    fn extract_embedded(
        &self,
        subject: &Subject,
    ) -> Result<IndexMap<String, Embedded>, FactoryError> {
        let mut embedded = IndexMap::new();
        let Some(map) = Self::object(subject)? else {
            return Ok(embedded);
        };

        for declared in self.embedded_fields(&subject.type_name) {
            let entry = match map.get(&declared.field) {
                None | Some(serde_json::Value::Null) => continue,
                Some(serde_json::Value::Array(items)) => Embedded::Many(
                    items
                        .iter()
                        .map(|item| Subject::new(declared.type_name.clone(), item.clone()))
                        .collect(),
                ),
                Some(value) => Embedded::One(Subject::new(declared.type_name.clone(), value.clone())),
            };
            embedded.insert(declared.field.clone(), entry);
        }

        Ok(embedded)
    }
}

/// Registered strategies keyed by strategy key
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    strategies: HashMap<String, Arc<dyn ResourceFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a single `*` strategy
    pub fn with_default(factory: impl ResourceFactory + 'static) -> Self {
        let mut registry = Self::new();
        registry.register(WILDCARD_STRATEGY, factory);
        registry
    }

    /// Register a strategy under `key`, replacing any previous one
    pub fn register(&mut self, key: impl Into<String>, factory: impl ResourceFactory + 'static) {
        self.strategies.insert(key.into(), Arc::new(factory));
    }

    /// The strategy for `key`, falling back to `*`
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn ResourceFactory>, FactoryError> {
        self.strategies
            .get(key)
            .or_else(|| self.strategies.get(WILDCARD_STRATEGY))
            .cloned()
            .ok_or_else(|| FactoryError::UnknownStrategy {
                key: key.to_string(),
            })
    }

    /// Get all registered strategy keys
    pub fn keys(&self) -> Vec<&str> {
        self.strategies.keys().map(|s| s.as_str()).collect()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("strategies", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_factory_extracts_nothing() {
        let subject = Subject::new("entry", json!({ "title": "Hello" }));

        assert!(NullResourceFactory.extract_properties(&subject).unwrap().is_empty());
        assert!(NullResourceFactory.extract_embedded(&subject).unwrap().is_empty());
    }

    #[test]
    fn test_json_factory_properties() {
        let subject = Subject::new("entry", json!({ "title": "Hello", "body": "World" }));
        let properties = JsonResourceFactory::new().extract_properties(&subject).unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties["title"], json!("Hello"));
        assert_eq!(properties["body"], json!("World"));
    }

    #[test]
    fn test_json_factory_embedded_fields() {
        let factory = JsonResourceFactory::new()
            .embed("blog", "entries", "entry")
            .embed("blog", "owner", "author")
            .embed("blog", "editor", "author");
        let subject = Subject::new(
            "blog",
            json!({
                "name": "Rust notes",
                "entries": [{ "title": "One" }, { "title": "Two" }],
                "owner": { "name": "Ada" },
                "editor": null
            }),
        );

        let properties = factory.extract_properties(&subject).unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["name"], json!("Rust notes"));

        let embedded = factory.extract_embedded(&subject).unwrap();
        assert_eq!(embedded.len(), 2);
        match &embedded["entries"] {
            Embedded::Many(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].type_name, "entry");
            }
            other => panic!("expected many entries, got {:?}", other),
        }
        match &embedded["owner"] {
            Embedded::One(owner) => assert_eq!(owner.type_name, "author"),
            other => panic!("expected one owner, got {:?}", other),
        }
    }

    #[test]
    fn test_json_factory_rejects_scalars() {
        let subject = Subject::new("entry", json!(42));
        let err = JsonResourceFactory::new()
            .extract_properties(&subject)
            .unwrap_err();

        assert!(matches!(err, FactoryError::NotAnObject { type_name } if type_name == "entry"));
    }

    #[test]
    fn test_json_factory_null_subject_is_empty() {
        let subject = Subject::new("entry", serde_json::Value::Null);
        let factory = JsonResourceFactory::new();

        assert!(factory.extract_properties(&subject).unwrap().is_empty());
        assert!(factory.extract_embedded(&subject).unwrap().is_empty());
    }

    #[test]
    fn test_subject_from_serialize() {
        #[derive(Serialize)]
        struct Entry {
            title: String,
        }

        let subject = Subject::from_serialize(
            "entry",
            &Entry {
                title: "Hello".to_string(),
            },
        )
        .unwrap();

        assert_eq!(subject.type_name, "entry");
        assert_eq!(subject.value, json!({ "title": "Hello" }));
    }

    #[test]
    fn test_registry_falls_back_to_wildcard() {
        let mut registry = FactoryRegistry::with_default(NullResourceFactory);
        registry.register("application/json", JsonResourceFactory::new());

        let subject = Subject::new("entry", json!({ "title": "Hello" }));

        let json = registry.resolve("application/json").unwrap();
        assert_eq!(json.extract_properties(&subject).unwrap().len(), 1);

        let fallback = registry.resolve("application/xml").unwrap();
        assert!(fallback.extract_properties(&subject).unwrap().is_empty());
    }

    #[test]
    fn test_registry_unknown_strategy() {
        let registry = FactoryRegistry::new();
        let err = registry.resolve("application/json").err().unwrap();

        assert!(
            matches!(err, FactoryError::UnknownStrategy { key } if key == "application/json")
        );
    }

    #[test]
    fn test_embedded_into_subjects() {
        let one = Embedded::One(Subject::new("entry", json!({})));
        assert_eq!(one.into_subjects().len(), 1);

        let many = Embedded::Many(vec![]);
        assert!(many.into_subjects().is_empty());
    }
}
