//! Resource assembly: links + namespaces from the registry, everything else
//! from a resource factory strategy
//!
//! The assembler is built once from a frozen registry and shared by every
//! request handler. Token bindings are per request and passed by reference.
//!
//! ```rust,ignore
//! use hyperrel::prelude::*;
//! use std::sync::Arc;
//!
//! let assembler = ResourceAssembler::new(
//!     Arc::new(registry.frozen()),
//!     Arc::new(FactoryRegistry::with_default(JsonResourceFactory::new())),
//! )?;
//!
//! let mut bindings = TokenBindings::new();
//! bindings.bind("entryId", entry.id);
//! let resource = assembler.assemble_single(&Subject::from_serialize("entry", &entry)?, "*", &bindings)?;
//! ```

use crate::core::error::{FactoryError, RegistryError};
use crate::core::factory::{FactoryRegistry, ResourceFactory, Subject};
use crate::core::link::Link;
use crate::core::resource::Resource;
use crate::core::subject::SubjectKey;
use crate::core::tokens::TokenBindings;
use crate::links::registry::RelationshipRegistry;
use crate::links::resolver::LinkResolver;
use std::sync::Arc;

/// Builds [`Resource`] trees for single subjects and collections
#[derive(Debug, Clone)]
pub struct ResourceAssembler {
    registry: Arc<RelationshipRegistry>,
    factories: Arc<FactoryRegistry>,
}

impl ResourceAssembler {
    /// Create an assembler over a frozen registry
    pub fn new(
        registry: Arc<RelationshipRegistry>,
        factories: Arc<FactoryRegistry>,
    ) -> Result<Self, RegistryError> {
        if !registry.is_frozen() {
            return Err(RegistryError::NotFrozen);
        }

        Ok(Self {
            registry,
            factories,
        })
    }

    pub fn registry(&self) -> &RelationshipRegistry {
        &self.registry
    }

    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    /// Rendered links for a subject key, in declaration order
    pub fn links_for(&self, key: &SubjectKey, bindings: &TokenBindings) -> Vec<Link> {
        LinkResolver::resolve_all(self.registry.lookup(key), bindings)
    }

    /// Assemble one subject with its own type's singular links
    ///
    /// Embedded sub-instances reported by the factory are assembled the same
    /// way, recursively, each with its own type's links.
    pub fn assemble_single(
        &self,
        subject: &Subject,
        strategy_key: &str,
        bindings: &TokenBindings,
    ) -> Result<Resource, FactoryError> {
        let factory = self.factories.resolve(strategy_key)?;
        self.assemble_with(factory.as_ref(), subject, bindings)
    }

    /// Assemble a collection resource for `type_name`
    ///
    /// The resource gets the collection links registered for `type_name`. When
    /// `embed_rel` is given and `subjects` is non-empty, each element is
    /// assembled as a single resource and embedded under that rel. An empty
    /// slice stands for a missing collection and is never an error.
    pub fn assemble_collection(
        &self,
        subjects: &[Subject],
        type_name: &str,
        embed_rel: Option<&str>,
        strategy_key: &str,
        bindings: &TokenBindings,
    ) -> Result<Resource, FactoryError> {
        let factory = self.factories.resolve(strategy_key)?;
        let key = SubjectKey::for_collection_of(type_name);

        let mut resource = Resource {
            namespaces: self.registry.namespaces().to_vec(),
            links: self.links_for(&key, bindings),
            ..Resource::default()
        };

        if let Some(rel) = embed_rel.filter(|_| !subjects.is_empty()) {
            let items = subjects
                .iter()
                .map(|subject| self.assemble_with(factory.as_ref(), subject, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            resource.embedded.insert(rel.to_string(), items);
        }

        Ok(resource)
    }

    /// See [`RelationshipRegistry::is_array_rel`]
    pub fn is_array_rel(&self, type_name: &str, rel: &str) -> bool {
        self.registry.is_array_rel(type_name, rel)
    }

    /// See [`RelationshipRegistry::is_collection_array_rel`]
    pub fn is_collection_array_rel(&self, type_name: &str, rel: &str) -> bool {
        self.registry.is_collection_array_rel(type_name, rel)
    }

    fn assemble_with(
        &self,
        factory: &dyn ResourceFactory,
        subject: &Subject,
        bindings: &TokenBindings,
    ) -> Result<Resource, FactoryError> {
        let key = SubjectKey::for_class(subject.type_name.as_str());

        let mut resource = Resource {
            namespaces: self.registry.namespaces().to_vec(),
            links: self.links_for(&key, bindings),
            properties: factory.extract_properties(subject)?,
            ..Resource::default()
        };

        for (rel, embedded) in factory.extract_embedded(subject)? {
            let children = embedded
                .into_subjects()
                .iter()
                .map(|child| self.assemble_with(factory, child, bindings))
                .collect::<Result<Vec<_>, _>>()?;

            if !children.is_empty() {
                resource.embedded.insert(rel, children);
            }
        }

        Ok(resource)
    }
}
