//! Relationship registry: link definitions per subject key, plus namespaces
//!
//! Populated once at startup, then frozen. After [`freeze`](RelationshipRegistry::freeze)
//! every write fails with [`RegistryError::Frozen`], and the registry can be
//! shared read-only (e.g., behind an `Arc`) by every request handler.

use crate::config::RelsConfig;
use crate::core::error::{ConfigError, RegistryError};
use crate::core::link::{Gate, LinkDefinition};
use crate::core::namespace::{Namespace, Namespaces};
use crate::core::subject::{SubjectKey, SubjectMode};
use indexmap::IndexMap;

/// Points at one registered definition so it can be configured later
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionHandle {
    key: SubjectKey,
    index: usize,
}

impl DefinitionHandle {
    pub fn subject(&self) -> &SubjectKey {
        &self.key
    }

    /// Position in the subject's declaration order
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Registry mapping subject keys to their ordered link definitions
#[derive(Debug, Clone, Default)]
pub struct RelationshipRegistry {
    namespaces: Namespaces,
    definitions: IndexMap<SubjectKey, Vec<LinkDefinition>>,
    frozen: bool,
}

impl RelationshipRegistry {
    /// Create a new empty, writable registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a YAML configuration (not frozen)
    pub fn from_config(config: &RelsConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        config.apply(&mut registry)?;
        Ok(registry)
    }

    // === Namespaces ===

    /// Add a namespace, overwriting any namespace with the same name
    pub fn add_namespace(&mut self, namespace: Namespace) -> Result<&mut Self, RegistryError> {
        self.ensure_writable()?;
        self.namespaces.add(namespace);
        Ok(self)
    }

    pub fn add_namespaces(
        &mut self,
        namespaces: impl IntoIterator<Item = Namespace>,
    ) -> Result<&mut Self, RegistryError> {
        self.ensure_writable()?;
        for namespace in namespaces {
            self.namespaces.add(namespace);
        }
        Ok(self)
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    // === Definitions ===

    /// Append a definition for `rel` to the subject's list
    ///
    /// Returns a builder for the new definition. Registering the same
    /// (subject, rel, href) twice is allowed and produces two entries.
    pub fn define(
        &mut self,
        key: SubjectKey,
        rel: impl Into<String>,
        href: impl Into<String>,
    ) -> Result<DefinitionBuilder<'_>, RegistryError> {
        self.push_definition(key, LinkDefinition::new(rel, href))
    }

    /// Like [`define`](Self::define), but classifies the rel as an array rel
    ///
    /// Use it once per representation when a rel points at several targets,
    /// or when the rel names a list of embedded resources. The flag only feeds
    /// [`is_array_rel`](Self::is_array_rel), which reads singular keys; on a
    /// collection key every rel already counts for
    /// [`is_collection_array_rel`](Self::is_collection_array_rel).
    pub fn define_array(
        &mut self,
        key: SubjectKey,
        rel: impl Into<String>,
        href: impl Into<String>,
    ) -> Result<DefinitionBuilder<'_>, RegistryError> {
        let mut definition = LinkDefinition::new(rel, href);
        definition.array = true;
        self.push_definition(key, definition)
    }

    /// Resume configuring a previously defined link
    pub fn configure(
        &mut self,
        handle: &DefinitionHandle,
    ) -> Result<DefinitionBuilder<'_>, RegistryError> {
        self.ensure_writable()?;

        let exists = self
            .definitions
            .get(&handle.key)
            .is_some_and(|defs| handle.index < defs.len());
        if !exists {
            return Err(RegistryError::UnknownHandle {
                type_name: handle.key.to_string(),
                index: handle.index,
            });
        }

        Ok(DefinitionBuilder {
            handle: handle.clone(),
            definitions: &mut self.definitions,
            fresh: false,
        })
    }

    fn push_definition(
        &mut self,
        key: SubjectKey,
        definition: LinkDefinition,
    ) -> Result<DefinitionBuilder<'_>, RegistryError> {
        self.ensure_writable()?;

        if definition.rel.trim().is_empty() {
            return Err(RegistryError::EmptyRel {
                type_name: key.to_string(),
            });
        }

        let definitions = self.definitions.entry(key.clone()).or_default();

        if definitions
            .iter()
            .any(|d| d.rel == definition.rel && d.href == definition.href)
        {
            tracing::warn!(
                subject = %key,
                rel = %definition.rel,
                href = %definition.href,
                "Duplicate link definition registered"
            );
        }

        definitions.push(definition);
        let index = definitions.len() - 1;

        Ok(DefinitionBuilder {
            handle: DefinitionHandle { key, index },
            definitions: &mut self.definitions,
            fresh: true,
        })
    }

    /// Definitions registered for `key`, in declaration order
    ///
    /// An unregistered subject simply has no definitions.
    pub fn lookup(&self, key: &SubjectKey) -> &[LinkDefinition] {
        match self.definitions.get(key) {
            Some(definitions) => definitions.as_slice(),
            None => {
                tracing::debug!(subject = %key, "No link definitions registered");
                &[]
            }
        }
    }

    /// Whether `rel`, as an embedded key on a single `type_name` resource,
    /// stands for a list of sub-resources
    pub fn is_array_rel(&self, type_name: &str, rel: &str) -> bool {
        self.lookup_mode(type_name, SubjectMode::Singular)
            .iter()
            .any(|d| d.rel == rel && d.array)
    }

    /// Whether `rel` was registered for the collection of `type_name`
    ///
    /// Any registration under the collection key counts; the array flag is
    /// not consulted.
    pub fn is_collection_array_rel(&self, type_name: &str, rel: &str) -> bool {
        self.lookup_mode(type_name, SubjectMode::CollectionOf)
            .iter()
            .any(|d| d.rel == rel)
    }

    fn lookup_mode(&self, type_name: &str, mode: SubjectMode) -> &[LinkDefinition] {
        let key = SubjectKey {
            type_name: type_name.to_string(),
            mode,
        };
        self.definitions.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every subject key with at least one definition, in registration order
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectKey> {
        self.definitions.keys()
    }

    /// Total number of definitions across all subjects
    pub fn definition_count(&self) -> usize {
        self.definitions.values().map(Vec::len).sum()
    }

    // === Lifecycle ===

    /// Make the registry read-only
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::info!(
                subjects = self.definitions.len(),
                definitions = self.definition_count(),
                namespaces = self.namespaces.len(),
                "Relationship registry frozen"
            );
        }
        self.frozen = true;
    }

    /// Freeze and return the registry, for builder-style setup
    pub fn frozen(mut self) -> Self {
        self.freeze();
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_writable(&self) -> Result<(), RegistryError> {
        if self.frozen {
            Err(RegistryError::Frozen)
        } else {
            Ok(())
        }
    }
}

/// Configures one freshly defined (or re-opened) link definition
///
/// Each method consumes and returns the builder so calls chain; the borrow
/// on the registry ends with the builder. A fresh definition whose
/// configuration fails is removed again, so a rejected registration never
/// leaves a weaker definition behind.
#[derive(Debug)]
pub struct DefinitionBuilder<'a> {
    handle: DefinitionHandle,
    definitions: &'a mut IndexMap<SubjectKey, Vec<LinkDefinition>>,
    fresh: bool,
}

impl DefinitionBuilder<'_> {
    fn definition_mut(&mut self) -> &mut LinkDefinition {
        &mut self.definitions[&self.handle.key][self.handle.index]
    }

    /// Append a query template, e.g. `"limit={limit}"`
    ///
    /// The template is rendered only when all of its placeholders are bound.
    pub fn with_query(mut self, template: impl Into<String>) -> Self {
        self.definition_mut().query.push(template.into());
        self
    }

    /// Record a rendering attribute copied onto the link (e.g., method=PUT)
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.definition_mut()
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// Render only once every placeholder of this definition is bound
    pub fn optional(mut self) -> Self {
        self.definition_mut().optional = Some(Gate::DefaultGate);
        self
    }

    /// Render only when `token` is bound to something other than `"false"`
    ///
    /// The token may be written bare (`adminRole`) or as a placeholder
    /// (`{adminRole}`). An empty token is rejected; a definition created by
    /// the same `define` call is then withdrawn from the registry.
    pub fn optional_on(mut self, token: impl AsRef<str>) -> Result<Self, RegistryError> {
        let name = gate_token_name(token.as_ref());

        if name.is_empty() {
            let err = RegistryError::EmptyGateToken {
                type_name: self.handle.key.to_string(),
                rel: self.definition().rel.clone(),
            };
            if self.fresh {
                self.withdraw();
            }
            return Err(err);
        }

        self.definition_mut().optional = Some(Gate::NamedGate(name.to_string()));
        Ok(self)
    }

    /// Classify the rel as an array rel
    pub fn array(mut self) -> Self {
        self.definition_mut().array = true;
        self
    }

    /// Handle for configuring this definition again later
    pub fn handle(&self) -> DefinitionHandle {
        self.handle.clone()
    }

    pub fn definition(&self) -> &LinkDefinition {
        &self.definitions[&self.handle.key][self.handle.index]
    }

    fn withdraw(&mut self) {
        let key = &self.handle.key;
        let now_empty = match self.definitions.get_mut(key) {
            Some(defs) => {
                defs.truncate(self.handle.index);
                defs.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.definitions.shift_remove(key);
        }
        tracing::debug!(subject = %key, index = self.handle.index, "Withdrew rejected link definition");
    }
}

fn gate_token_name(token: &str) -> &str {
    let token = token.trim();
    token
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(token)
        .trim()
}
