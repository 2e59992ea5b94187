//! Typed error handling for hyperrel
//!
//! Rendering itself never fails: unresolved placeholders are left literal or
//! gate a definition out. Errors only come from three places:
//!
//! - [`RegistryError`]: invalid registrations, or writes after `freeze()`
//! - [`FactoryError`]: resource factory strategies that cannot introspect a subject
//! - [`ConfigError`]: YAML registration files that cannot be read or applied
//!
//! [`HyperError`] wraps all of them for callers that do not care which.
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperrel::prelude::*;
//!
//! match registry.define(SubjectKey::for_class("entry"), "", "/entries") {
//!     Err(RegistryError::EmptyRel { type_name }) => eprintln!("bad rel on {type_name}"),
//!     Err(e) => eprintln!("other error: {e}"),
//!     Ok(_) => {}
//! }
//! ```

use thiserror::Error;

/// Convenience alias used across the crate's public surface
pub type Result<T, E = HyperError> = std::result::Result<T, E>;

/// The umbrella error type
#[derive(Debug, Error)]
pub enum HyperError {
    /// Relationship registry errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Resource factory errors, propagated uninterpreted
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// Configuration loading errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HyperError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HyperError::Registry(e) => e.error_code(),
            HyperError::Factory(e) => e.error_code(),
            HyperError::Config(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while registering link definitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry was frozen and no longer accepts registrations
    #[error("relationship registry is frozen; register everything before freeze()")]
    Frozen,

    /// An operation needed a frozen registry
    #[error("relationship registry must be frozen before rendering")]
    NotFrozen,

    /// A named gate was configured without a token name
    #[error("optional gate for rel '{rel}' on '{type_name}' has an empty token name")]
    EmptyGateToken { type_name: String, rel: String },

    /// A definition was declared without a rel name
    #[error("link definition on '{type_name}' has an empty rel name")]
    EmptyRel { type_name: String },

    /// A definition handle does not point to a registered definition
    #[error("no link definition #{index} registered for '{type_name}'")]
    UnknownHandle { type_name: String, index: usize },
}

impl RegistryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::Frozen => "REGISTRY_FROZEN",
            RegistryError::NotFrozen => "REGISTRY_NOT_FROZEN",
            RegistryError::EmptyGateToken { .. } => "EMPTY_GATE_TOKEN",
            RegistryError::EmptyRel { .. } => "EMPTY_REL",
            RegistryError::UnknownHandle { .. } => "UNKNOWN_DEFINITION_HANDLE",
        }
    }
}

// =============================================================================
// Factory Errors
// =============================================================================

/// Errors raised by resource factory strategies
#[derive(Debug, Error)]
pub enum FactoryError {
    /// No strategy registered for the key, and no `*` fallback
    #[error("no resource factory strategy registered for '{key}'")]
    UnknownStrategy { key: String },

    /// The subject value cannot be read as an object
    #[error("subject of type '{type_name}' is not a JSON object")]
    NotAnObject { type_name: String },

    /// A domain value could not be converted into a subject
    #[error("failed to serialize subject of type '{type_name}': {source}")]
    Serialization {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by a custom strategy
    #[error("resource factory strategy failed: {0}")]
    Strategy(#[from] anyhow::Error),
}

impl FactoryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FactoryError::UnknownStrategy { .. } => "UNKNOWN_FACTORY_STRATEGY",
            FactoryError::NotAnObject { .. } => "SUBJECT_NOT_AN_OBJECT",
            FactoryError::Serialization { .. } => "SUBJECT_SERIALIZATION_ERROR",
            FactoryError::Strategy(_) => "FACTORY_STRATEGY_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading YAML registrations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A parsed registration was rejected by the registry
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Yaml(_) => "CONFIG_PARSE_ERROR",
            ConfigError::Registry(e) => e.error_code(),
        }
    }
}
