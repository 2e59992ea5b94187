//! Core module containing the data model shared by registration and rendering

pub mod error;
pub mod factory;
pub mod link;
pub mod namespace;
pub mod rel;
pub mod resource;
pub mod subject;
pub mod template;
pub mod tokens;

pub use error::{ConfigError, FactoryError, HyperError, RegistryError, Result};
pub use factory::{
    Embedded, FactoryRegistry, JsonResourceFactory, NullResourceFactory, ResourceFactory, Subject,
};
pub use link::{Gate, Link, LinkDefinition};
pub use namespace::{Namespace, Namespaces};
pub use resource::{Properties, Resource};
pub use subject::{SubjectKey, SubjectMode};
pub use tokens::TokenBindings;
