//! # hyperrel
//!
//! Declare the hypermedia link relations ("rels") of each domain type once,
//! as URI templates, then render them into concrete links per request.
//!
//! ## Features
//!
//! - **Relationship Registry**: ordered link definitions per type, for single
//!   instances and for collections, frozen after startup
//! - **Best-effort Templates**: bound `{placeholders}` are substituted,
//!   unbound ones stay literal
//! - **Optional Query Templates**: query parameters only appear once all of
//!   their tokens are bound
//! - **Two Gates**: default gate (all own placeholders bound) for paging links,
//!   named gate (token not `"false"`) for permission-gated actions
//! - **Pluggable Factories**: properties and embedded resources come from a
//!   resource factory strategy chosen per request
//! - **Configuration-Based**: declare rels in YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use hyperrel::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = RelationshipRegistry::new();
//! registry
//!     .define(SubjectKey::for_collection_of("blog"), rel::SELF, "/blogs")?
//!     .with_query("limit={limit}")
//!     .with_query("offset={offset}");
//! registry
//!     .define(SubjectKey::for_class("entry"), "edit", "/entries/{entryId}/edit")?
//!     .attribute("method", "PUT")
//!     .optional_on("adminRole")?;
//!
//! let assembler = ResourceAssembler::new(
//!     Arc::new(registry.frozen()),
//!     Arc::new(FactoryRegistry::with_default(NullResourceFactory)),
//! )?;
//!
//! let mut bindings = TokenBindings::new();
//! bindings.bind("limit", 20).bind("offset", 40);
//!
//! let blogs = assembler.assemble_collection(&[], "blog", Some("blogs"), "*", &bindings)?;
//! assert_eq!(blogs.links[0].href, "/blogs?limit=20&offset=40");
//!
//! bindings.clear();
//! let entry = Subject::new("entry", json!({ "title": "Hello" }));
//! let resource = assembler.assemble_single(&entry, "*", &bindings)?;
//! assert!(resource.links.is_empty());
//! # Ok::<(), hyperrel::core::HyperError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod core;
pub mod links;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{ConfigError, FactoryError, HyperError, RegistryError, Result},
        factory::{
            Embedded, FactoryRegistry, JsonResourceFactory, NullResourceFactory, ResourceFactory,
            Subject, WILDCARD_STRATEGY,
        },
        link::{Gate, Link, LinkDefinition},
        namespace::{Namespace, Namespaces},
        rel,
        resource::{Properties, Resource},
        subject::{SubjectKey, SubjectMode},
        tokens::TokenBindings,
    };

    // === Registration & Rendering ===
    pub use crate::links::{
        registry::{DefinitionBuilder, DefinitionHandle, RelationshipRegistry},
        resolver::LinkResolver,
    };

    // === Assembly ===
    pub use crate::assembler::ResourceAssembler;

    // === Config ===
    pub use crate::config::{OptionalConfig, RelConfig, RelsConfig, SubjectConfig};
}
