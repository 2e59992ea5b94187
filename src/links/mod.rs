//! Link registration and rendering
//!
//! The registry stores what each subject declares; the resolver turns those
//! declarations into concrete links for one request's token bindings.

pub mod registry;
pub mod resolver;

pub use registry::{DefinitionBuilder, DefinitionHandle, RelationshipRegistry};
pub use resolver::LinkResolver;
