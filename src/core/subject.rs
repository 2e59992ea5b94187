//! Registration targets: a type name paired with singular or collection mode

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a registration describes one instance or the collection of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubjectMode {
    /// A single instance (e.g., `/entries/{entryId}`)
    #[default]
    Singular,
    /// The resource standing for many instances (e.g., `/entries`)
    #[serde(alias = "collection")]
    CollectionOf,
}

/// Identifies which registry entry a link definition belongs to
///
/// The type is identified by a caller-chosen string (e.g., "blog", "entry")
/// rather than by runtime type information, so the same name must be used
/// at registration and at rendering time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    pub type_name: String,
    pub mode: SubjectMode,
}

impl SubjectKey {
    /// Key for single instances of `type_name`
    pub fn for_class(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            mode: SubjectMode::Singular,
        }
    }

    /// Key for collections of `type_name`
    pub fn for_collection_of(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            mode: SubjectMode::CollectionOf,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.mode == SubjectMode::CollectionOf
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SubjectMode::Singular => write!(f, "{}", self.type_name),
            SubjectMode::CollectionOf => write!(f, "[{}]", self.type_name),
        }
    }
}
