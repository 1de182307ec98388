//! Saved searches - named, durable snapshots of a filter specification.
//!
//! The registry owns the in-memory list and writes the whole list through a
//! [`SavedSearchStore`] after every change. Snapshots are owned copies, so
//! editing the live filter afterwards never reaches back into them.
//!
//! ## Example
//!
//! ```ignore
//! use yard_search::{InMemorySavedSearchStore, SavedSearchRegistry};
//!
//! let mut registry = SavedSearchRegistry::open(InMemorySavedSearchStore::new());
//! let saved = registry.save("Yard, no title", state.filters())?;
//! state.replace(registry.apply(&saved.id)?);
//! ```

mod in_memory;
#[cfg(feature = "file-store")]
mod json_file;
mod registry;
mod store;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpecification;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub filters: FilterSpecification,
    pub created_at: DateTime<Utc>,
}

/// Error type for saved search registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Caller input failed a precondition.
    Validation(String),
    /// No saved search with this id.
    NotFound { id: String },
    /// The change is applied in memory but could not be written to the store.
    /// `search` is the saved or removed entry.
    Persistence {
        search: Option<SavedSearch>,
        source: StorageError,
    },
}

impl RegistryError {
    /// True when the in-memory registry already reflects the change and only
    /// durability is in doubt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RegistryError::Persistence { .. })
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Validation(msg) => write!(f, "invalid saved search: {}", msg),
            RegistryError::NotFound { id } => write!(f, "saved search not found: {}", id),
            RegistryError::Persistence { source, .. } => write!(
                f,
                "saved searches changed but may not survive a reload: {}",
                source
            ),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Persistence { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for saved search storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Serialization/deserialization error.
    Serde(String),
    /// The storage medium is unavailable or failed.
    Io(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Serde(msg) => write!(f, "saved search serialization error: {}", msg),
            StorageError::Io(msg) => write!(f, "saved search storage error: {}", msg),
            StorageError::LockPoisoned(operation) => {
                write!(f, "saved search store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

pub use in_memory::InMemorySavedSearchStore;
#[cfg(feature = "file-store")]
pub use json_file::JsonFileSavedSearchStore;
pub use registry::SavedSearchRegistry;
pub use store::SavedSearchStore;
