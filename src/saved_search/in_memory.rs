//! InMemorySavedSearchStore - JSON text in memory, for testing and development.

use std::sync::{Arc, RwLock};

use super::{SavedSearch, SavedSearchStore, StorageError};

/// In-memory store that keeps the list as serialized JSON, so every write
/// round-trips through the same text format a durable store would use.
///
/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemorySavedSearchStore {
    storage: Arc<RwLock<Option<String>>>,
}

impl InMemorySavedSearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw text, e.g. a value left behind by an older client.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    /// The stored JSON text, if anything has been written.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("raw read"))?;
        Ok(storage.clone())
    }
}

impl SavedSearchStore for InMemorySavedSearchStore {
    fn load(&self) -> Result<Vec<SavedSearch>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("load"))?;

        match storage.as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, searches: &[SavedSearch]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(searches)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("save"))?;
        *storage = Some(raw);
        Ok(())
    }
}
