//! SavedSearchStore - Storage port for the saved search list.

use super::{SavedSearch, StorageError};

/// Durable storage for the whole saved search list.
///
/// The registry always writes the complete list, so implementations only need
/// whole-value load and replace.
pub trait SavedSearchStore: Send + Sync {
    /// Load every saved search in insertion order. Nothing stored yet is an
    /// empty list, not an error.
    fn load(&self) -> Result<Vec<SavedSearch>, StorageError>;

    /// Replace the stored list.
    fn save(&self, searches: &[SavedSearch]) -> Result<(), StorageError>;
}

impl<S: SavedSearchStore + ?Sized> SavedSearchStore for Box<S> {
    fn load(&self) -> Result<Vec<SavedSearch>, StorageError> {
        (**self).load()
    }

    fn save(&self, searches: &[SavedSearch]) -> Result<(), StorageError> {
        (**self).save(searches)
    }
}
