//! SavedSearchRegistry - create, list, apply and delete saved searches.

use chrono::Utc;

use super::{RegistryError, SavedSearch, SavedSearchStore, StorageError};
use crate::filter::FilterSpecification;

/// In-memory list of saved searches, written through to a store on change.
///
/// Store failures never lose the caller's change: reads degrade to "keep what
/// we have", writes keep the in-memory mutation and report
/// [`RegistryError::Persistence`].
pub struct SavedSearchRegistry<S: SavedSearchStore> {
    store: S,
    searches: Vec<SavedSearch>,
    last_id: i64,
}

impl<S: SavedSearchStore> SavedSearchRegistry<S> {
    /// Load the stored list. An unreadable store starts the registry empty.
    pub fn open(store: S) -> Self {
        let searches = match store.load() {
            Ok(searches) => searches,
            Err(err) => {
                tracing::warn!(error = %err, "could not load saved searches, starting empty");
                Vec::new()
            }
        };

        let mut registry = Self {
            store,
            searches: Vec::new(),
            last_id: 0,
        };
        registry.adopt(searches);
        registry
    }

    fn adopt(&mut self, searches: Vec<SavedSearch>) {
        let newest = searches
            .iter()
            .filter_map(|search| search.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(newest);
        self.searches = searches;
    }

    /// Re-read the store. On failure the current list is kept.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        match self.store.load() {
            Ok(searches) => {
                self.adopt(searches);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not reload saved searches, keeping current list");
                Err(err)
            }
        }
    }

    /// All saved searches, oldest first.
    pub fn list(&self) -> &[SavedSearch] {
        &self.searches
    }

    pub fn get(&self, id: &str) -> Option<&SavedSearch> {
        self.searches.iter().find(|search| search.id == id)
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot `spec` under `name` and persist the list.
    pub fn save(
        &mut self,
        name: &str,
        spec: &FilterSpecification,
    ) -> Result<SavedSearch, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation(
                "saved search name must not be empty".into(),
            ));
        }

        let search = SavedSearch {
            id: self.next_id(),
            name: name.to_string(),
            filters: spec.clone(),
            created_at: Utc::now(),
        };
        self.searches.push(search.clone());
        tracing::debug!(id = %search.id, name = %search.name, "saved search created");

        self.persist(Some(&search))?;
        Ok(search)
    }

    /// Delete by id. Unknown ids are ignored and nothing is written.
    pub fn remove(&mut self, id: &str) -> Result<(), RegistryError> {
        let Some(index) = self.searches.iter().position(|search| search.id == id) else {
            return Ok(());
        };

        let removed = self.searches.remove(index);
        tracing::debug!(id = %removed.id, "saved search removed");
        self.persist(Some(&removed))
    }

    /// The stored specification, for the filter state to adopt.
    pub fn apply(&self, id: &str) -> Result<FilterSpecification, RegistryError> {
        self.get(id)
            .map(|search| search.filters.clone())
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    fn persist(&self, search: Option<&SavedSearch>) -> Result<(), RegistryError> {
        self.store.save(&self.searches).map_err(|source| {
            tracing::warn!(error = %source, "saved searches not persisted");
            RegistryError::Persistence {
                search: search.cloned(),
                source,
            }
        })
    }

    /// Millisecond timestamp, bumped past the newest id already issued.
    ///
    /// Once a stored id sits at `i64::MAX` there is no larger number left, so
    /// ids become `"<max>-<n>"` with the first unused `n`.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        if let Some(bumped) = self.last_id.checked_add(1) {
            self.last_id = now.max(bumped);
            return self.last_id.to_string();
        }

        tracing::warn!(last_id = self.last_id, "numeric saved search ids exhausted");
        (1u64..)
            .map(|n| format!("{}-{}", self.last_id, n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_default()
    }
}
