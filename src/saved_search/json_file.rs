//! JsonFileSavedSearchStore - saved searches as a JSON array on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SavedSearch, SavedSearchStore, StorageError};

/// File-backed store. A missing file loads as an empty list; writes go to a
/// sibling temp file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileSavedSearchStore {
    path: PathBuf,
}

impl JsonFileSavedSearchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SavedSearchStore for JsonFileSavedSearchStore {
    fn load(&self) -> Result<Vec<SavedSearch>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, searches: &[SavedSearch]) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(searches)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, raw)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = searches.len(), "wrote saved searches");
        Ok(())
    }
}
