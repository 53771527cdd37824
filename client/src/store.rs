//! File-backed persistence for the collection list.
//!
//! One JSON blob, replaced wholesale on every save. A missing or unreadable blob
//! reads back as an empty list; persistence problems never become fatal errors for
//! the caller of `load`.

use crate::error::Result;
use pictrail_engine::{Collection, LibrarySnapshot};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Durable store for the library snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store persisting at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted collection list.
    ///
    /// Absence or a corrupt blob counts as "no data".
    pub fn load(&self) -> Vec<Collection> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("failed to read library snapshot: {e}");
                }
                return Vec::new();
            }
        };

        match LibrarySnapshot::from_json(&json) {
            Ok(snapshot) => snapshot.collections,
            Err(e) => {
                tracing::warn!("discarding unreadable library snapshot: {e}");
                Vec::new()
            }
        }
    }

    /// Persist the full collection list, replacing the previous blob.
    ///
    /// Writes to a temp file and renames it over the old one, so readers never see
    /// a partial write.
    pub fn save(&self, collections: &[Collection]) -> Result<()> {
        let snapshot = LibrarySnapshot::new(collections.to_vec());
        let json = snapshot.to_json()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictrail_engine::Photo;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("library.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{{{ definitely not json").unwrap();

        let store = FileStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("library.json"));

        let mut collection = Collection::new("Trips");
        collection.photos = vec![Photo::new_capture(
            "file:///p1.jpg",
            Some("Trips".into()),
            None,
            None,
        )];
        collection.cover_uri = Some("file:///p1.jpg".into());

        store.save(&[collection.clone()]).unwrap();
        assert_eq!(store.load(), vec![collection]);
    }

    #[test]
    fn save_replaces_previous_state() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("library.json"));

        store.save(&[Collection::new("Old")]).unwrap();
        store.save(&[Collection::new("New")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "New");
    }
}
