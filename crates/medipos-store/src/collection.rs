//! # Collection Files
//!
//! Whole-file JSON persistence for record collections.
//!
//! ## Access Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  READ ALL → MUTATE IN MEMORY → WRITE ALL                                │
//! │                                                                         │
//! │  Every operation loads the entire collection, works on the in-memory    │
//! │  Vec, and writes the entire collection back. There is no partial        │
//! │  update, no locking, no merge: concurrent writers are last-writer-wins  │
//! │  at file granularity. The store is sized for one operator terminal,     │
//! │  where collections are a few thousand records at most.                  │
//! │                                                                         │
//! │  A missing file is an empty collection, never an error. First write     │
//! │  creates it.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

/// A handle to one JSON collection file.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for the named collection under the store directory.
    pub fn new(dir: &Path, name: &str) -> Self {
        Collection {
            path: dir.join(format!("{name}.json")),
            _record: PhantomData,
        }
    }

    /// Loads every record. A missing file reads as an empty collection.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Collection file missing, reading as empty");
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)?;
        let records = serde_json::from_slice(&bytes)?;
        Ok(records)
    }

    /// Replaces the collection with the given records.
    pub fn save(&self, records: &[T]) -> StoreResult<()> {
        debug!(path = %self.path.display(), count = records.len(), "Saving collection");
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Loads a single-document file, falling back to `T::default()` when the
/// file does not exist. Used for settings.
pub fn load_document<T>(dir: &Path, name: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        return Ok(T::default());
    }

    let bytes = fs::read(&path)?;
    let doc = serde_json::from_slice(&bytes)?;
    Ok(doc)
}

/// Writes a single-document file, replacing any previous content.
pub fn save_document<T>(dir: &Path, name: &str, doc: &T) -> StoreResult<()>
where
    T: Serialize,
{
    let path = dir.join(format!("{name}.json"));
    let json = serde_json::to_vec_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
        name: String,
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let coll: Collection<Row> = Collection::new(dir.path(), "rows");
        assert!(coll.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let coll: Collection<Row> = Collection::new(dir.path(), "rows");

        let rows = vec![
            Row {
                id: 1,
                name: "a".to_string(),
            },
            Row {
                id: 2,
                name: "b".to_string(),
            },
        ];
        coll.save(&rows).unwrap();
        assert_eq!(coll.load().unwrap(), rows);
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let coll: Collection<Row> = Collection::new(dir.path(), "rows");

        coll.save(&[Row {
            id: 1,
            name: "a".to_string(),
        }])
        .unwrap();
        coll.save(&[Row {
            id: 2,
            name: "b".to_string(),
        }])
        .unwrap();

        let rows = coll.load().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rows.json"), b"not json").unwrap();

        let coll: Collection<Row> = Collection::new(dir.path(), "rows");
        assert!(matches!(coll.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_document_defaults_when_missing() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Doc {
            flag: bool,
        }
        impl Default for Doc {
            fn default() -> Self {
                Doc { flag: true }
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let doc: Doc = load_document(dir.path(), "doc").unwrap();
        assert!(doc.flag);

        save_document(dir.path(), "doc", &Doc { flag: false }).unwrap();
        let doc: Doc = load_document(dir.path(), "doc").unwrap();
        assert!(!doc.flag);
    }
}
