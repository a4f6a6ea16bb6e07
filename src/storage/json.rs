//! JSON file-based client storage.
//!
//! The whole store is held in memory and rewritten on every change using an
//! atomic write (write to a temporary file, then rename), so a crash never
//! leaves a half-written file behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::{ListingMapError, Result};
use crate::storage::backend::ClientStorage;
use crate::storage::models::StoredItem;

const FORMAT_VERSION: u32 = 1;

/// Top-level document written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the file format, for future migrations.
    version: u32,

    #[serde(default)]
    items: BTreeMap<String, StoredItem>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            items: BTreeMap::new(),
        }
    }
}

/// [`ClientStorage`] persisted to a JSON file.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "items": {
///     "tg_user_id": {
///       "value": "123456789",
///       "updated_at": "2026-03-01T09:30:00Z"
///     }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonClientStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonClientStorage {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store; nothing is written until the
    /// first change.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or does not contain a valid store.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use listing_map::storage::JsonClientStorage;
    ///
    /// let storage = JsonClientStorage::open("/tmp/listing-map/client_storage.json")?;
    /// # Ok::<(), listing_map::domain::ListingMapError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening client storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no storage file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(items = data.items.len(), "client storage ready");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// When a key was last written.
    #[must_use]
    pub fn updated_at(&self, key: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        self.data.items.get(key).map(|item| item.updated_at)
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ListingMapError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version > FORMAT_VERSION {
            return Err(ListingMapError::Storage(format!(
                "unsupported storage version {} (expected {FORMAT_VERSION})",
                data.version
            )));
        }

        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ListingMapError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "client storage saved");
        Ok(())
    }
}

impl ClientStorage for JsonClientStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.items.get(key).map(|item| item.value.clone()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("storage_set_item", key).entered();

        if self.data.items.get(key).is_some_and(|item| item.value == value) {
            return Ok(());
        }

        self.data.items.insert(key.to_string(), StoredItem::new(value));
        self.dirty = true;
        self.save_to_file()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("storage_remove_item", key).entered();

        if self.data.items.remove(key).is_some() {
            self.dirty = true;
            self.save_to_file()?;
        }
        Ok(())
    }
}

impl Drop for JsonClientStorage {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save client storage on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::USER_ID_KEY;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let mut storage = JsonClientStorage::open(&path).unwrap();
            storage.set_item(USER_ID_KEY, "777").unwrap();
        }

        let storage = JsonClientStorage::open(&path).unwrap();
        assert_eq!(storage.path(), path);
        assert_eq!(storage.get_item(USER_ID_KEY).unwrap().as_deref(), Some("777"));
        assert!(storage.updated_at(USER_ID_KEY).is_some());
    }

    #[test]
    fn missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonClientStorage::open(dir.path().join("store.json")).unwrap();
        assert_eq!(storage.get_item("absent").unwrap(), None);
    }

    #[test]
    fn nothing_written_until_first_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        drop(JsonClientStorage::open(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn remove_item_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = JsonClientStorage::open(&path).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.remove_item("a").unwrap();
        storage.remove_item("never-set").unwrap();
        drop(storage);

        let storage = JsonClientStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonClientStorage::open(&path).unwrap_err();
        assert!(matches!(err, ListingMapError::Storage(_)));
    }
}
