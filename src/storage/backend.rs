//! Client storage abstraction.
//!
//! [`ClientStorage`] mirrors the key/value contract of a browser's
//! `localStorage`: string keys, string values, missing keys read as `None`.
//! The page keeps very little here; today only the messaging user identity
//! captured from the page query.

use std::collections::BTreeMap;

use crate::domain::error::Result;

/// Key under which the messaging user identity is stored.
pub const USER_ID_KEY: &str = "tg_user_id";

/// Persistent string key/value store.
///
/// # Implementations
///
/// - [`crate::storage::JsonClientStorage`]: JSON file with atomic writes
/// - [`MemoryClientStorage`]: process-local, nothing persisted
///
/// # Examples
///
/// ```
/// use listing_map::storage::{ClientStorage, MemoryClientStorage, USER_ID_KEY};
///
/// let mut storage = MemoryClientStorage::default();
/// storage.set_item(USER_ID_KEY, "12345")?;
/// assert_eq!(storage.get_item(USER_ID_KEY)?.as_deref(), Some("12345"));
/// # Ok::<(), listing_map::domain::ListingMapError>(())
/// ```
pub trait ClientStorage: Send {
    /// Reads a value, `Ok(None)` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory [`ClientStorage`] for hosts without a writable data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientStorage {
    items: BTreeMap<String, String>,
}

impl ClientStorage for MemoryClientStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
