//! Device-local persistence of named JSON values.
//!
//! # Keys
//!
//! - `cartItems` - JSON array of cart line items
//! - `wishlist` - JSON array of product snapshots
//! - `preferences` - Account settings object
//!
//! Values carry no schema version. Changing a stored format is a breaking
//! change for existing data directories.
//!
//! # Failure policy
//!
//! [`Persistence`] never hands an error back to a store. A missing or
//! malformed value loads as the type's default and is logged; a failed write
//! is logged and the in-memory state stays authoritative.

mod file;
mod memory;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot be stored safely.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Raw string storage keyed by name, shaped after browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed JSON adapter over a [`KeyValueStore`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Persistence {
    backend: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Persistence backed by a fresh in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Load the value under `key`, or `T::default()` when it is missing,
    /// unreadable or malformed.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to read persisted value");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed persisted value, using empty state");
                T::default()
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn save<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize value for persistence");
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &json) {
            tracing::error!(key, error = %e, "Failed to persist value");
        }
    }

    /// Delete the value under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            tracing::error!(key, error = %e, "Failed to remove persisted value");
        }
    }

    /// Raw access to the stored text, for diagnostics and tests.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.get_item(key).ok().flatten()
    }
}

/// Keys are used as file names, so only a conservative alphabet is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key_is_default() {
        let persistence = Persistence::in_memory();
        let items: Vec<u32> = persistence.load("cartItems");
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let persistence = Persistence::in_memory();
        persistence.save("wishlist", &vec![1, 2, 3]);
        let items: Vec<u32> = persistence.load("wishlist");
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(persistence.raw("wishlist").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_malformed_value_loads_default() {
        let store = MemoryStore::default();
        store.set_item("cartItems", "{not json").unwrap();
        let persistence = Persistence::new(store);
        let items: Vec<u32> = persistence.load("cartItems");
        assert!(items.is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_default() {
        let persistence = Persistence::in_memory();
        persistence.save("cartItems", &serde_json::json!({"items": []}));
        let items: Vec<u32> = persistence.load("cartItems");
        assert!(items.is_empty());
    }

    #[test]
    fn test_remove() {
        let persistence = Persistence::in_memory();
        persistence.save("wishlist", &vec![1]);
        persistence.remove("wishlist");
        assert!(persistence.raw("wishlist").is_none());
        // Removing again is harmless
        persistence.remove("wishlist");
    }

    #[test]
    fn test_invalid_key_is_logged_not_raised() {
        let persistence = Persistence::in_memory();
        persistence.save("../escape", &1);
        assert!(persistence.raw("../escape").is_none());
        let value: u32 = persistence.load("../escape");
        assert_eq!(value, 0);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cartItems").is_ok());
        assert!(validate_key("my-key_2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("..").is_err());
    }
}
