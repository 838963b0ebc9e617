//! Typed key-value facade with automatic serialization.

use crate::store::{FileStore, MemoryStore, Store};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Type-safe cache over any [`Store`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and clones share the
/// same backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Open an ephemeral in-memory cache.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open a directory-backed cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::file(".boutique")?;
    /// ```
    pub fn file(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes do not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        product_id: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::memory();
        let lines = vec![Line {
            product_id: "bag-1".to_string(),
            quantity: 2,
        }];

        cache.set("cart", &lines).unwrap();
        let restored: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert_eq!(restored, Some(lines));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::memory();
        let value: Option<Vec<Line>> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_corrupt_is_error() {
        let store = Arc::new(MemoryStore::new());
        store.set("cart", b"{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::memory();
        let other = cache.clone();
        cache.set("user", &"ana").unwrap();
        assert!(other.exists("user").unwrap());
    }
}
