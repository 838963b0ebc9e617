//! Fixed-key snapshot repository.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// A single record stored under a fixed key.
///
/// This is the `load()` / `save(snapshot)` seam that state containers
/// depend on. Swap the [`Cache`] backend to change where snapshots live.
///
/// # Example
///
/// ```rust,ignore
/// let repo: SnapshotRepository<Vec<CartLine>> = SnapshotRepository::new(cache, "cart");
/// let lines = repo.load()?.unwrap_or_default();
/// repo.save(&lines)?;
/// ```
pub struct SnapshotRepository<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for SnapshotRepository<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SnapshotRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotRepository")
            .field("key", &self.key)
            .finish()
    }
}

impl<T> SnapshotRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a repository to `key` in `cache`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// Repository over a fresh in-memory cache.
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(Cache::memory(), key)
    }

    /// The fixed key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored snapshot.
    ///
    /// `Ok(None)` when nothing was saved yet; `Err` when the stored bytes are
    /// unreadable or do not decode.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Replace the stored snapshot.
    pub fn save(&self, snapshot: &T) -> Result<(), CacheError> {
        tracing::trace!(key = %self.key, "saving snapshot");
        self.cache.set(&self.key, snapshot)
    }

    /// Remove the stored snapshot.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}
