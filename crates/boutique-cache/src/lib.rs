//! Type-safe key-value persistence for the Boutique storefront.
//!
//! Provides a small storage abstraction with automatic JSON serialization,
//! plus a fixed-key snapshot repository used to mirror state such as the
//! shopping cart and the signed-in user.
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_cache::{Cache, SnapshotRepository};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     product_id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::file(".boutique")?;
//!
//! // Store and read back a value
//! cache.set("cart", &vec![Line { product_id: "bag-1".into(), quantity: 1 }])?;
//! let lines: Option<Vec<Line>> = cache.get("cart")?;
//!
//! // Or bind the key once
//! let repo: SnapshotRepository<Vec<Line>> = SnapshotRepository::new(cache, "cart");
//! let restored = repo.load()?.unwrap_or_default();
//! ```

mod error;
mod kv;
mod snapshot;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use snapshot::SnapshotRepository;
pub use store::{FileStore, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, SnapshotRepository, Store};
}
