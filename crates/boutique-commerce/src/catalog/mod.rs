//! Product catalog module.
//!
//! Contains the product types, the built-in catalog, and listing queries.

mod data;
mod product;
mod query;
mod store;

pub use product::{Badge, Category, Product};
pub use query::{ProductQuery, SortOption};
pub use store::{Catalog, FEATURED_LIMIT, RELATED_LIMIT};
