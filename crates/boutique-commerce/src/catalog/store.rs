//! Read-only catalog store.

use crate::catalog::data::builtin_products;
use crate::catalog::{Category, Product, ProductQuery};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Number of products shown on the home page.
pub const FEATURED_LIMIT: usize = 8;

/// Number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 2;

/// The product catalog. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, rejecting duplicate ids and
    /// non-positive prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for p in &products {
            if !seen.insert(p.id.clone()) {
                return Err(CommerceError::DuplicateProduct(p.id.to_string()));
            }
            if !p.price.is_positive() {
                return Err(CommerceError::InvalidProduct {
                    id: p.id.to_string(),
                    reason: "price must be positive".to_string(),
                });
            }
        }
        Ok(Self { products })
    }

    /// The built-in sixteen-product catalog in GTQ.
    pub fn builtin() -> Self {
        Self::builtin_in(Currency::GTQ)
    }

    /// The built-in catalog priced in another currency.
    pub fn builtin_in(currency: Currency) -> Self {
        Self {
            products: builtin_products(currency),
        }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            products = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, failing when absent.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Badged products in catalog order.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured())
            .take(limit)
            .collect()
    }

    /// Other products from the same category.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Number of products per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for category in Category::ALL {
            counts.insert(category, 0);
        }
        for p in &self.products {
            *counts.entry(p.category).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct colors, in first-seen order.
    pub fn colors(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.color.as_str()))
    }

    /// Distinct materials, in first-seen order.
    pub fn materials(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.material.as_str()))
    }

    /// Highest unit price in the catalog.
    pub fn max_price(&self) -> Money {
        self.products
            .iter()
            .map(|p| p.price)
            .max_by_key(|m| m.amount_cents)
            .unwrap_or_default()
    }

    /// Filter then sort. No relevance ranking is applied.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut results: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();
        results.sort_by(|a, b| query.sort.compare(a, b));
        results
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
