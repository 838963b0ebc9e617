//! Product listing query builder.

use crate::catalog::{Badge, Category, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Badged products first, otherwise catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Some(SortOption::Featured),
            "price-asc" => Some(SortOption::PriceAsc),
            "price-desc" => Some(SortOption::PriceDesc),
            "name-asc" => Some(SortOption::NameAsc),
            "name-desc" => Some(SortOption::NameDesc),
            _ => None,
        }
    }

    /// Order two products. Sorting with this is stable, so ties keep
    /// catalog order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => b.is_featured().cmp(&a.is_featured()),
            SortOption::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }
}

/// Filters and ordering for a product listing.
///
/// An empty query matches every product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductQuery {
    /// Free text matched against name, description and category.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub badge: Option<Badge>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    /// Any-of color filter.
    pub colors: Vec<String>,
    /// Any-of material filter.
    pub materials: Vec<String>,
    pub sort: SortOption,
}

impl ProductQuery {
    /// Create a query that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text filter. Blank text clears it.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set an inclusive price range. Either bound may be open.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.push(color.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.push(material.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check a single product against every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(text) = &self.text {
            if !product.matches_text(text) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(badge) = self.badge {
            if product.badge != Some(badge) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price.amount_cents < min.amount_cents {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price.amount_cents > max.amount_cents {
                return false;
            }
        }
        if !self.colors.is_empty() && !contains_ignore_case(&self.colors, &product.color) {
            return false;
        }
        if !self.materials.is_empty() && !contains_ignore_case(&self.materials, &product.material)
        {
            return false;
        }
        true
    }

    /// Check if any filter deviates from the defaults.
    ///
    /// A price ceiling equal to the catalog maximum counts as unfiltered.
    pub fn is_filtered(&self, catalog_max: Money) -> bool {
        self.text.is_some()
            || self.category.is_some()
            || self.badge.is_some()
            || self.min_price.map(|m| m.is_positive()).unwrap_or(false)
            || self
                .max_price
                .map(|m| m.amount_cents < catalog_max.amount_cents)
                .unwrap_or(false)
            || !self.colors.is_empty()
            || !self.materials.is_empty()
    }
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| h.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_blank_text_is_ignored() {
        let q = ProductQuery::new().with_text("   ");
        assert_eq!(q.text, None);
    }

    #[test]
    fn test_is_filtered() {
        let max = Money::from_units(2450, Currency::GTQ);
        assert!(!ProductQuery::new().is_filtered(max));
        assert!(!ProductQuery::new()
            .with_price_range(None, Some(max))
            .is_filtered(max));
        assert!(ProductQuery::new()
            .with_price_range(None, Some(Money::from_units(1000, Currency::GTQ)))
            .is_filtered(max));
        assert!(ProductQuery::new().with_color("Black").is_filtered(max));
        assert!(!ProductQuery::new()
            .with_sort(SortOption::PriceAsc)
            .is_filtered(max));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortOption::parse("price-desc"), Some(SortOption::PriceDesc));
        assert_eq!(SortOption::parse("relevance"), None);
    }
}
