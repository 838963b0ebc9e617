//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bag,
    Wallet,
    Accessory,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 3] = [Category::Bag, Category::Wallet, Category::Accessory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bag => "bag",
            Category::Wallet => "wallet",
            Category::Accessory => "accessory",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Bag => "Bags",
            Category::Wallet => "Wallets",
            Category::Accessory => "Accessories",
        }
    }

    /// Parse a category slug. Plural forms are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bag" | "bags" => Some(Category::Bag),
            "wallet" | "wallets" => Some(Category::Wallet),
            "accessory" | "accessories" => Some(Category::Accessory),
            _ => None,
        }
    }
}

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    New,
    Bestseller,
}

impl Badge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::New => "new",
            Badge::Bestseller => "bestseller",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Badge::New => "New",
            Badge::Bestseller => "Bestseller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Badge::New),
            "bestseller" => Some(Badge::Bestseller),
            _ => None,
        }
    }
}

/// A product in the catalog.
///
/// Products are immutable once the catalog is loaded. Cart lines keep a full
/// copy so a persisted cart stays readable even if the catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Current unit price.
    pub price: Money,
    /// Price before a markdown, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub category: Category,
    pub color: String,
    pub material: String,
    /// Image URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub in_stock: bool,
}

impl Product {
    /// Check if the product is marked down.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|orig| orig.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|_| self.is_on_sale())
            .and_then(|orig| orig.try_subtract(&self.price))
    }

    /// Check if the product carries a badge.
    pub fn is_featured(&self) -> bool {
        self.badge.is_some()
    }

    /// Case-insensitive match against name, description and category slug.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.category.as_str().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product {
            id: ProductId::new("bag-2"),
            name: "Tote Milano".to_string(),
            description: "Roomy everyday tote".to_string(),
            price: Money::from_units(1890, Currency::GTQ),
            original_price: Some(Money::from_units(2200, Currency::GTQ)),
            category: Category::Bag,
            color: "Camel".to_string(),
            material: "Italian leather".to_string(),
            image: "https://example.com/tote.png".to_string(),
            badge: Some(Badge::New),
            in_stock: true,
        }
    }

    #[test]
    fn test_on_sale() {
        let p = product();
        assert!(p.is_on_sale());
        assert_eq!(p.savings(), Some(Money::from_units(310, Currency::GTQ)));
    }

    #[test]
    fn test_not_on_sale_without_original() {
        let mut p = product();
        p.original_price = None;
        assert!(!p.is_on_sale());
        assert_eq!(p.savings(), None);
    }

    #[test]
    fn test_matches_text() {
        let p = product();
        assert!(p.matches_text("milano"));
        assert!(p.matches_text("EVERYDAY"));
        assert!(p.matches_text("bag"));
        assert!(!p.matches_text("wallet"));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Bags"), Some(Category::Bag));
        assert_eq!(Category::parse("accessory"), Some(Category::Accessory));
        assert_eq!(Category::parse("shoes"), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(product()).unwrap();
        assert_eq!(json["category"], "bag");
        assert_eq!(json["badge"], "new");
        assert_eq!(json["id"], "bag-2");
    }
}
