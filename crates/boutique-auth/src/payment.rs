//! Saved payment methods.

use crate::defaults::DefaultFlag;
use boutique_commerce::define_id;
use serde::{Deserialize, Serialize};
use std::fmt;

define_id!(PaymentMethodId);

/// Card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "American Express",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "visa" => Some(CardBrand::Visa),
            "mastercard" => Some(CardBrand::Mastercard),
            "amex" => Some(CardBrand::Amex),
            _ => None,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A saved card. Only the last four digits are ever kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub brand: CardBrand,
    pub last_four: String,
    /// Two-digit month, e.g. "06".
    pub expiry_month: String,
    /// Four-digit year.
    pub expiry_year: String,
    pub is_default: bool,
}

impl PaymentMethod {
    /// e.g. "Visa •••• 4242".
    pub fn masked(&self) -> String {
        format!("{} \u{2022}\u{2022}\u{2022}\u{2022} {}", self.brand, self.last_four)
    }

    /// e.g. "12/2027".
    pub fn expiry(&self) -> String {
        format!("{}/{}", self.expiry_month, self.expiry_year)
    }
}

impl DefaultFlag for PaymentMethod {
    type Id = PaymentMethodId;

    fn id(&self) -> &PaymentMethodId {
        &self.id
    }

    fn is_default(&self) -> bool {
        self.is_default
    }

    fn set_default(&mut self, value: bool) {
        self.is_default = value;
    }
}

/// Fields for a new payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub brand: CardBrand,
    pub last_four: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub is_default: bool,
}

impl NewPaymentMethod {
    pub fn into_method(self, id: PaymentMethodId) -> PaymentMethod {
        PaymentMethod {
            id,
            brand: self.brand,
            last_four: self.last_four,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            is_default: self.is_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_and_expiry() {
        let pm = PaymentMethod {
            id: PaymentMethodId::new("pm-1"),
            brand: CardBrand::Visa,
            last_four: "4242".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2027".to_string(),
            is_default: true,
        };
        assert_eq!(pm.masked(), "Visa \u{2022}\u{2022}\u{2022}\u{2022} 4242");
        assert_eq!(pm.expiry(), "12/2027");
    }

    #[test]
    fn test_brand_parse() {
        assert_eq!(CardBrand::parse("MasterCard"), Some(CardBrand::Mastercard));
        assert_eq!(CardBrand::parse("diners"), None);
    }
}
