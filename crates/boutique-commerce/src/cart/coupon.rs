//! Coupon codes and discount rates.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fractional discount applied to the cart subtotal.
///
/// Valid coupon rates are in (0, 1]; the zero rate means "no discount".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// No discount.
    pub const NONE: DiscountRate = DiscountRate(0.0);

    /// Validate a coupon rate.
    pub fn new(rate: f64) -> Option<Self> {
        if rate.is_finite() && rate > 0.0 && rate <= 1.0 {
            Some(Self(rate))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Whole percentage for display, e.g. `20` for 0.20.
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Discount on `subtotal`, never more than the subtotal itself.
    pub fn discount_on(&self, subtotal: Money) -> Money {
        subtotal
            .multiply_decimal(self.0)
            .min(subtotal)
            .non_negative()
    }
}

/// Static mapping from uppercase coupon code to discount rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponTable {
    codes: BTreeMap<String, DiscountRate>,
}

impl CouponTable {
    /// Build a table, normalizing codes and rejecting rates outside (0, 1].
    pub fn new<I, S>(entries: I) -> Result<Self, CommerceError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut codes = BTreeMap::new();
        for (code, rate) in entries {
            let code = normalize_code(code.as_ref());
            let rate = DiscountRate::new(rate).ok_or_else(|| CommerceError::InvalidDiscountRate {
                code: code.clone(),
                rate,
            })?;
            codes.insert(code, rate);
        }
        Ok(Self { codes })
    }

    /// A table with no codes.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Look up a code. Case and surrounding whitespace are ignored.
    pub fn lookup(&self, code: &str) -> Option<DiscountRate> {
        self.codes.get(&normalize_code(code)).copied()
    }

    /// Iterate over (code, rate) pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DiscountRate)> {
        self.codes.iter().map(|(c, r)| (c.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CouponTable {
    /// The store's launch codes.
    fn default() -> Self {
        let mut codes = BTreeMap::new();
        codes.insert("JUANITO10".to_string(), DiscountRate(0.10));
        codes.insert("BIENVENIDO15".to_string(), DiscountRate(0.15));
        codes.insert("VIP20".to_string(), DiscountRate(0.20));
        Self { codes }
    }
}

/// Trim and uppercase a coupon code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
