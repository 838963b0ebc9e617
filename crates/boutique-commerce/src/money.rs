//! Money type for representing monetary values.
//!
//! Uses an integer minor-unit representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Guatemalan quetzal, the store currency.
    #[default]
    GTQ,
    USD,
    MXN,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "GTQ").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GTQ => "GTQ",
            Currency::USD => "USD",
            Currency::MXN => "MXN",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "Q.").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GTQ => "Q.",
            Currency::USD => "$",
            Currency::MXN => "MX$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units per whole unit.
    pub fn minor_per_unit(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "GTQ" => Some(Currency::GTQ),
            "USD" => Some(Currency::USD),
            "MXN" => Some(Currency::MXN),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for GTQ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole currency units.
    ///
    /// ```
    /// use boutique_commerce::money::{Money, Currency};
    /// let price = Money::from_units(2450, Currency::GTQ);
    /// assert_eq!(price.amount_cents, 245000);
    /// ```
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_unit()), currency)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use boutique_commerce::money::{Money, Currency};
    /// let tax = Money::from_decimal(534.4, Currency::GTQ);
    /// assert_eq!(tax.amount_cents, 53440);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_unit() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_unit() as f64
    }

    /// Format as a display string (e.g., "Q.2,450.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "2,450.00").
    pub fn display_amount(&self) -> String {
        let per_unit = self.currency.minor_per_unit();
        let abs = self.amount_cents.unsigned_abs();
        let units = abs / per_unit as u64;
        let minor = abs % per_unit as u64;

        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let places = self.currency.decimal_places() as usize;
        format!("{}{}.{:0places$}", sign, grouped, minor)
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a scalar.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Multiply by a decimal factor (e.g., for discount rates).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// The smaller of two amounts in the same currency.
    pub fn min(self, other: Money) -> Money {
        if other.amount_cents < self.amount_cents {
            other
        } else {
            self
        }
    }

    /// Clamp negative amounts to zero.
    pub fn non_negative(self) -> Money {
        Money::new(self.amount_cents.max(0), self.currency)
    }
}

// Amounts inside one store always share the store currency; the operators
// keep the left-hand currency and the `try_*` methods report mismatches.
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency, "currency mismatch");
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency, "currency mismatch");
        Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        )
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(mut iter: I) -> Money {
        match iter.next() {
            Some(first) => iter.fold(first, |acc, m| acc + m),
            None => Money::default(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_units() {
        let m = Money::from_units(2450, Currency::GTQ);
        assert_eq!(m.amount_cents, 245000);
        assert_eq!(m.currency, Currency::GTQ);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(534.4, Currency::GTQ);
        assert_eq!(m.amount_cents, 53440);

        let m = Money::from_decimal(3874.40, Currency::GTQ);
        assert_eq!(m.amount_cents, 387440);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(251004, Currency::GTQ);
        assert!((m.to_decimal() - 2510.04).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_units(2450, Currency::GTQ).display(), "Q.2,450.00");
        assert_eq!(Money::new(19000, Currency::GTQ).display(), "Q.190.00");
        assert_eq!(Money::new(53440, Currency::GTQ).display(), "Q.534.40");
        assert_eq!(Money::from_units(1234567, Currency::USD).display(), "$1,234,567.00");
        assert_eq!(Money::new(-150, Currency::GTQ).display_amount(), "-1.50");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_units(1000, Currency::GTQ);
        let b = Money::from_units(500, Currency::GTQ);
        assert_eq!((a + b).amount_cents, 150000);
        assert_eq!((a - b).amount_cents, 50000);
        assert_eq!(a.multiply(2).amount_cents, 200000);
    }

    #[test]
    fn test_money_rate() {
        let m = Money::from_units(2500, Currency::GTQ);
        assert_eq!(m.multiply_decimal(0.20), Money::from_units(500, Currency::GTQ));
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let gtq = Money::new(1000, Currency::GTQ);
        let usd = Money::new(1000, Currency::USD);
        assert!(gtq.try_add(&usd).is_none());
        assert!(gtq.try_subtract(&usd).is_none());
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![
            Money::new(100, Currency::GTQ),
            Money::new(250, Currency::GTQ),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("GTQ"), Some(Currency::GTQ));
        assert_eq!(Currency::from_code("mxn"), Some(Currency::MXN));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
