//! Cart pricing calculations.

use crate::cart::DiscountRate;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotals at or above this ship free.
    pub free_threshold: Money,
    /// Fee charged below the threshold.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    pub fn new(free_threshold: Money, flat_fee: Money) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// Shipping charged for a subtotal.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal.amount_cents >= self.free_threshold.amount_cents {
            Money::zero(subtotal.currency)
        } else {
            self.flat_fee
        }
    }

    /// How much more the customer must spend to ship free.
    pub fn remaining_for_free(&self, subtotal: Money) -> Option<Money> {
        let remaining = self.free_threshold.amount_cents - subtotal.amount_cents;
        (remaining > 0).then(|| Money::new(remaining, subtotal.currency))
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Money::from_units(2000, Currency::GTQ),
            flat_fee: Money::from_units(150, Currency::GTQ),
        }
    }
}

/// Derived cart figures. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Active coupon rate.
    pub discount_rate: DiscountRate,
    /// Subtotal times rate, capped at the subtotal.
    pub discount: Money,
    pub shipping: Money,
    /// Subtotal minus discount plus shipping.
    pub grand_total: Money,
    /// Spend still needed for free shipping, if any.
    pub amount_to_free_shipping: Option<Money>,
}

impl CartTotals {
    /// Compute totals for a subtotal under a rate and shipping policy.
    pub fn compute(
        item_count: u64,
        subtotal: Money,
        rate: DiscountRate,
        shipping: &ShippingPolicy,
    ) -> Self {
        let discount = rate.discount_on(subtotal);
        let fee = shipping.fee_for(subtotal);
        let grand_total = (subtotal - discount + fee).non_negative();
        Self {
            item_count,
            subtotal,
            discount_rate: rate,
            discount,
            shipping: fee,
            grand_total,
            amount_to_free_shipping: shipping.remaining_for_free(subtotal),
        }
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Check if shipping is free.
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtq(units: i64) -> Money {
        Money::from_units(units, Currency::GTQ)
    }

    #[test]
    fn test_shipping_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.fee_for(gtq(2500)), gtq(0));
        assert_eq!(policy.fee_for(gtq(2000)), gtq(0));
        assert_eq!(policy.fee_for(gtq(1500)), gtq(150));
    }

    #[test]
    fn test_remaining_for_free() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.remaining_for_free(gtq(1500)), Some(gtq(500)));
        assert_eq!(policy.remaining_for_free(gtq(2000)), None);
    }

    #[test]
    fn test_totals_with_coupon() {
        let rate = DiscountRate::new(0.20).unwrap();
        let totals = CartTotals::compute(3, gtq(2500), rate, &ShippingPolicy::default());

        assert_eq!(totals.discount, gtq(500));
        assert_eq!(totals.shipping, gtq(0));
        assert_eq!(totals.grand_total, gtq(2000));
        assert!(totals.has_discount());
    }

    #[test]
    fn test_totals_below_threshold() {
        let totals =
            CartTotals::compute(1, gtq(1500), DiscountRate::NONE, &ShippingPolicy::default());
        assert_eq!(totals.grand_total, gtq(1650));
        assert!(!totals.ships_free());
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy::new(gtq(100), gtq(25));
        assert_eq!(policy.fee_for(gtq(99)), gtq(25));
        assert_eq!(policy.fee_for(gtq(100)), gtq(0));
    }
}
