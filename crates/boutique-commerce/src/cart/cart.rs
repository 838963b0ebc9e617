//! Cart and cart line types.

use crate::cart::{normalize_code, CartTotals, CouponTable, DiscountRate, ShippingPolicy};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One (product, quantity) pair in the cart.
///
/// The full product is kept so the persisted cart can be shown without the
/// catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(i64::from(self.quantity))
    }
}

/// A shopping cart.
///
/// Holds at most one line per product id. The coupon is session-only and
/// is not part of the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    coupon_code: Option<String>,
    discount_rate: DiscountRate,
    is_open: bool,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Zero-quantity lines are dropped and duplicate product ids are merged.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add_item(line.product, line.quantity);
        }
        cart.is_open = false;
        cart
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line grows by `quantity`; otherwise a new line is
    /// appended. A zero quantity is ignored. Opens the cart drawer.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(product, quantity));
        }
        self.is_open = true;
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() < len_before
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Unknown products are a
    /// no-op. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart and reset the coupon.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon_code = None;
        self.discount_rate = DiscountRate::NONE;
    }

    /// Apply a coupon code.
    ///
    /// A known code replaces any active rate. An unknown code resets the
    /// rate to zero and returns false. Rates never stack.
    pub fn apply_coupon(&mut self, code: &str, table: &CouponTable) -> bool {
        match table.lookup(code) {
            Some(rate) => {
                self.discount_rate = rate;
                self.coupon_code = Some(normalize_code(code));
                true
            }
            None => {
                self.discount_rate = DiscountRate::NONE;
                self.coupon_code = None;
                false
            }
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of a product in the cart, or zero.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.product.id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart; the first line's, or the store default.
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map(|l| l.product.price.currency)
            .unwrap_or_default()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(self.currency()), |acc, l| acc + l.line_total())
    }

    /// Compute all derived figures.
    pub fn totals(&self, shipping: &ShippingPolicy) -> CartTotals {
        CartTotals::compute(
            self.item_count(),
            self.subtotal(),
            self.discount_rate,
            shipping,
        )
    }
}
