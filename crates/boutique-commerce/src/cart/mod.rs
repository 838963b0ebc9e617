//! Shopping cart module.
//!
//! Contains the cart, coupons, pricing rules, and the persisted cart engine.

mod cart;
mod coupon;
mod engine;
mod pricing;

pub use cart::{Cart, CartLine};
pub use coupon::{normalize_code, CouponTable, DiscountRate};
pub use engine::{CartEngine, CART_KEY};
pub use pricing::{CartTotals, ShippingPolicy};
