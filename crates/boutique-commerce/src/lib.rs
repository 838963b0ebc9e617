//! Storefront domain logic for Boutique.
//!
//! This crate holds everything the storefront does without a UI:
//!
//! - **Catalog**: the product list, listing filters and sorting
//! - **Cart**: lines, coupons, shipping rules, and a persisted cart engine
//! - **Checkout**: the shipping/payment/success flow over remote seams
//! - **Contact**: the contact form
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut cart = CartEngine::open(Cache::file(".boutique")?);
//!
//! let bag = catalog.require(&ProductId::new("bag-1"))?;
//! cart.add_item(bag.clone(), 1);
//! cart.apply_coupon("VIP20");
//!
//! let totals = cart.totals();
//! println!("Total: {}", totals.grand_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod validation;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;

pub use error::CommerceError;
pub use ids::{OrderNumber, ProductId};
pub use money::{Currency, Money};
pub use validation::FieldErrors;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{OrderNumber, ProductId};
    pub use crate::money::{Currency, Money};
    pub use crate::validation::FieldErrors;

    // Catalog
    pub use crate::catalog::{Badge, Catalog, Category, Product, ProductQuery, SortOption};

    // Cart
    pub use crate::cart::{
        Cart, CartEngine, CartLine, CartTotals, CouponTable, DiscountRate, ShippingPolicy,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutConfig, CheckoutError, CheckoutFlow, CheckoutGateway, CheckoutPhase,
        CheckoutSession, GatewayError, Guard, PaymentProcessor, PriceBreakdown, ShippingForm,
    };

    // Contact
    pub use crate::contact::{ContactForm, ContactGateway};

    pub use boutique_cache::Cache;
}
