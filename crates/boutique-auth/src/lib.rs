//! Customer identity for the Boutique storefront.
//!
//! Provides a mock authenticator, the persisted signed-in user, and the
//! customer's address book, saved cards and order history.

pub mod address;
pub mod authenticator;
pub mod defaults;
mod error;
pub mod identity;
pub mod orders;
pub mod payment;
pub mod seed;
pub mod user;

pub use address::{Address, AddressId, AddressUpdate, NewAddress};
pub use authenticator::{LoginField, LoginForm, MockAuthenticator, SignupField, SignupForm};
pub use defaults::{DefaultCollection, DefaultFlag};
pub use error::AuthError;
pub use identity::{IdentityStore, USER_KEY};
pub use orders::{Order, OrderHistory, OrderId, OrderStatus};
pub use payment::{CardBrand, NewPaymentMethod, PaymentMethod, PaymentMethodId};
pub use user::{ProfileUpdate, User, UserId};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::address::{Address, AddressId, NewAddress};
    pub use crate::authenticator::{LoginForm, MockAuthenticator, SignupForm};
    pub use crate::error::AuthError;
    pub use crate::identity::IdentityStore;
    pub use crate::orders::{Order, OrderStatus};
    pub use crate::payment::{CardBrand, NewPaymentMethod, PaymentMethod};
    pub use crate::user::{ProfileUpdate, User};
}
