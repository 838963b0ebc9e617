//! Authentication and identity errors.

use crate::authenticator::SignupField;
use boutique_commerce::FieldErrors;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided. Deliberately says nothing about
    /// whether the account exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signup form rejected.
    #[error("invalid signup form: {0}")]
    Validation(FieldErrors<SignupField>),

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// Address not found.
    #[error("address not found: {0}")]
    AddressNotFound(String),

    /// Payment method not found.
    #[error("payment method not found: {0}")]
    PaymentMethodNotFound(String),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] boutique_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated
        )
    }

    /// Check if this is a form validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::Validation(_))
    }
}
