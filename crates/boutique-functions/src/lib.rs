//! HTTP client for the Boutique backend functions.
//!
//! The storefront talks to three hosted functions: `create-checkout`,
//! `confirm-order` and `contact-form`. [`FunctionsClient`] implements the
//! checkout and contact gateways over them.
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_functions::{FunctionsClient, FunctionsConfig};
//!
//! let config = FunctionsConfig::from_env()
//!     .unwrap_or_else(|| FunctionsConfig::new("https://example.supabase.co"));
//! let client = FunctionsClient::new(&config)?;
//!
//! let created = client.create_checkout(&request).await?;
//! println!("total: {}", created.breakdown.total);
//! ```

mod client;
mod config;
mod error;
mod wire;

pub use client::{FunctionsClient, CONFIRM_ORDER, CONTACT_FORM, CREATE_CHECKOUT};
pub use config::{FunctionsConfig, DEFAULT_TIMEOUT, ENV_KEY, ENV_TIMEOUT, ENV_URL};
pub use error::FetchError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, FunctionsClient, FunctionsConfig};
}
