//! Composition root: builds every state container a command needs.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use boutique_auth::{IdentityStore, MockAuthenticator};
use boutique_cache::{Cache, SnapshotRepository};
use boutique_commerce::cart::{CartEngine, CART_KEY};
use boutique_commerce::catalog::Catalog;
use boutique_commerce::checkout::{
    CheckoutCreated, CheckoutFlow, CheckoutGateway, ConfirmOrderRequest, CreateCheckoutRequest,
    GatewayError,
};
use boutique_commerce::contact::{ContactForm, ContactGateway};
use boutique_commerce::OrderNumber;
use boutique_functions::FunctionsClient;
use tokio::sync::Mutex;

use crate::config::{CliConfig, StorageBackend};
use crate::context::Context;
use crate::processor::SimulatedProcessor;

/// Reported when no functions endpoint is configured.
pub const NOT_CONFIGURED: &str =
    "backend functions are not configured (set [functions].base_url or BOUTIQUE_FUNCTIONS_URL)";

/// The storefront's state for one CLI invocation.
pub struct Storefront {
    pub catalog: Catalog,
    pub cart: Mutex<CartEngine>,
    pub identity: Mutex<IdentityStore>,
    pub authenticator: MockAuthenticator,
    pub checkout: CheckoutFlow,
    contact: Arc<dyn ContactGateway>,
}

impl Storefront {
    /// Open the storefront described by the context's config.
    pub fn open(ctx: &Context) -> Result<Self> {
        let cache = match ctx.config.storage.backend {
            StorageBackend::File => {
                let dir = ctx.resolve_path(&ctx.config.storage.dir);
                Cache::file(&dir)
                    .with_context(|| format!("Failed to open storage at {}", dir.display()))?
            }
            StorageBackend::Memory => Cache::memory(),
        };

        let mut config = ctx.config.clone();
        config.store.catalog = config.store.catalog.map(|p| ctx.resolve_path(&p));
        Self::with_cache(&config, cache)
    }

    /// Build the storefront over an existing cache.
    pub fn with_cache(config: &CliConfig, cache: Cache) -> Result<Self> {
        let currency = config.store.currency()?;
        let catalog = config.store.load_catalog()?;

        let cart = CartEngine::restore(
            SnapshotRepository::new(cache.clone(), CART_KEY),
            config.store.coupon_table()?,
            config.store.shipping_policy()?,
        );
        let identity = IdentityStore::open(cache, &catalog);
        let authenticator =
            MockAuthenticator::new(Duration::from_millis(config.auth.latency_ms));

        let functions = config.functions.to_functions_config();
        let (gateway, contact): (Arc<dyn CheckoutGateway>, Arc<dyn ContactGateway>) =
            if functions.is_configured() {
                let client = FunctionsClient::new(&functions)
                    .context("Invalid [functions] settings")?
                    .with_currency(currency);
                let client = Arc::new(client);
                (client.clone(), client)
            } else {
                tracing::debug!("no functions endpoint configured");
                let offline = Arc::new(Unconfigured);
                (offline.clone(), offline)
            };

        let processor = Arc::new(SimulatedProcessor::new(config.payment.simulate));
        let checkout = CheckoutFlow::new(gateway, processor, config.store.checkout_config());

        Ok(Self {
            catalog,
            cart: Mutex::new(cart),
            identity: Mutex::new(identity),
            authenticator,
            checkout,
            contact,
        })
    }

    pub fn contact_gateway(&self) -> &dyn ContactGateway {
        self.contact.as_ref()
    }
}

/// Gateway used when no backend is configured. Every call fails as
/// unavailable so the flows surface their retryable notices.
struct Unconfigured;

#[async_trait]
impl CheckoutGateway for Unconfigured {
    async fn create_checkout(
        &self,
        _request: &CreateCheckoutRequest,
    ) -> Result<CheckoutCreated, GatewayError> {
        Err(GatewayError::Unavailable(NOT_CONFIGURED.to_string()))
    }

    async fn confirm_order(
        &self,
        _request: &ConfirmOrderRequest,
    ) -> Result<OrderNumber, GatewayError> {
        Err(GatewayError::Unavailable(NOT_CONFIGURED.to_string()))
    }
}

#[async_trait]
impl ContactGateway for Unconfigured {
    async fn send_contact(&self, _form: &ContactForm) -> Result<Option<String>, GatewayError> {
        Err(GatewayError::Unavailable(NOT_CONFIGURED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_commerce::checkout::{CheckoutError, CheckoutPhase, ShippingForm};
    use boutique_commerce::ProductId;

    fn form() -> ShippingForm {
        ShippingForm {
            name: "Ana López".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            street: "Av. Reforma 123".to_string(),
            city: "Ciudad de México".to_string(),
            state: "CDMX".to_string(),
            zip_code: "06600".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cart_survives_reopen() {
        let cache = Cache::memory();
        let config = CliConfig::default();

        let shop = Storefront::with_cache(&config, cache.clone()).unwrap();
        let bag = shop
            .catalog
            .require(&ProductId::new("bag-1"))
            .unwrap()
            .clone();
        shop.cart.lock().await.add_item(bag, 2);
        drop(shop);

        let shop = Storefront::with_cache(&config, cache).unwrap();
        let cart = shop.cart.lock().await;
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_unconfigured_backend_keeps_shipping_phase() {
        let mut config = CliConfig::default();
        config.functions.base_url.clear();
        let shop = Storefront::with_cache(&config, Cache::memory()).unwrap();
        let wallet = shop
            .catalog
            .require(&ProductId::new("wallet-1"))
            .unwrap()
            .clone();
        shop.cart.lock().await.add_item(wallet, 1);

        // An endpoint set in the environment would bypass the offline gateway.
        if std::env::var(boutique_functions::ENV_URL).is_ok() {
            return;
        }
        let err = shop
            .checkout
            .submit_shipping(form(), &shop.cart)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Start { .. }));
        assert_eq!(shop.checkout.phase().await, CheckoutPhase::Shipping);
        assert!(!shop.cart.lock().await.is_empty());
    }

    #[test]
    fn test_configured_catalog_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let products = Catalog::builtin().products()[..3].to_vec();
        std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

        let mut config = CliConfig::default();
        config.store.catalog = Some(path);
        let shop = Storefront::with_cache(&config, Cache::memory()).unwrap();

        assert_eq!(shop.catalog.len(), 3);
        assert!(shop.catalog.get(&ProductId::new("bag-1")).is_some());
    }

    #[test]
    fn test_config_rules_reach_cart() {
        let mut config = CliConfig::default();
        config.store.coupons.clear();
        config.store.coupons.insert("HOLA5".to_string(), 0.05);
        let shop = Storefront::with_cache(&config, Cache::memory()).unwrap();

        let mut cart = shop.cart.try_lock().unwrap();
        assert!(cart.apply_coupon("hola5"));
        assert!(!cart.apply_coupon("VIP20"));
    }
}
