//! CLI configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use boutique_commerce::cart::{CouponTable, ShippingPolicy};
use boutique_commerce::catalog::Catalog;
use boutique_commerce::checkout::{CheckoutConfig, DEFAULT_COUNTRY, DEFAULT_RETURN_URL};
use boutique_commerce::{Currency, Money};
use boutique_functions::FunctionsConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["boutique.toml", ".boutique.toml", "boutique.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pricing and checkout settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Where the cart and user records live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Backend functions endpoint.
    #[serde(default)]
    pub functions: FunctionsSection,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Sandbox payment processor.
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ISO currency code for prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Subtotal (whole units) from which shipping is free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    /// Flat shipping fee (whole units) below the threshold.
    #[serde(default = "default_flat_shipping_fee")]
    pub flat_shipping_fee: i64,

    /// Country stamped on shipping addresses.
    #[serde(default = "default_country")]
    pub country: String,

    /// Return URL handed to the payment processor.
    #[serde(default = "default_return_url")]
    pub return_url: String,

    /// Coupon code to discount fraction.
    #[serde(default = "default_coupons")]
    pub coupons: BTreeMap<String, f64>,

    /// JSON product file replacing the built-in catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

fn default_currency() -> String {
    "GTQ".to_string()
}

fn default_free_shipping_threshold() -> i64 {
    2000
}

fn default_flat_shipping_fee() -> i64 {
    150
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_return_url() -> String {
    DEFAULT_RETURN_URL.to_string()
}

fn default_coupons() -> BTreeMap<String, f64> {
    CouponTable::default()
        .iter()
        .map(|(code, rate)| (code.to_string(), rate.value()))
        .collect()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_fee: default_flat_shipping_fee(),
            country: default_country(),
            return_url: default_return_url(),
            coupons: default_coupons(),
            catalog: None,
        }
    }
}

impl StoreConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unknown currency in store.currency: {}", self.currency))
    }

    pub fn shipping_policy(&self) -> Result<ShippingPolicy> {
        let currency = self.currency()?;
        Ok(ShippingPolicy::new(
            Money::from_units(self.free_shipping_threshold, currency),
            Money::from_units(self.flat_shipping_fee, currency),
        ))
    }

    pub fn coupon_table(&self) -> Result<CouponTable> {
        CouponTable::new(self.coupons.iter().map(|(code, rate)| (code.as_str(), *rate)))
            .context("Invalid [store.coupons] entry")
    }

    /// The configured catalog file, or the built-in products.
    ///
    /// Every product must be priced in the store currency.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let currency = self.currency()?;
        let Some(path) = &self.catalog else {
            return Ok(Catalog::builtin_in(currency));
        };

        let catalog = Catalog::load(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        if let Some(product) = catalog
            .products()
            .iter()
            .find(|p| p.price.currency != currency)
        {
            bail!(
                "Product {} is priced in {}, but store.currency is {}",
                product.id,
                product.price.currency,
                currency
            );
        }
        Ok(catalog)
    }

    pub fn checkout_config(&self) -> CheckoutConfig {
        CheckoutConfig {
            country: self.country.clone(),
            return_url: self.return_url.clone(),
        }
    }
}

/// Storage backend kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file backend, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub backend: StorageBackend,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".boutique")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            backend: StorageBackend::default(),
        }
    }
}

/// Backend functions settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionsSection {
    /// Project URL. Empty means checkout and contact are unavailable.
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FunctionsSection {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FunctionsSection {
    /// Client settings with environment overrides applied.
    pub fn to_functions_config(&self) -> FunctionsConfig {
        FunctionsConfig::new(self.base_url.clone())
            .with_api_key(self.api_key.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .overlay_env()
    }
}

/// Mock authenticator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated login and signup delay.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    1000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

/// Outcome reported by the sandbox payment processor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedOutcome {
    #[default]
    Succeed,
    Fail,
    Processing,
}

/// Payment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub simulate: SimulatedOutcome,
}

/// Generate a default boutique.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Boutique storefront configuration

[store]
currency = "GTQ"
free_shipping_threshold = 2000
flat_shipping_fee = 150
country = "{country}"
return_url = "{return_url}"
# JSON product file replacing the built-in catalog
# catalog = "catalog.json"

[store.coupons]
JUANITO10 = 0.10
BIENVENIDO15 = 0.15
VIP20 = 0.20

[storage]
dir = ".boutique"
backend = "file"

[functions]
# Overridden by BOUTIQUE_FUNCTIONS_URL / BOUTIQUE_FUNCTIONS_KEY
base_url = ""
api_key = ""
timeout_secs = 30

[auth]
latency_ms = 1000

[payment]
# succeed, fail or processing
simulate = "succeed"
"#,
        country = DEFAULT_COUNTRY,
        return_url = DEFAULT_RETURN_URL,
    )
}
