//! Connection settings for the backend functions.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the functions base URL.
pub const ENV_URL: &str = "BOUTIQUE_FUNCTIONS_URL";
/// Environment variable holding the API key.
pub const ENV_KEY: &str = "BOUTIQUE_FUNCTIONS_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "BOUTIQUE_FUNCTIONS_TIMEOUT";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend functions live and how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct FunctionsConfig {
    /// Project URL; functions are served under `/functions/v1/`.
    pub base_url: String,
    /// Public API key sent as bearer token and `apikey` header.
    pub api_key: String,
    pub timeout: Duration,
}

// Keeps the key out of logs.
impl fmt::Debug for FunctionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FunctionsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the settings from the environment.
    ///
    /// Returns `None` when `BOUTIQUE_FUNCTIONS_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Let environment variables override the present settings.
    pub fn overlay_env(self) -> Self {
        self.overlay_vars(|name| std::env::var(name).ok())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if a base URL is set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = get(ENV_URL).filter(|u| !u.trim().is_empty())?;
        Some(Self::new(url).overlay_vars(get))
    }

    fn overlay_vars(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = get(ENV_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = get(ENV_KEY) {
            self.api_key = key;
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout = Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_vars_requires_url() {
        assert!(FunctionsConfig::from_vars(vars(&[(ENV_KEY, "k")])).is_none());
        assert!(FunctionsConfig::from_vars(vars(&[(ENV_URL, "  ")])).is_none());
    }

    #[test]
    fn test_from_vars_reads_all() {
        let config = FunctionsConfig::from_vars(vars(&[
            (ENV_URL, "https://shop.example.co"),
            (ENV_KEY, "anon"),
            (ENV_TIMEOUT, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://shop.example.co");
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let config = FunctionsConfig::new("https://a.example.co")
            .with_api_key("file-key")
            .overlay_vars(vars(&[(ENV_TIMEOUT, "nope")]));
        assert_eq!(config.base_url, "https://a.example.co");
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_debug_hides_key() {
        let config = FunctionsConfig::new("https://a.example.co").with_api_key("secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
