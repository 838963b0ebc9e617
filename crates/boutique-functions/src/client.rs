//! Client for the hosted backend functions.

use crate::config::FunctionsConfig;
use crate::wire;
use crate::FetchError;
use async_trait::async_trait;
use boutique_commerce::checkout::{
    CheckoutCreated, CheckoutGateway, ConfirmOrderRequest, CreateCheckoutRequest, GatewayError,
};
use boutique_commerce::contact::{ContactForm, ContactGateway};
use boutique_commerce::{Currency, OrderNumber};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

/// Function that prices the cart and opens a payment intent.
pub const CREATE_CHECKOUT: &str = "create-checkout";
/// Function that registers an order after payment.
pub const CONFIRM_ORDER: &str = "confirm-order";
/// Function that delivers contact messages.
pub const CONTACT_FORM: &str = "contact-form";

/// HTTP client for the backend functions.
///
/// Every call is a JSON `POST` to `{base_url}/functions/v1/{name}`. Failed
/// calls are not retried.
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    http: reqwest::Client,
    base_url: String,
    currency: Currency,
}

impl FunctionsClient {
    /// Build a client from connection settings.
    pub fn new(config: &FunctionsConfig) -> Result<Self, FetchError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| FetchError::RequestError(format!("invalid api key: {e}")))?;
            let key = HeaderValue::from_str(&config.api_key)
                .map_err(|e| FetchError::RequestError(format!("invalid api key: {e}")))?;
            headers.insert(AUTHORIZATION, bearer);
            headers.insert("apikey", key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            currency: Currency::default(),
        })
    }

    /// Currency used to read amounts in replies.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Full URL of a function.
    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name)
    }

    /// Invoke a function with a JSON body and decode the JSON reply.
    pub async fn invoke<B, R>(&self, name: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.function_url(name))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(function = name, status = status.as_u16(), "function replied");

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: error_message(&bytes, status.canonical_reason()),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

/// Prefer the `error` (or `message`) field of a JSON body, then the raw text.
fn error_message(body: &[u8], reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["error", "message"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        text
    }
}

#[async_trait]
impl CheckoutGateway for FunctionsClient {
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    async fn create_checkout(
        &self,
        request: &CreateCheckoutRequest,
    ) -> Result<CheckoutCreated, GatewayError> {
        let body = wire::CreateCheckoutBody::from(request);
        let reply: wire::CreateCheckoutReply = self.invoke(CREATE_CHECKOUT, &body).await?;
        Ok(reply.into_created(self.currency))
    }

    #[instrument(skip(self, request), fields(payment_intent = %request.payment_intent_id))]
    async fn confirm_order(
        &self,
        request: &ConfirmOrderRequest,
    ) -> Result<OrderNumber, GatewayError> {
        let body = wire::ConfirmOrderBody::from(request);
        let reply: wire::ConfirmOrderReply = self.invoke(CONFIRM_ORDER, &body).await?;
        Ok(reply.into_order_number())
    }
}

#[async_trait]
impl ContactGateway for FunctionsClient {
    #[instrument(skip(self, form))]
    async fn send_contact(&self, form: &ContactForm) -> Result<Option<String>, GatewayError> {
        let body = wire::ContactBody::from(form);
        let reply: wire::ContactReply = self.invoke(CONTACT_FORM, &body).await?;
        Ok(reply.message.filter(|m| !m.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use boutique_commerce::catalog::Catalog;
    use boutique_commerce::cart::CartLine;
    use boutique_commerce::checkout::{PriceBreakdown, ShippingAddress};
    use boutique_commerce::{Money, ProductId};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct Seen {
        body: Arc<Mutex<Option<Value>>>,
        auth: Arc<Mutex<Option<(String, String)>>>,
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> FunctionsClient {
        FunctionsClient::new(&FunctionsConfig::new(base_url).with_api_key("anon-key")).unwrap()
    }

    fn request() -> CreateCheckoutRequest {
        let catalog = Catalog::builtin();
        CreateCheckoutRequest {
            items: vec![CartLine {
                product: catalog.require(&ProductId::new("wallet-1")).unwrap().clone(),
                quantity: 1,
            }],
            customer_email: "ana@example.com".to_string(),
            shipping_address: ShippingAddress {
                name: "Ana López".to_string(),
                street: "Av. Reforma 123".to_string(),
                city: "Ciudad de México".to_string(),
                state: "CDMX".to_string(),
                zip_code: "06600".to_string(),
                country: "México".to_string(),
            },
        }
    }

    fn header(headers: &AxumHeaders, name: &str) -> String {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn record(
        State(seen): State<Seen>,
        headers: AxumHeaders,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *seen.auth.lock().await = Some((header(&headers, "authorization"), header(&headers, "apikey")));
        *seen.body.lock().await = Some(body);
        Json(json!({
            "clientSecret": "pi_123_secret_456",
            "breakdown": { "subtotal": 890, "shipping": 150, "tax": 166.4, "total": 1206.4 }
        }))
    }

    #[tokio::test]
    async fn test_create_checkout_roundtrip() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/functions/v1/create-checkout", post(record))
            .with_state(seen.clone());
        let base = serve(router).await;

        let created = client(&base).create_checkout(&request()).await.unwrap();
        assert_eq!(created.client_secret, "pi_123_secret_456");
        assert_eq!(created.breakdown.tax, Money::new(16640, Currency::GTQ));
        assert_eq!(created.breakdown.total, Money::new(120640, Currency::GTQ));

        let body = seen.body.lock().await.clone().unwrap();
        assert_eq!(body["customerEmail"], json!("ana@example.com"));
        assert_eq!(body["shippingAddress"]["country"], json!("México"));
        assert_eq!(body["items"][0]["product"]["id"], json!("wallet-1"));

        let (auth, apikey) = seen.auth.lock().await.clone().unwrap();
        assert_eq!(auth, "Bearer anon-key");
        assert_eq!(apikey, "anon-key");
    }

    #[tokio::test]
    async fn test_confirm_order_returns_number() {
        let router = Router::new().route(
            "/functions/v1/confirm-order",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["paymentIntentId"], json!("pi_123"));
                Json(json!({ "orderNumber": "BJ-2026-001300" }))
            }),
        );
        let base = serve(router).await;

        let checkout = request();
        let breakdown = PriceBreakdown {
            subtotal: Money::from_units(890, Currency::GTQ),
            shipping: Money::from_units(150, Currency::GTQ),
            tax: Money::new(16640, Currency::GTQ),
            total: Money::new(120640, Currency::GTQ),
        };
        let number = client(&base)
            .confirm_order(&ConfirmOrderRequest {
                payment_intent_id: "pi_123".to_string(),
                customer_email: checkout.customer_email.clone(),
                customer_name: "Ana López".to_string(),
                items: checkout.items.clone(),
                shipping_address: checkout.shipping_address.clone(),
                breakdown,
            })
            .await
            .unwrap();
        assert_eq!(number.as_str(), "BJ-2026-001300");
    }

    #[tokio::test]
    async fn test_error_field_becomes_rejection() {
        let router = Router::new().route(
            "/functions/v1/create-checkout",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Cart is empty" })),
                )
            }),
        );
        let base = serve(router).await;

        let err = client(&base).create_checkout(&request()).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Rejected {
                status: 400,
                message: "Cart is empty".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_body() {
        let router = Router::new().route(
            "/functions/v1/contact-form",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;

        let form = ContactForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            subject: "Hola".to_string(),
            message: "Mensaje".to_string(),
        };
        let err = client(&base).send_contact(&form).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Rejected {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_contact_optional_message() {
        let router = Router::new()
            .route(
                "/functions/v1/contact-form",
                post(|| async { Json(json!({ "message": "Gracias" })) }),
            );
        let base = serve(router).await;
        let form = ContactForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("+502 5555 0000".to_string()),
            subject: "Hola".to_string(),
            message: "Mensaje".to_string(),
        };
        assert_eq!(
            client(&base).send_contact(&form).await.unwrap(),
            Some("Gracias".to_string())
        );

        let router = Router::new().route("/functions/v1/contact-form", post(|| async { Json(json!({})) }));
        let base = serve(router).await;
        assert_eq!(client(&base).send_contact(&form).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_invalid_response() {
        let router = Router::new().route(
            "/functions/v1/confirm-order",
            post(|| async { Json(json!({ "unexpected": true })) }),
        );
        let base = serve(router).await;

        let result: Result<wire::ConfirmOrderReply, FetchError> =
            client(&base).invoke(CONFIRM_ORDER, &json!({})).await;
        let err = GatewayError::from(result.unwrap_err());
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_function_times_out() {
        let router = Router::new().route(
            "/functions/v1/create-checkout",
            post(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({}))
            }),
        );
        let base = serve(router).await;
        let config = FunctionsConfig::new(base).with_timeout(Duration::from_millis(50));
        let client = FunctionsClient::new(&config).unwrap();

        let err = client.create_checkout(&request()).await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_unreachable_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .create_checkout(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = FunctionsClient::new(&FunctionsConfig::new("ftp://nope")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_function_url_trims_slash() {
        let client = FunctionsClient::new(&FunctionsConfig::new("https://x.example.co/")).unwrap();
        assert_eq!(
            client.function_url(CREATE_CHECKOUT),
            "https://x.example.co/functions/v1/create-checkout"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(br#"{"error":"nope"}"#, None), "nope");
        assert_eq!(error_message(br#"{"message":"m"}"#, None), "m");
        assert_eq!(error_message(b"", Some("Bad Gateway")), "Bad Gateway");
    }
}
