//! Async checkout driver.

use crate::cart::CartEngine;
use crate::checkout::{
    CheckoutGateway, CheckoutPhase, CheckoutSession, ConfirmOrderRequest, ConfirmPaymentRequest,
    CreateCheckoutRequest, GatewayError, Guard, PaymentError, PaymentProcessor, PaymentStatus,
    PriceBreakdown, ShippingField, ShippingForm, START_FAILED_NOTICE,
};
use crate::ids::OrderNumber;
use crate::validation::FieldErrors;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Default country stamped on every shipping address.
pub const DEFAULT_COUNTRY: &str = "México";

/// Default page the processor returns to after off-site authentication.
pub const DEFAULT_RETURN_URL: &str = "http://localhost:8080/checkout/success";

/// Errors surfaced by a checkout submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// Another submission for this session is still running.
    #[error("a checkout submission is already in progress")]
    InFlight,

    /// Submission from the wrong phase.
    #[error("cannot submit {action} while in the {phase} phase")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    /// Nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Required shipping fields are missing.
    #[error("invalid shipping details: {0}")]
    Validation(FieldErrors<ShippingField>),

    /// create-checkout failed; retryable.
    #[error("{notice}")]
    Start {
        notice: String,
        #[source]
        source: GatewayError,
    },

    /// The processor refused or errored; retryable.
    #[error("{0}")]
    Payment(PaymentError),

    /// The processor answered with a status other than succeeded.
    #[error("payment not completed (status: {})", .0.as_str())]
    NotCompleted(PaymentStatus),
}

/// Store-level checkout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Country stamped on shipping addresses.
    pub country: String,
    /// Return URL handed to the processor.
    pub return_url: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
        }
    }
}

/// Drives one checkout session against the backend and processor.
///
/// At most one submission runs at a time. The session lock is only held
/// between awaits, never across a remote call.
pub struct CheckoutFlow {
    session: Mutex<CheckoutSession>,
    in_flight: AtomicBool,
    gateway: Arc<dyn CheckoutGateway>,
    processor: Arc<dyn PaymentProcessor>,
    config: CheckoutConfig,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| CheckoutError::InFlight)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutFlow {
    pub fn new(
        gateway: Arc<dyn CheckoutGateway>,
        processor: Arc<dyn PaymentProcessor>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            session: Mutex::new(CheckoutSession::new()),
            in_flight: AtomicBool::new(false),
            gateway,
            processor,
            config,
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Copy of the current session.
    pub async fn session(&self) -> CheckoutSession {
        self.session.lock().await.clone()
    }

    pub async fn phase(&self) -> CheckoutPhase {
        self.session.lock().await.phase()
    }

    /// Check if a submission is running.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Entry check for the checkout page.
    pub async fn guard(&self, cart_is_empty: bool) -> Guard {
        self.session.lock().await.guard(cart_is_empty)
    }

    /// `Payment -> Shipping`.
    pub async fn back_to_shipping(&self) -> bool {
        self.session.lock().await.back_to_shipping()
    }

    /// Discard the session.
    pub async fn reset(&self) {
        *self.session.lock().await = CheckoutSession::new();
        debug!("checkout session reset");
    }

    /// Validate the form and open a checkout on the backend.
    ///
    /// On success the session moves to `Payment` and the server's
    /// breakdown is returned. On any failure the phase is unchanged.
    #[instrument(skip_all)]
    pub async fn submit_shipping(
        &self,
        form: ShippingForm,
        cart: &Mutex<CartEngine>,
    ) -> Result<PriceBreakdown, CheckoutError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let request = {
            let mut session = self.session.lock().await;
            if session.phase() != CheckoutPhase::Shipping {
                return Err(CheckoutError::WrongPhase {
                    action: "shipping",
                    phase: session.phase().as_str(),
                });
            }
            session.take_form(form).map_err(CheckoutError::Validation)?;

            let items = cart.lock().await.lines().to_vec();
            if items.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            CreateCheckoutRequest {
                items,
                customer_email: session.form().email().to_string(),
                shipping_address: session.form().to_address(&self.config.country),
            }
        };

        debug!(items = request.items.len(), "creating checkout");
        let result = self.gateway.create_checkout(&request).await;

        let mut session = self.session.lock().await;
        match result {
            Ok(created) => {
                let breakdown = created.breakdown;
                session.enter_payment(created.client_secret, breakdown);
                info!(total = %breakdown.total, "checkout created");
                Ok(breakdown)
            }
            Err(e) => {
                warn!(error = %e, "create-checkout failed");
                session.fail(START_FAILED_NOTICE);
                Err(CheckoutError::Start {
                    notice: START_FAILED_NOTICE.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Confirm the payment, then register the order.
    ///
    /// An emptied cart is refused before the processor is called. A
    /// processor failure leaves the session in `Payment` with the cart
    /// untouched. Once the payment succeeds the session always reaches
    /// `Success` and the cart is cleared; if the order cannot be
    /// registered the order number is the pending sentinel.
    #[instrument(skip_all)]
    pub async fn submit_payment(
        &self,
        cart: &Mutex<CartEngine>,
    ) -> Result<OrderNumber, CheckoutError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let (payment, form, breakdown) = {
            let session = self.session.lock().await;
            let (Some(secret), Some(breakdown), CheckoutPhase::Payment) =
                (session.client_secret(), session.breakdown(), session.phase())
            else {
                return Err(CheckoutError::WrongPhase {
                    action: "payment",
                    phase: session.phase().as_str(),
                });
            };
            let payment = ConfirmPaymentRequest {
                client_secret: secret.to_string(),
                return_url: self.config.return_url.clone(),
                receipt_email: session.form().email().to_string(),
            };
            (payment, session.form().clone(), *breakdown)
        };

        let items = cart.lock().await.lines().to_vec();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let outcome = self.processor.confirm_payment(&payment).await;
        let intent = match outcome {
            Ok(intent) if intent.status == PaymentStatus::Succeeded => intent,
            Ok(intent) => {
                warn!(status = intent.status.as_str(), "payment not completed");
                let err = CheckoutError::NotCompleted(intent.status);
                self.session.lock().await.fail(err.to_string());
                return Err(err);
            }
            Err(e) => {
                warn!(error = %e, "payment failed");
                let err = CheckoutError::Payment(e);
                self.session.lock().await.fail(err.to_string());
                return Err(err);
            }
        };

        let order = ConfirmOrderRequest {
            payment_intent_id: intent.id,
            customer_email: form.email().to_string(),
            customer_name: form.name.trim().to_string(),
            items,
            shipping_address: form.to_address(&self.config.country),
            breakdown,
        };

        let order_number = match self.gateway.confirm_order(&order).await {
            Ok(number) => {
                info!(order = %number, "order confirmed");
                number
            }
            Err(e) => {
                warn!(
                    error = %e,
                    payment_intent = %order.payment_intent_id,
                    "payment captured but order registration failed"
                );
                OrderNumber::pending()
            }
        };

        cart.lock().await.clear();
        self.session.lock().await.complete(order_number.clone());
        Ok(order_number)
    }
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("config", &self.config)
            .field("in_flight", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::checkout::{CheckoutCreated, PaymentIntent};
    use crate::money::{Currency, Money};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn breakdown() -> PriceBreakdown {
        PriceBreakdown {
            subtotal: Money::from_units(2450, Currency::GTQ),
            shipping: Money::zero(Currency::GTQ),
            tax: Money::from_units(392, Currency::GTQ),
            total: Money::from_units(2842, Currency::GTQ),
        }
    }

    struct MockGateway {
        create: Result<CheckoutCreated, GatewayError>,
        confirm: Result<OrderNumber, GatewayError>,
        create_calls: AtomicUsize,
        confirm_calls: AtomicUsize,
        entered: Notify,
        release: Option<Notify>,
    }

    impl MockGateway {
        fn ok() -> Self {
            Self {
                create: Ok(CheckoutCreated {
                    client_secret: "pi_123_secret".to_string(),
                    breakdown: breakdown(),
                }),
                confirm: Ok(OrderNumber::new("BJ-2026-000042")),
                create_calls: AtomicUsize::new(0),
                confirm_calls: AtomicUsize::new(0),
                entered: Notify::new(),
                release: None,
            }
        }
    }

    #[async_trait]
    impl CheckoutGateway for MockGateway {
        async fn create_checkout(
            &self,
            _request: &CreateCheckoutRequest,
        ) -> Result<CheckoutCreated, GatewayError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            if let Some(release) = &self.release {
                release.notified().await;
            }
            self.create.clone()
        }

        async fn confirm_order(
            &self,
            _request: &ConfirmOrderRequest,
        ) -> Result<OrderNumber, GatewayError> {
            self.confirm_calls.fetch_add(1, Ordering::SeqCst);
            self.confirm.clone()
        }
    }

    struct MockProcessor(Result<PaymentIntent, PaymentError>);

    impl MockProcessor {
        fn succeeding() -> Self {
            Self(Ok(PaymentIntent {
                id: "pi_123".to_string(),
                status: PaymentStatus::Succeeded,
            }))
        }
    }

    #[async_trait]
    impl PaymentProcessor for MockProcessor {
        async fn confirm_payment(
            &self,
            _request: &ConfirmPaymentRequest,
        ) -> Result<PaymentIntent, PaymentError> {
            self.0.clone()
        }
    }

    fn form() -> ShippingForm {
        ShippingForm {
            name: "Ana López".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("+52 55 1234 5678".to_string()),
            street: "Av. Reforma 123".to_string(),
            city: "Ciudad de México".to_string(),
            state: "CDMX".to_string(),
            zip_code: "06600".to_string(),
        }
    }

    fn cart_with_item() -> Mutex<CartEngine> {
        let mut engine = CartEngine::in_memory();
        engine.add_item(Catalog::builtin().products()[0].clone(), 1);
        Mutex::new(engine)
    }

    fn flow(gateway: Arc<MockGateway>, processor: MockProcessor) -> CheckoutFlow {
        CheckoutFlow::new(gateway, Arc::new(processor), CheckoutConfig::default())
    }

    #[tokio::test]
    async fn test_happy_path() {
        let gateway = Arc::new(MockGateway::ok());
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        let priced = flow.submit_shipping(form(), &cart).await.unwrap();
        assert_eq!(priced, breakdown());
        assert_eq!(flow.phase().await, CheckoutPhase::Payment);

        let order = flow.submit_payment(&cart).await.unwrap();
        assert_eq!(order.as_str(), "BJ-2026-000042");
        assert_eq!(flow.phase().await, CheckoutPhase::Success);
        assert!(cart.lock().await.is_empty());
        assert_eq!(flow.guard(true).await, Guard::Proceed);
    }

    #[tokio::test]
    async fn test_blank_field_sends_nothing() {
        let gateway = Arc::new(MockGateway::ok());
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        let mut bad = form();
        bad.street = "   ".to_string();
        let err = flow.submit_shipping(bad, &cart).await.unwrap_err();

        match err {
            CheckoutError::Validation(errors) => {
                assert!(!errors.get(ShippingField::Street).unwrap_or("").is_empty())
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(flow.phase().await, CheckoutPhase::Shipping);
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_failure_is_retryable() {
        let mut mock = MockGateway::ok();
        mock.create = Err(GatewayError::Timeout);
        let gateway = Arc::new(mock);
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        let err = flow.submit_shipping(form(), &cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Start { .. }));

        let session = flow.session().await;
        assert_eq!(session.phase(), CheckoutPhase::Shipping);
        assert_eq!(session.notice(), Some(START_FAILED_NOTICE));
        assert!(session.client_secret().is_none());
    }

    #[tokio::test]
    async fn test_processor_failure_keeps_cart() {
        let gateway = Arc::new(MockGateway::ok());
        let processor = MockProcessor(Err(PaymentError::Declined(
            "Your card was declined.".to_string(),
        )));
        let flow = flow(gateway.clone(), processor);
        let cart = cart_with_item();

        flow.submit_shipping(form(), &cart).await.unwrap();
        let err = flow.submit_payment(&cart).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Payment(_)));
        assert_eq!(flow.phase().await, CheckoutPhase::Payment);
        assert!(!cart.lock().await.is_empty());
        assert_eq!(
            flow.session().await.notice(),
            Some("Your card was declined.")
        );
        assert_eq!(gateway.confirm_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unfinished_status_is_failure() {
        let gateway = Arc::new(MockGateway::ok());
        let processor = MockProcessor(Ok(PaymentIntent {
            id: "pi_1".to_string(),
            status: PaymentStatus::Processing,
        }));
        let flow = flow(gateway, processor);
        let cart = cart_with_item();

        flow.submit_shipping(form(), &cart).await.unwrap();
        let err = flow.submit_payment(&cart).await.unwrap_err();

        assert_eq!(err, CheckoutError::NotCompleted(PaymentStatus::Processing));
        assert_eq!(flow.phase().await, CheckoutPhase::Payment);
        assert!(!cart.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_failure_downgrades_to_pending() {
        let mut mock = MockGateway::ok();
        mock.confirm = Err(GatewayError::Unavailable("connection refused".to_string()));
        let gateway = Arc::new(mock);
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        flow.submit_shipping(form(), &cart).await.unwrap();
        let order = flow.submit_payment(&cart).await.unwrap();

        assert!(order.is_pending());
        let session = flow.session().await;
        assert_eq!(session.phase(), CheckoutPhase::Success);
        assert!(session.is_pending_registration());
        assert!(cart.lock().await.is_empty());
        assert_eq!(gateway.confirm_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_submission_rejected_while_in_flight() {
        let mut mock = MockGateway::ok();
        mock.release = Some(Notify::new());
        let gateway = Arc::new(mock);
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        let first = flow.submit_shipping(form(), &cart);
        let second = async {
            gateway.entered.notified().await;
            assert!(flow.is_submitting());
            let result = flow.submit_shipping(form(), &cart).await;
            if let Some(release) = &gateway.release {
                release.notify_one();
            }
            result
        };

        let (first, second) = tokio::join!(first, second);
        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), CheckoutError::InFlight);
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let flow = flow(Arc::new(MockGateway::ok()), MockProcessor::succeeding());
        let cart = Mutex::new(CartEngine::in_memory());

        assert_eq!(flow.guard(true).await, Guard::Redirect);
        let err = flow.submit_shipping(form(), &cart).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[tokio::test]
    async fn test_payment_rejected_when_cart_emptied() {
        let gateway = Arc::new(MockGateway::ok());
        let flow = flow(gateway.clone(), MockProcessor::succeeding());
        let cart = cart_with_item();

        flow.submit_shipping(form(), &cart).await.unwrap();
        cart.lock().await.clear();
        assert_eq!(flow.guard(true).await, Guard::Redirect);

        let err = flow.submit_payment(&cart).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(flow.phase().await, CheckoutPhase::Payment);
        assert_eq!(gateway.confirm_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_payment_before_shipping_is_wrong_phase() {
        let flow = flow(Arc::new(MockGateway::ok()), MockProcessor::succeeding());
        let cart = cart_with_item();

        let err = flow.submit_payment(&cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::WrongPhase { .. }));
    }

    #[tokio::test]
    async fn test_back_to_shipping_and_reset() {
        let flow = flow(Arc::new(MockGateway::ok()), MockProcessor::succeeding());
        let cart = cart_with_item();

        flow.submit_shipping(form(), &cart).await.unwrap();
        assert!(flow.back_to_shipping().await);
        assert_eq!(flow.phase().await, CheckoutPhase::Shipping);
        assert_eq!(flow.session().await.form(), &form());

        flow.reset().await;
        assert_eq!(flow.session().await, CheckoutSession::new());
    }
}
