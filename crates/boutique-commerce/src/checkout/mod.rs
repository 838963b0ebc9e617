//! Checkout module.
//!
//! Contains the shipping form, the session state machine, the remote
//! seams, and the async driver that ties them together.

mod flow;
mod form;
mod gateway;
mod session;

pub use flow::{CheckoutConfig, CheckoutError, CheckoutFlow, DEFAULT_COUNTRY, DEFAULT_RETURN_URL};
pub use form::{ShippingAddress, ShippingField, ShippingForm};
pub use gateway::{
    CheckoutCreated, CheckoutGateway, ConfirmOrderRequest, ConfirmPaymentRequest,
    CreateCheckoutRequest, GatewayError, PaymentError, PaymentIntent, PaymentProcessor,
    PaymentStatus, PriceBreakdown,
};
pub use session::{CheckoutPhase, CheckoutSession, Guard, PENDING_NOTICE, START_FAILED_NOTICE};
