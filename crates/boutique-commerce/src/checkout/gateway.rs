//! Seams to the backend functions and the payment processor.

use crate::cart::CartLine;
use crate::checkout::ShippingAddress;
use crate::ids::OrderNumber;
use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-computed amounts for a checkout. Authoritative once received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

/// Body of `create-checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    pub items: Vec<CartLine>,
    pub customer_email: String,
    pub shipping_address: ShippingAddress,
}

/// Reply of `create-checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCreated {
    /// Secret used to confirm the payment with the processor.
    pub client_secret: String,
    pub breakdown: PriceBreakdown,
}

/// Body of `confirm-order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmOrderRequest {
    pub payment_intent_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub breakdown: PriceBreakdown,
}

/// Errors from the backend functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The function answered with an error status.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No answer in time.
    #[error("backend request timed out")]
    Timeout,

    /// The function could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The answer did not have the expected shape.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Remote functions used by checkout.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Price the cart server-side and open a payment intent.
    async fn create_checkout(
        &self,
        request: &CreateCheckoutRequest,
    ) -> Result<CheckoutCreated, GatewayError>;

    /// Persist the order after a captured payment.
    async fn confirm_order(
        &self,
        request: &ConfirmOrderRequest,
    ) -> Result<OrderNumber, GatewayError>;
}

/// Body of the processor's confirm-payment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub client_secret: String,
    pub return_url: String,
    pub receipt_email: String,
}

/// Processor-reported payment intent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Processing => "processing",
            PaymentStatus::RequiresAction => "requires_action",
            PaymentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentStatus::Canceled => "canceled",
        }
    }
}

/// Processor reply to a payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: PaymentStatus,
}

/// Errors from the payment processor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The card or payment method was declined.
    #[error("{0}")]
    Declined(String),

    /// The processor could not complete the request.
    #[error("payment processor error: {0}")]
    Processor(String),
}

/// External payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<PaymentIntent, PaymentError>;
}
