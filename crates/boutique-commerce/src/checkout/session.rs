//! Checkout session state machine.

use crate::checkout::{PriceBreakdown, ShippingField, ShippingForm};
use crate::ids::OrderNumber;
use crate::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// Notice shown when payment went through but the order was not recorded.
pub const PENDING_NOTICE: &str = "payment captured, order registration pending";

/// Notice shown when the checkout could not be started.
pub const START_FAILED_NOTICE: &str = "Error starting checkout. Try again.";

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Collecting the shipping form.
    #[default]
    Shipping,
    /// Waiting for payment confirmation.
    Payment,
    /// Checkout complete.
    Success,
}

impl CheckoutPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Shipping => "shipping",
            CheckoutPhase::Payment => "payment",
            CheckoutPhase::Success => "success",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutPhase::Shipping => "Shipping",
            CheckoutPhase::Payment => "Payment",
            CheckoutPhase::Success => "Success",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutPhase::Shipping => 1,
            CheckoutPhase::Payment => 2,
            CheckoutPhase::Success => 3,
        }
    }
}

/// What the checkout page should do on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Show the checkout.
    Proceed,
    /// Nothing to buy; send the customer back to the catalog.
    Redirect,
}

/// Transient checkout state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    phase: CheckoutPhase,
    form: ShippingForm,
    field_errors: FieldErrors<ShippingField>,
    client_secret: Option<String>,
    breakdown: Option<PriceBreakdown>,
    notice: Option<String>,
    order_number: Option<OrderNumber>,
}

impl CheckoutSession {
    /// A fresh session in the shipping phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn form(&self) -> &ShippingForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors<ShippingField> {
        &self.field_errors
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Server-computed amounts, once the payment phase is reached.
    pub fn breakdown(&self) -> Option<&PriceBreakdown> {
        self.breakdown.as_ref()
    }

    /// Last user-facing message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn order_number(&self) -> Option<&OrderNumber> {
        self.order_number.as_ref()
    }

    /// Check if the order was captured but not registered.
    pub fn is_pending_registration(&self) -> bool {
        self.order_number
            .as_ref()
            .map(OrderNumber::is_pending)
            .unwrap_or(false)
    }

    /// Entry check for the checkout page.
    pub fn guard(&self, cart_is_empty: bool) -> Guard {
        if cart_is_empty && self.phase != CheckoutPhase::Success {
            Guard::Redirect
        } else {
            Guard::Proceed
        }
    }

    /// Store the form and validate it. Stays in `Shipping` either way.
    pub fn take_form(&mut self, form: ShippingForm) -> Result<(), FieldErrors<ShippingField>> {
        self.notice = None;
        self.form = form;
        match self.form.validate() {
            Ok(()) => {
                self.field_errors = FieldErrors::new();
                Ok(())
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// `Shipping -> Payment` after the backend opened a checkout.
    pub fn enter_payment(&mut self, client_secret: String, breakdown: PriceBreakdown) {
        self.client_secret = Some(client_secret);
        self.breakdown = Some(breakdown);
        self.notice = None;
        self.phase = CheckoutPhase::Payment;
    }

    /// Record a retryable failure without changing phase.
    pub fn fail(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// `Payment -> Success`. A pending order number carries the pending notice.
    pub fn complete(&mut self, order_number: OrderNumber) {
        self.notice = order_number
            .is_pending()
            .then(|| PENDING_NOTICE.to_string());
        self.order_number = Some(order_number);
        self.phase = CheckoutPhase::Success;
    }

    /// `Payment -> Shipping`. The form is kept; the client secret and
    /// breakdown are discarded. Returns false from any other phase.
    pub fn back_to_shipping(&mut self) -> bool {
        if self.phase != CheckoutPhase::Payment {
            return false;
        }
        self.phase = CheckoutPhase::Shipping;
        self.client_secret = None;
        self.breakdown = None;
        self.notice = None;
        true
    }
}
