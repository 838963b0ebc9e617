//! Sandbox payment processor.

use async_trait::async_trait;
use boutique_commerce::checkout::{
    ConfirmPaymentRequest, PaymentError, PaymentIntent, PaymentProcessor, PaymentStatus,
};
use rand::Rng;
use std::time::Duration;

use crate::config::SimulatedOutcome;

/// Decline message shown for the `fail` outcome.
pub const DECLINED_MESSAGE: &str = "Your card was declined.";

/// Stands in for the hosted payment form during CLI runs.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    outcome: SimulatedOutcome,
    latency: Duration,
}

impl SimulatedProcessor {
    pub fn new(outcome: SimulatedOutcome) -> Self {
        Self {
            outcome,
            latency: Duration::from_millis(400),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

fn intent_id() -> String {
    let bytes: [u8; 12] = rand::thread_rng().gen();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("pi_sim_{hex}")
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        tracing::debug!(receipt = %request.receipt_email, outcome = ?self.outcome, "simulating payment");
        tokio::time::sleep(self.latency).await;

        match self.outcome {
            SimulatedOutcome::Succeed => Ok(PaymentIntent {
                id: intent_id(),
                status: PaymentStatus::Succeeded,
            }),
            SimulatedOutcome::Processing => Ok(PaymentIntent {
                id: intent_id(),
                status: PaymentStatus::Processing,
            }),
            SimulatedOutcome::Fail => Err(PaymentError::Declined(DECLINED_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ConfirmPaymentRequest {
        ConfirmPaymentRequest {
            client_secret: "pi_1_secret".to_string(),
            return_url: "http://localhost:8080/checkout/success".to_string(),
            receipt_email: "ana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_outcomes() {
        let ok = SimulatedProcessor::new(SimulatedOutcome::Succeed)
            .with_latency(Duration::ZERO)
            .confirm_payment(&request())
            .await
            .unwrap();
        assert_eq!(ok.status, PaymentStatus::Succeeded);
        assert!(ok.id.starts_with("pi_sim_"));

        let pending = SimulatedProcessor::new(SimulatedOutcome::Processing)
            .with_latency(Duration::ZERO)
            .confirm_payment(&request())
            .await
            .unwrap();
        assert_eq!(pending.status, PaymentStatus::Processing);

        let err = SimulatedProcessor::new(SimulatedOutcome::Fail)
            .with_latency(Duration::ZERO)
            .confirm_payment(&request())
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::Declined(DECLINED_MESSAGE.to_string()));
    }
}
