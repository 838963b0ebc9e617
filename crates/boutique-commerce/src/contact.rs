//! Contact form.

use crate::checkout::GatewayError;
use crate::validation::{looks_like_email, FieldErrors};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shown when the backend confirms without a message of its own.
pub const DEFAULT_CONFIRMATION: &str = "Message sent! We will get back to you soon.";

/// Shown when the message could not be delivered.
pub const SEND_FAILED_NOTICE: &str = "Error sending the message. Try again.";

/// Contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FieldErrors<ContactField>> {
        let mut errors = FieldErrors::new();
        errors.require(ContactField::Name, &self.name, "Name is required");
        if self.email.trim().is_empty() {
            errors.add(ContactField::Email, "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.add(ContactField::Email, "Invalid email");
        }
        errors.require(ContactField::Subject, &self.subject, "Subject is required");
        errors.require(ContactField::Message, &self.message, "Message is required");
        errors.into_result()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    #[error("invalid contact form: {0}")]
    Validation(FieldErrors<ContactField>),

    /// Delivery failed; retryable.
    #[error("{notice}")]
    Send {
        notice: String,
        #[source]
        source: GatewayError,
    },
}

/// Remote `contact-form` function.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    /// Deliver the message. The backend may return its own confirmation.
    async fn send_contact(&self, form: &ContactForm) -> Result<Option<String>, GatewayError>;
}

/// Validate and send a contact message, returning the confirmation text.
pub async fn submit_contact(
    gateway: &dyn ContactGateway,
    form: &ContactForm,
) -> Result<String, ContactError> {
    form.validate().map_err(ContactError::Validation)?;

    match gateway.send_contact(form).await {
        Ok(message) => {
            tracing::info!(subject = %form.subject, "contact message sent");
            Ok(message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONFIRMATION.to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "contact-form failed");
            Err(ContactError::Send {
                notice: SEND_FAILED_NOTICE.to_string(),
                source: e,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockContact {
        reply: Result<Option<String>, GatewayError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactGateway for MockContact {
        async fn send_contact(&self, _form: &ContactForm) -> Result<Option<String>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            subject: "Custom order".to_string(),
            message: "Do you make this bag in green?".to_string(),
        }
    }

    #[test]
    fn test_validation_messages() {
        let mut bad = form();
        bad.email = "ana@example".to_string();
        bad.message = " ".to_string();

        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.get(ContactField::Email), Some("Invalid email"));
        assert_eq!(errors.get(ContactField::Message), Some("Message is required"));
        assert!(!errors.contains(ContactField::Name));
    }

    #[test]
    fn test_blank_email_is_required_not_invalid() {
        let mut bad = form();
        bad.email = String::new();
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
    }

    #[tokio::test]
    async fn test_submit_uses_backend_message() {
        let gateway = MockContact {
            reply: Ok(Some("Thanks, Ana!".to_string())),
            calls: AtomicUsize::new(0),
        };
        let reply = submit_contact(&gateway, &form()).await.unwrap();
        assert_eq!(reply, "Thanks, Ana!");
    }

    #[tokio::test]
    async fn test_submit_default_message() {
        let gateway = MockContact {
            reply: Ok(None),
            calls: AtomicUsize::new(0),
        };
        let reply = submit_contact(&gateway, &form()).await.unwrap();
        assert_eq!(reply, DEFAULT_CONFIRMATION);
    }

    #[tokio::test]
    async fn test_invalid_form_not_sent() {
        let gateway = MockContact {
            reply: Ok(None),
            calls: AtomicUsize::new(0),
        };
        let err = submit_contact(&gateway, &ContactForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::Validation(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_failure_is_retryable_notice() {
        let gateway = MockContact {
            reply: Err(GatewayError::Timeout),
            calls: AtomicUsize::new(0),
        };
        let err = submit_contact(&gateway, &form()).await.unwrap_err();
        assert_eq!(err.to_string(), SEND_FAILED_NOTICE);
    }
}
