//! Mock authenticator.
//!
//! There is no credential store: any well-formed login succeeds after a
//! simulated round trip. This stands in for a real identity provider.

use crate::user::{User, UserId};
use crate::AuthError;
use boutique_commerce::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Default simulated latency.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Id given to every mock login.
pub const DEMO_USER_ID: &str = "user-1";

/// Phone number given to every mock login.
pub const DEMO_PHONE: &str = "+52 55 1234 5678";

/// Login form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginField {
    Email,
    Password,
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginField::Email => write!(f, "email"),
            LoginField::Password => write!(f, "password"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Pre-submit checks shown next to the inputs.
    pub fn validate(&self) -> Result<(), FieldErrors<LoginField>> {
        let mut errors = FieldErrors::new();
        errors.require(LoginField::Email, &self.email, "Email is required");
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(LoginField::Password, password_too_short());
        }
        errors.into_result()
    }
}

/// Signup form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupField {
    Name,
    Email,
    Password,
    Confirmation,
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignupField::Name => "name",
            SignupField::Email => "email",
            SignupField::Password => "password",
            SignupField::Confirmation => "confirmation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors<SignupField>> {
        let mut errors = FieldErrors::new();
        errors.require(SignupField::Name, &self.name, "Name is required");
        errors.require(SignupField::Email, &self.email, "Email is required");
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(SignupField::Password, password_too_short());
        }
        if self.password != self.confirm_password {
            errors.add(SignupField::Confirmation, "Passwords do not match");
        }
        errors.into_result()
    }
}

fn password_too_short() -> String {
    format!("Password must be at least {} characters", MIN_PASSWORD_LEN)
}

/// Simulated identity provider.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    latency: Duration,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl MockAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// No simulated delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Accept any non-blank email with a long-enough password.
    ///
    /// The returned user is always `user-1`, named after the email's local
    /// part, with the demo phone number.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_round_trip().await;

        let email = email.trim();
        if email.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            debug!("mock login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email);
        let mut user = User::new(UserId::new(DEMO_USER_ID), email, name);
        user.phone = Some(DEMO_PHONE.to_string());
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Validate the form and mint a new user id from the current time.
    pub async fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        form.validate().map_err(AuthError::Validation)?;
        self.simulate_round_trip().await;

        let id = UserId::new(format!("user-{}", chrono::Utc::now().timestamp_millis()));
        let user = User::new(id, form.email.trim(), form.name.trim());
        info!(user = %user.id, "account created");
        Ok(user)
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_form() -> SignupForm {
        SignupForm {
            name: "Ana López".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_succeeds() {
        let auth = MockAuthenticator::instant();
        let user = auth.login("ana@example.com", "secret").await.unwrap();
        assert_eq!(user.id.as_str(), DEMO_USER_ID);
        assert_eq!(user.name, "ana");
        assert_eq!(user.phone.as_deref(), Some(DEMO_PHONE));
    }

    #[tokio::test]
    async fn test_login_short_password_is_generic_failure() {
        let auth = MockAuthenticator::instant();
        let err = auth.login("ana@example.com", "12345").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_login_blank_email_fails() {
        let auth = MockAuthenticator::instant();
        assert!(auth.login("  ", "secret").await.is_err());
    }

    #[tokio::test]
    async fn test_login_waits_for_latency() {
        let auth = MockAuthenticator::new(Duration::from_millis(50));
        let start = std::time::Instant::now();
        auth.login("ana@example.com", "secret").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_signup() {
        let auth = MockAuthenticator::instant();
        let user = auth.signup(&signup_form()).await.unwrap();
        assert!(user.id.as_str().starts_with("user-"));
        assert_eq!(user.name, "Ana López");
        assert_eq!(user.phone, None);
    }

    #[tokio::test]
    async fn test_signup_mismatched_confirmation() {
        let auth = MockAuthenticator::instant();
        let mut form = signup_form();
        form.confirm_password = "different".to_string();

        match auth.signup(&form).await {
            Err(AuthError::Validation(errors)) => {
                assert_eq!(
                    errors.get(SignupField::Confirmation),
                    Some("Passwords do not match")
                );
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_login_form_validation() {
        let errors = LoginForm::new("", "123").validate().unwrap_err();
        assert!(errors.contains(LoginField::Email));
        assert!(errors.contains(LoginField::Password));
        assert!(LoginForm::new("a@b.co", "123456").validate().is_ok());
    }
}
