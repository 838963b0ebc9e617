//! HTTP client error types.

use boutique_commerce::checkout::GatewayError;
use thiserror::Error;

/// Errors that can occur when invoking a backend function.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for GatewayError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Http { status, message } => GatewayError::Rejected { status, message },
            FetchError::Timeout => GatewayError::Timeout,
            FetchError::RequestError(msg) | FetchError::InvalidUrl(msg) => {
                GatewayError::Unavailable(msg)
            }
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => {
                GatewayError::InvalidResponse(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_mapping() {
        let rejected: GatewayError = FetchError::Http {
            status: 422,
            message: "cart empty".to_string(),
        }
        .into();
        assert_eq!(
            rejected,
            GatewayError::Rejected {
                status: 422,
                message: "cart empty".to_string()
            }
        );

        assert_eq!(GatewayError::from(FetchError::Timeout), GatewayError::Timeout);
        assert!(matches!(
            GatewayError::from(FetchError::ParseError("eof".to_string())),
            GatewayError::InvalidResponse(_)
        ));
        assert!(matches!(
            GatewayError::from(FetchError::RequestError("refused".to_string())),
            GatewayError::Unavailable(_)
        ));
    }
}
