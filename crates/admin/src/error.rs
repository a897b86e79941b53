//! Errors produced by the request coordinator.

use thiserror::Error;

/// Errors that can occur when talking to the store API.
///
/// `Clone` because a single outcome is handed to every caller that joined
/// the same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The API answered with a non-success status code.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Transport-level failure (DNS, connection refused, TLS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not valid JSON, or lacked an expected field.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request could not be built (bad header name/value or URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Status code for `Http` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404 })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
