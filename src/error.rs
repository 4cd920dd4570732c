//! API Errors
//!
//! Tagged failures surfaced by the API client and form submission.

use serde::Deserialize;
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent
    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build an HTTP error, preferring the server's `{ "message": ... }` body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        ApiError::Http { status, message }
    }

    /// Missing or rejected session
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}
