//! Response handling and relay failures.
//!
//! # Responsibilities
//! - Relay the origin's status and JSON body unchanged
//! - Map every relay failure to the fixed internal-error envelope
//!
//! # Design Decisions
//! - Status codes from the origin are never translated
//! - All relay failures share one status (500) and one envelope shape;
//!   the `error` field carries the diagnostic text

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// User-facing text placed in the `message` field of the error envelope.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error occurred.";

/// Anything that stops a request from being relayed end to end.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid destination '{url}': {reason}")]
    InvalidRequest { url: String, reason: String },

    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("origin request failed: {0}")]
    Upstream(String),

    #[error("origin response exceeds {0} bytes")]
    ResponseTooLarge(usize),

    #[error("origin did not respond within {0} seconds")]
    Timeout(u64),

    #[error("origin response is not valid JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

impl RelayError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::InvalidRequest { .. } => "invalid_request",
            RelayError::BodyTooLarge(_) => "body_too_large",
            RelayError::InvalidBody(_) => "invalid_body",
            RelayError::Upstream(_) => "upstream",
            RelayError::ResponseTooLarge(_) => "response_too_large",
            RelayError::Timeout(_) => "timeout",
            RelayError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Body returned to the caller when a relay fails.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: &'static str,
    pub error: String,
}

impl From<&RelayError> for ErrorEnvelope {
    fn from(err: &RelayError) -> Self {
        Self {
            status: "error",
            message: INTERNAL_ERROR_MESSAGE,
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::from(&self))).into_response()
    }
}

/// A successfully relayed origin response.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
