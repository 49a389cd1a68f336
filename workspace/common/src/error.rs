use thiserror::Error;
use tracing::warn;

use crate::ErrorBody;

/// Message shown when no server-supplied reason is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch prediction";

/// Message shown when the request outlives the configured timeout.
pub const TIMEOUT_ERROR_MESSAGE: &str = "Prediction request timed out";

/// Ways a prediction request can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Non-2xx response, optionally carrying the service's `error` field
    #[error("HTTP error {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server { status: u16, message: Option<String> },

    /// The request never completed (connection refused, DNS failure, ...)
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body is not a prediction
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// No response within the configured bound
    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
}

impl PredictionError {
    /// Build a server error from a non-2xx status and its raw body.
    ///
    /// The `error` field is only used when the body is a JSON object holding a
    /// non-empty string there.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty());

        if message.is_none() {
            warn!(status, "Error response without a usable error field");
        }

        PredictionError::Server { status, message }
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            PredictionError::Timeout { .. } => TIMEOUT_ERROR_MESSAGE.to_string(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}
