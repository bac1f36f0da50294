use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong between a form submission and a rendered
/// report. The `Display` strings are the exact user-facing messages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Raw form values failed re-validation; detected before any network
    /// call is made.
    #[error("Invalid input data.")]
    InvalidInput,

    /// The backend could not be reached at all (DNS failure, connection
    /// refused, dropped connection). The underlying error is logged for
    /// operators; the user only sees the generic message.
    #[error("Failed to connect to the weather data service. Please ensure it is running and try again.")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status; its body is surfaced
    /// verbatim for diagnostic value.
    #[error("Failed to fetch weather data from backend. Server responded with: {body}")]
    Backend { status: StatusCode, body: String },

    /// A 2xx response whose body could not be parsed as the expected JSON
    /// shape. Folded into the backend-failure message form with a generic
    /// body description.
    #[error("Failed to fetch weather data from backend. Server responded with: an unreadable response body")]
    Malformed(#[source] serde_json::Error),
}

/// Tagged error alternative returned instead of `WeatherData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResult {
    pub error: String,
}

impl From<FetchError> for FailureResult {
    fn from(err: FetchError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl std::fmt::Display for FailureResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error)
    }
}
