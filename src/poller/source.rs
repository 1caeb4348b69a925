//! Sample source trait
//!
//! Defines the interface the controller polls for readings.

use crate::sample::Reading;
use async_trait::async_trait;

#[derive(Debug)]
pub enum FetchError {
    /// Endpoint unreachable, timed out, or answered with a non-2xx status
    Transport(String),
    /// Body was not `{amplitude: number, feedback: string}`
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Transport error: {}", e),
            FetchError::Decode(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Operator-facing message; both variants collapse into one
    pub fn operator_message(&self) -> &'static str {
        "Failed to fetch EEG data. Make sure the backend is running."
    }
}

/// Something the controller can poll for one reading per tick
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch a single reading
    async fn fetch(&self) -> Result<Reading, FetchError>;

    /// Get source type for logging
    fn source_type(&self) -> &'static str;
}
