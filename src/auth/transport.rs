//! Transport-layer failures of a single login attempt.

use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::resilience::RetryPolicy;

/// Closed set of ways one attempt can fail below the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The attempt did not finish within the request timeout.
    #[error("request timed out")]
    TimedOut,

    /// A response arrived with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        /// `message` field of the JSON body, when there was one.
        message: Option<String>,
    },

    /// No response was received (connection refused, DNS, reset).
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// A success response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Anything else, e.g. a request that could not be built.
    #[error("unexpected error: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether the invoker may try again after this error.
    pub fn is_retryable(&self, policy: &RetryPolicy) -> bool {
        match self {
            TransportError::Status { status, .. } => !policy.is_terminal_status(*status),
            _ => true,
        }
    }
}

impl From<Elapsed> for TransportError {
    fn from(_: Elapsed) -> Self {
        TransportError::TimedOut
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::TimedOut
        } else if e.is_connect() || e.is_request() {
            TransportError::NoResponse(e.to_string())
        } else if e.is_decode() || e.is_body() {
            TransportError::Malformed(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}
