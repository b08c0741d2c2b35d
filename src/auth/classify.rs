//! Outcome classification.
//!
//! Maps a final transport failure to a user-facing category and message.
//!
//! # Rules (first match wins)
//! 1. Timed out → `Timeout`
//! 2. Recognized HTTP status → table below
//! 3. Other status → `ServerError`, body `message` or "Login failed"
//! 4. No response → `NetworkUnreachable`
//! 5. Anything else → `Unknown`
//!
//! | Status | Kind |
//! |--------|------|
//! | 401 | `InvalidCredentials` |
//! | 404 | `EndpointNotFound` |
//! | 500 | `ServerError` |
//! | 503 | `ServiceUnavailable` |
//! | 504 | `ServerTimeout` |

use serde::Serialize;

use crate::auth::transport::TransportError;

/// Category of a failed login, used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    InvalidCredentials,
    EndpointNotFound,
    ServerError,
    ServiceUnavailable,
    ServerTimeout,
    NetworkUnreachable,
    Unknown,
    /// Transport succeeded but the server refused the login.
    LoginRejected,
    /// The caller cancelled the submission.
    Cancelled,
}

impl ErrorKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::EndpointNotFound => "endpoint_not_found",
            ErrorKind::ServerError => "server_error",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::ServerTimeout => "server_timeout",
            ErrorKind::NetworkUnreachable => "network_unreachable",
            ErrorKind::Unknown => "unknown",
            ErrorKind::LoginRejected => "login_rejected",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind plus the message shown verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classified {
    pub kind: ErrorKind,
    pub message: String,
}

impl Classified {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your internet connection.";
pub const UNKNOWN_MESSAGE: &str = "An unexpected error occurred";
pub const FALLBACK_STATUS_MESSAGE: &str = "Login failed";
pub const CANCELLED_MESSAGE: &str = "Login cancelled";

/// Kind and message for the statuses that have a fixed mapping.
fn known_status(status: u16) -> Option<(ErrorKind, &'static str)> {
    match status {
        401 => Some((ErrorKind::InvalidCredentials, "Invalid credentials")),
        404 => Some((ErrorKind::EndpointNotFound, "Service not found")),
        500 => Some((ErrorKind::ServerError, "Internal server error. Please try again later.")),
        503 => Some((ErrorKind::ServiceUnavailable, "Service temporarily unavailable")),
        504 => Some((ErrorKind::ServerTimeout, "Server timeout. Please try again.")),
        _ => None,
    }
}

/// Classify a transport failure. Pure: equal inputs give equal outputs.
pub fn classify(error: &TransportError) -> Classified {
    match error {
        TransportError::TimedOut => Classified::new(ErrorKind::Timeout, TIMEOUT_MESSAGE),
        TransportError::Status { status, message } => match known_status(*status) {
            Some((kind, text)) => Classified::new(kind, text),
            None => Classified::new(
                ErrorKind::ServerError,
                message.as_deref().unwrap_or(FALLBACK_STATUS_MESSAGE),
            ),
        },
        TransportError::NoResponse(_) => {
            Classified::new(ErrorKind::NetworkUnreachable, NO_RESPONSE_MESSAGE)
        }
        TransportError::Malformed(_) | TransportError::Other(_) => {
            Classified::new(ErrorKind::Unknown, UNKNOWN_MESSAGE)
        }
    }
}
