//! Final result of a login submission.

use serde::Serialize;

use crate::auth::classify::{classify, ErrorKind, CANCELLED_MESSAGE};
use crate::auth::response::{FieldError, LoginResult};
use crate::auth::transport::TransportError;
use crate::resilience::InvokeError;

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub display_name: Option<String>,
    pub message: String,
}

/// Classified failure, ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// Tagged result handed back to the caller. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success(Session),
    Failure(Failure),
}

impl Outcome {
    /// Build the outcome from what the invoker returned.
    pub fn from_result(result: Result<LoginResult, InvokeError<TransportError>>) -> Self {
        match result {
            Ok(LoginResult::Authenticated {
                token,
                display_name,
                message,
            }) => Outcome::Success(Session {
                token,
                display_name,
                message,
            }),
            Ok(LoginResult::Rejected { message }) => Outcome::Failure(Failure {
                kind: ErrorKind::LoginRejected,
                message,
                field_errors: Vec::new(),
            }),
            Ok(LoginResult::Invalid {
                message,
                field_errors,
            }) => Outcome::Failure(Failure {
                kind: ErrorKind::LoginRejected,
                message,
                field_errors,
            }),
            Err(InvokeError::Failed { error, .. }) => {
                let classified = classify(&error);
                Outcome::Failure(Failure {
                    kind: classified.kind,
                    message: classified.message,
                    field_errors: Vec::new(),
                })
            }
            Err(InvokeError::Cancelled { .. }) => Outcome::Failure(Failure {
                kind: ErrorKind::Cancelled,
                message: CANCELLED_MESSAGE.to_string(),
                field_errors: Vec::new(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Failure kind, `None` on success.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure.kind),
        }
    }

    /// Human-readable message for display.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(session) => &session.message,
            Outcome::Failure(failure) => &failure.message,
        }
    }
}
