//! Login response payloads.
//!
//! The wire shape is what the authentication endpoint returns; `LoginResult`
//! is the application-level reading of it. Neither is a transport failure, so
//! nothing here is ever retried.

use serde::{Deserialize, Serialize};

const DEFAULT_SUCCESS_MESSAGE: &str = "Login successful";
const DEFAULT_REJECTION_MESSAGE: &str = "Login failed";
const MISSING_TOKEN_MESSAGE: &str = "Invalid response from server";

/// Validation error attached to a specific form field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// JSON body returned by the authentication endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: Option<String>,
    pub jwt_token: Option<String>,
    pub name: Option<String>,
    #[serde(alias = "errors")]
    pub field_errors: Vec<FieldError>,
}

/// Application-level result of a completed login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    /// Credentials accepted; a token was issued.
    Authenticated {
        token: String,
        display_name: Option<String>,
        message: String,
    },
    /// Credentials rejected by server logic.
    Rejected { message: String },
    /// Request rejected with errors tied to specific fields.
    Invalid {
        message: String,
        field_errors: Vec<FieldError>,
    },
}

impl From<LoginResponse> for LoginResult {
    fn from(resp: LoginResponse) -> Self {
        match resp {
            LoginResponse {
                success: true,
                jwt_token: Some(token),
                message,
                name,
                ..
            } => LoginResult::Authenticated {
                token,
                display_name: name,
                message: message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            },
            LoginResponse { success: true, .. } => LoginResult::Rejected {
                message: MISSING_TOKEN_MESSAGE.to_string(),
            },
            LoginResponse {
                message,
                field_errors,
                ..
            } if !field_errors.is_empty() => LoginResult::Invalid {
                message: message.unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
                field_errors,
            },
            LoginResponse { message, .. } => LoginResult::Rejected {
                message: message.unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
            },
        }
    }
}

/// Pull the `message` field out of an error body, if it is JSON and has one.
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> LoginResult {
        serde_json::from_str::<LoginResponse>(body).unwrap().into()
    }

    #[test]
    fn test_authenticated() {
        let result = parse(r#"{"success":true,"message":"Welcome","jwtToken":"abc","name":"Ada"}"#);
        assert_eq!(
            result,
            LoginResult::Authenticated {
                token: "abc".into(),
                display_name: Some("Ada".into()),
                message: "Welcome".into(),
            }
        );
    }

    #[test]
    fn test_authenticated_default_message() {
        match parse(r#"{"success":true,"jwtToken":"abc"}"#) {
            LoginResult::Authenticated { message, display_name, .. } => {
                assert_eq!(message, "Login successful");
                assert_eq!(display_name, None);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_success_without_token_is_rejected() {
        assert_eq!(
            parse(r#"{"success":true,"message":"ok"}"#),
            LoginResult::Rejected { message: "Invalid response from server".into() }
        );
    }

    #[test]
    fn test_rejected() {
        assert_eq!(
            parse(r#"{"success":false,"message":"Invalid credentials"}"#),
            LoginResult::Rejected { message: "Invalid credentials".into() }
        );
        assert_eq!(
            parse("{}"),
            LoginResult::Rejected { message: "Login failed".into() }
        );
    }

    #[test]
    fn test_field_errors() {
        let result = parse(
            r#"{"success":false,"message":"Bad request","errors":[{"field":"email","message":"must be a valid email"}]}"#,
        );
        assert_eq!(
            result,
            LoginResult::Invalid {
                message: "Bad request".into(),
                field_errors: vec![FieldError {
                    field: "email".into(),
                    message: "must be a valid email".into(),
                }],
            }
        );

        let result = parse(r#"{"fieldErrors":[{"field":"password","message":"required"}]}"#);
        assert!(matches!(result, LoginResult::Invalid { ref field_errors, .. } if field_errors.len() == 1));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message":"Too many"}"#), Some("Too many".into()));
        assert_eq!(error_message(r#"{"message":42}"#), None);
        assert_eq!(error_message("<html>oops</html>"), None);
    }
}
