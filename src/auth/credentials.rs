//! Login credentials.

use serde::Serialize;

/// Email/password pair sent as the login request body.
///
/// Held only for the duration of a submission. `Debug` never prints the
/// password.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are present once surrounding whitespace is ignored.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
