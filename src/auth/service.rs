//! Login submission: client attempts run under the retry policy, then
//! classified into a single [`Outcome`].

use std::time::Instant;
use uuid::Uuid;

use crate::auth::client::{ClientError, LoginClient};
use crate::auth::credentials::Credentials;
use crate::auth::outcome::Outcome;
use crate::auth::transport::TransportError;
use crate::config::LoginConfig;
use crate::observability::metrics;
use crate::resilience::{CancelSignal, Invoker, PolicyError, RetryPolicy};

/// Errors building a [`LoginService`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid retry policy: {0}")]
    Policy(#[from] PolicyError),
}

/// Submits logins with retries and classifies the result.
///
/// Concurrent calls are independent: two overlapping `login` calls issue two
/// separate retry sequences. Preventing double submission is up to the caller.
#[derive(Debug, Clone)]
pub struct LoginService {
    client: LoginClient,
    policy: RetryPolicy,
}

impl LoginService {
    pub fn new(client: LoginClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Build client and policy from a validated configuration.
    pub fn from_config(config: &LoginConfig) -> Result<Self, ServiceError> {
        let client = LoginClient::new(&config.endpoint)?;
        let policy = RetryPolicy::try_from(&config.retries)?;
        Ok(Self::new(client, policy))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Submit `credentials`, retrying transport failures.
    pub async fn login(&self, credentials: &Credentials) -> Outcome {
        self.submit(credentials, Invoker::new(&self.policy)).await
    }

    /// Like [`login`](Self::login), but stops as soon as `cancel` fires.
    pub async fn login_until_cancelled(&self, credentials: &Credentials, cancel: &CancelSignal) -> Outcome {
        self.submit(credentials, Invoker::new(&self.policy).with_cancel(cancel)).await
    }

    async fn submit(&self, credentials: &Credentials, invoker: Invoker<'_>) -> Outcome {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        tracing::info!(
            request_id = %request_id,
            endpoint = %self.client.endpoint(),
            "Submitting login"
        );
        tracing::debug!(request_id = %request_id, email = %credentials.email, "Login account");

        let result = invoker
            .run(
                || self.client.attempt(credentials, request_id),
                |error: &TransportError| error.is_retryable(&self.policy),
            )
            .await;

        let attempts = match &result {
            Ok(_) => None,
            Err(e) => Some(e.attempts()),
        };
        let outcome = Outcome::from_result(result);

        match &outcome {
            Outcome::Success(session) => tracing::info!(
                request_id = %request_id,
                display_name = ?session.display_name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Login succeeded"
            ),
            Outcome::Failure(failure) => tracing::warn!(
                request_id = %request_id,
                kind = %failure.kind,
                attempts = ?attempts,
                elapsed_ms = start.elapsed().as_millis() as u64,
                message = %failure.message,
                "Login failed"
            ),
        }
        metrics::record_outcome(&outcome);

        outcome
    }
}
