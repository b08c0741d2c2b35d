//! HTTP client for the authentication endpoint.
//!
//! # Responsibilities
//! - POST credentials as JSON to the configured endpoint
//! - Bound every attempt with the request timeout
//! - Report the response as an application result or a transport error

use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::auth::credentials::Credentials;
use crate::auth::response::{error_message, LoginResponse, LoginResult};
use crate::auth::transport::TransportError;
use crate::config::EndpointConfig;
use crate::resilience::timeouts::deadline;

/// Header carrying the submission ID, shared by every attempt of one login.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors building a [`LoginClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Performs single login attempts against one endpoint.
#[derive(Clone)]
pub struct LoginClient {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl LoginClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.url).map_err(|source| ClientError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        tracing::debug!(
            endpoint = %endpoint,
            request_timeout_ms = config.request_timeout_ms,
            "Login client initialized"
        );

        Ok(Self {
            client,
            endpoint,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Perform one login attempt.
    ///
    /// A completed request always yields `Ok`, even when the server refused
    /// the credentials in its body. Only non-success statuses, timeouts and
    /// connection problems are errors.
    pub async fn attempt(
        &self,
        credentials: &Credentials,
        request_id: Uuid,
    ) -> Result<LoginResult, TransportError> {
        deadline(self.request_timeout, self.send(credentials, request_id)).await
    }

    async fn send(
        &self,
        credentials: &Credentials,
        request_id: Uuid,
    ) -> Result<LoginResult, TransportError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(credentials)
            .send()
            .await?;

        let status = resp.status();

        if !status.is_success() {
            // The status alone classifies the failure; the body is best-effort.
            let message = resp.text().await.ok().and_then(|text| error_message(&text));
            tracing::debug!(request_id = %request_id, status = %status, "Login endpoint returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let body: LoginResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::Malformed(e.to_string()))?;
        Ok(body.into())
    }
}

impl std::fmt::Debug for LoginClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
