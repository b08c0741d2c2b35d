//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the login
//! client. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the login client.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoginConfig {
    /// Authentication endpoint and per-attempt timeouts.
    pub endpoint: EndpointConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Authentication endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Full URL of the login endpoint.
    pub url: String,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Total time allowed for one attempt in milliseconds.
    pub request_timeout_ms: u64,

    /// Honour HTTP(S)_PROXY environment variables.
    pub use_system_proxy: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "https://export-ease-api.vercel.app/auth/login".to_string(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 10_000,
            use_system_proxy: true,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts allowed after the first one.
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds.
    pub initial_interval_ms: u64,

    /// Factor applied to the delay after each retry.
    pub backoff_multiplier: f64,

    /// HTTP statuses that fail immediately instead of being retried.
    pub terminal_statuses: Vec<u16>,

    /// Random extra delay as a fraction of the computed delay (0 disables).
    pub jitter_ratio: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval_ms: 1000,
            backoff_multiplier: 1.5,
            terminal_statuses: Vec::new(),
            jitter_ratio: 0.0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable lines.
    pub json_logs: bool,

    /// Record attempt/retry/outcome counters.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
        }
    }
}
