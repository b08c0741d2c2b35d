//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick human-readable or JSON output
//! - Let `RUST_LOG` override the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for the configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("resilient_login={},reqwest=warn", config.log_level)
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(config).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}
