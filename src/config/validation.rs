//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the endpoint URL and its scheme
//! - Validate value ranges (timeouts > 0, multiplier >= 1, jitter in [0, 1])
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoginConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::LoginConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("endpoint.url '{0}' is not a valid URL")]
    InvalidUrl(String),

    #[error("endpoint.url scheme must be http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("retries.backoff_multiplier must be a finite number >= 1, got {0}")]
    InvalidMultiplier(f64),

    #[error("retries.jitter_ratio must be within [0, 1], got {0}")]
    InvalidJitter(f64),

    #[error("retries.terminal_statuses contains {0}, which is not an HTTP status")]
    InvalidStatus(u16),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &LoginConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.endpoint.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string())),
        Err(_) => errors.push(ValidationError::InvalidUrl(config.endpoint.url.clone())),
    }

    if config.endpoint.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroValue("endpoint.connect_timeout_ms"));
    }
    if config.endpoint.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroValue("endpoint.request_timeout_ms"));
    }

    let retries = &config.retries;
    if retries.initial_interval_ms == 0 {
        errors.push(ValidationError::ZeroValue("retries.initial_interval_ms"));
    }
    if !retries.backoff_multiplier.is_finite() || retries.backoff_multiplier < 1.0 {
        errors.push(ValidationError::InvalidMultiplier(retries.backoff_multiplier));
    }
    if !(0.0..=1.0).contains(&retries.jitter_ratio) {
        errors.push(ValidationError::InvalidJitter(retries.jitter_ratio));
    }
    for status in &retries.terminal_statuses {
        if !(100..=599).contains(status) {
            errors.push(ValidationError::InvalidStatus(*status));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&LoginConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = LoginConfig::default();
        config.endpoint.url = "ftp://example.com/login".into();
        config.endpoint.request_timeout_ms = 0;
        config.retries.initial_interval_ms = 0;
        config.retries.backoff_multiplier = 0.5;
        config.retries.jitter_ratio = -0.1;
        config.retries.terminal_statuses = vec![500, 42];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnsupportedScheme("ftp".into()),
                ValidationError::ZeroValue("endpoint.request_timeout_ms"),
                ValidationError::ZeroValue("retries.initial_interval_ms"),
                ValidationError::InvalidMultiplier(0.5),
                ValidationError::InvalidJitter(-0.1),
                ValidationError::InvalidStatus(42),
            ]
        );
    }

    #[test]
    fn test_unparsable_url() {
        let mut config = LoginConfig::default();
        config.endpoint.url = "::nope".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidUrl("::nope".into())]);
    }
}
