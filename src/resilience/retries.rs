//! Retry logic.
//!
//! # Responsibilities
//! - Hold the immutable retry policy (budget, initial interval, multiplier)
//! - Run an operation with bounded retries and exponential backoff
//! - Stop early on non-retryable errors or cancellation
//!
//! # Design Decisions
//! - Iterative loop with a monotonically increasing attempt counter
//! - Delays are recomputed from the formula each time, never accumulated
//! - No jitter unless the policy opts in
//! - Which HTTP statuses are terminal is a policy knob, empty by default

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::{apply_jitter, calculate_backoff};
use crate::resilience::cancel::CancelSignal;

/// Errors raised when constructing a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// The initial interval must be strictly positive.
    #[error("initial interval must be greater than zero")]
    ZeroInterval,

    /// The multiplier must be finite and at least 1.
    #[error("backoff multiplier must be a finite number >= 1, got {0}")]
    InvalidMultiplier(f64),

    /// The jitter ratio must lie in [0, 1].
    #[error("jitter ratio must be within [0, 1], got {0}")]
    InvalidJitter(f64),
}

/// Immutable retry configuration shared by any number of invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_interval: Duration,
    backoff_multiplier: f64,
    terminal_statuses: Vec<u16>,
    jitter_ratio: f64,
}

impl RetryPolicy {
    /// Create a policy with deterministic delays and every error retryable.
    pub fn new(
        max_retries: u32,
        initial_interval: Duration,
        backoff_multiplier: f64,
    ) -> Result<Self, PolicyError> {
        if initial_interval.is_zero() {
            return Err(PolicyError::ZeroInterval);
        }
        if !backoff_multiplier.is_finite() || backoff_multiplier < 1.0 {
            return Err(PolicyError::InvalidMultiplier(backoff_multiplier));
        }

        Ok(Self {
            max_retries,
            initial_interval,
            backoff_multiplier,
            terminal_statuses: Vec::new(),
            jitter_ratio: 0.0,
        })
    }

    /// HTTP statuses that end the sequence instead of being retried.
    pub fn with_terminal_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.terminal_statuses = statuses.into_iter().collect();
        self
    }

    /// Opt into randomised delays. Breaks delay determinism.
    pub fn with_jitter(mut self, ratio: f64) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(PolicyError::InvalidJitter(ratio));
        }
        self.jitter_ratio = ratio;
        Ok(self)
    }

    /// Number of attempts allowed after the first one.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Upper bound on total attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    pub fn jitter_ratio(&self) -> f64 {
        self.jitter_ratio
    }

    /// Whether a response with this status should end the sequence.
    pub fn is_terminal_status(&self, status: u16) -> bool {
        self.terminal_statuses.contains(&status)
    }

    /// Deterministic delay before retry `attempt + 1` (zero-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        calculate_backoff(self.initial_interval, self.backoff_multiplier, attempt)
    }

    /// Delay actually slept, including jitter when enabled.
    fn sleep_for(&self, attempt: u32) -> Duration {
        let delay = self.delay_for(attempt);
        if self.jitter_ratio > 0.0 {
            apply_jitter(delay, self.jitter_ratio)
        } else {
            delay
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval: Duration::from_millis(1000),
            backoff_multiplier: 1.5,
            terminal_statuses: Vec::new(),
            jitter_ratio: 0.0,
        }
    }
}

impl TryFrom<&RetryConfig> for RetryPolicy {
    type Error = PolicyError;

    fn try_from(config: &RetryConfig) -> Result<Self, Self::Error> {
        RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.initial_interval_ms),
            config.backoff_multiplier,
        )?
        .with_terminal_statuses(config.terminal_statuses.iter().copied())
        .with_jitter(config.jitter_ratio)
    }
}

/// Why an invocation ended without a value.
#[derive(Debug, Error)]
pub enum InvokeError<E> {
    /// The last attempt failed and no further attempt is allowed.
    #[error("{error} (after {attempts} attempt(s))")]
    Failed { attempts: u32, error: E },

    /// The cancel signal fired before the sequence finished.
    #[error("cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

impl<E> InvokeError<E> {
    /// Number of times the operation was called.
    pub fn attempts(&self) -> u32 {
        match self {
            InvokeError::Failed { attempts, .. } | InvokeError::Cancelled { attempts } => *attempts,
        }
    }

    /// The last-seen error, if the sequence was not cancelled.
    pub fn error(&self) -> Option<&E> {
        match self {
            InvokeError::Failed { error, .. } => Some(error),
            InvokeError::Cancelled { .. } => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            InvokeError::Failed { error, .. } => Some(error),
            InvokeError::Cancelled { .. } => None,
        }
    }
}

/// Runs an operation under a [`RetryPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct Invoker<'a> {
    policy: &'a RetryPolicy,
    cancel: Option<&'a CancelSignal>,
}

impl<'a> Invoker<'a> {
    pub fn new(policy: &'a RetryPolicy) -> Self {
        Self { policy, cancel: None }
    }

    /// Check `signal` before each attempt and during each backoff wait.
    pub fn with_cancel(mut self, signal: &'a CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelSignal::is_cancelled)
    }

    /// Call `operation` until it succeeds, `should_retry` refuses the error,
    /// the retry budget runs out, or the cancel signal fires.
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, should_retry: P) -> Result<T, InvokeError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt: u32 = 0;

        loop {
            if self.is_cancelled() {
                tracing::info!(attempts = attempt, "Retry sequence cancelled before attempt");
                return Err(InvokeError::Cancelled { attempts: attempt });
            }

            metrics::record_attempt();
            let error = match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::debug!(attempts = attempt + 1, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            let attempts = attempt + 1;
            if attempt >= self.policy.max_retries() {
                tracing::warn!(attempts, error = %error, "Retry budget exhausted");
                return Err(InvokeError::Failed { attempts, error });
            }
            if !should_retry(&error) {
                tracing::debug!(attempts, error = %error, "Error is not retryable");
                return Err(InvokeError::Failed { attempts, error });
            }

            let delay = self.policy.sleep_for(attempt);
            tracing::debug!(attempt = attempts, delay = ?delay, error = %error, "Backing off");

            match self.cancel {
                Some(signal) => {
                    tokio::select! {
                        biased;
                        _ = signal.cancelled() => {
                            tracing::info!(attempts, error = %error, "Retry sequence cancelled during backoff");
                            return Err(InvokeError::Cancelled { attempts });
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                None => tokio::time::sleep(delay).await,
            }

            // Only counted once the wait finished and the next attempt is certain.
            tracing::info!(attempt = attempts, delay = ?delay, error = %error, "Retrying request");
            metrics::record_retry();
            attempt += 1;
        }
    }
}

/// Call `operation` with retries, treating every error as transient.
pub async fn invoke<T, E, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, InvokeError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    Invoker::new(policy).run(operation, |_| true).await
}
