//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resilience + auth produce:
//!     → logging.rs (structured log events, request ID on every line)
//!     → metrics.rs (attempt, retry and outcome counters)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID flows through every attempt of a submission
//! - Metrics are cheap facade calls; no exporter is bundled

pub mod logging;
pub mod metrics;
