//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Login submission:
//!     → retries.rs (Invoker: bounded attempts, backoff between them)
//!         → timeouts.rs (deadline around each attempt)
//!         → backoff.rs (delay before the next attempt)
//!         → cancel.rs (checked before each attempt and during each wait)
//! ```
//!
//! # Design Decisions
//! - Every attempt has a deadline
//! - Policy is immutable and shared by reference
//! - Attempts are strictly sequential within one invocation
//! - No deduplication across concurrent invocations

pub mod backoff;
pub mod cancel;
pub mod retries;
pub mod timeouts;

pub use cancel::CancelSignal;
pub use retries::{invoke, InvokeError, Invoker, PolicyError, RetryPolicy};
