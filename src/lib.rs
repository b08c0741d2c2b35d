//! Resilient login client library.
//!
//! Wraps a single login request in bounded retries with exponential backoff
//! and turns the final result into one user-facing [`Outcome`].

pub mod auth;
pub mod config;
pub mod observability;
pub mod resilience;

pub use auth::{classify, Credentials, ErrorKind, LoginService, Outcome};
pub use config::LoginConfig;
pub use resilience::{invoke, CancelSignal, RetryPolicy};
