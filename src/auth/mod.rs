//! Login subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials
//!     → service.rs (one submission, one request ID)
//!         → resilience::Invoker (retries transport failures)
//!             → client.rs (POST JSON, deadline per attempt)
//!             → response.rs (body → LoginResult)
//!     → classify.rs (final TransportError → kind + message)
//!     → outcome.rs (Success | Failure)
//! ```
//!
//! # Security Constraints
//! - Passwords never appear in logs or Debug output
//! - Server rejections are terminal, never retried

pub mod classify;
pub mod client;
pub mod credentials;
pub mod outcome;
pub mod response;
pub mod service;
pub mod transport;

pub use classify::{classify, Classified, ErrorKind};
pub use client::LoginClient;
pub use credentials::Credentials;
pub use outcome::{Failure, Outcome, Session};
pub use response::{FieldError, LoginResult};
pub use service::LoginService;
pub use transport::TransportError;
