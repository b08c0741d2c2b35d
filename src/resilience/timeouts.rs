//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap a single login attempt with a deadline
//! - Turn an elapsed deadline into the caller's own error type
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;
use tokio::time::{error::Elapsed, timeout};

/// Run `fut` with a deadline, mapping expiry into `E`.
pub async fn deadline<F, T, E>(limit: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<Elapsed>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(elapsed) => Err(E::from(elapsed)),
    }
}
