//! Cancellation signal for in-flight retry sequences.

use std::sync::Arc;
use tokio::sync::watch;

/// Coordinator for cancelling a login submission.
///
/// Cloned handles share the same state. Once triggered the signal stays
/// triggered, so late observers still see it.
#[derive(Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    /// Create a new, untriggered signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Trigger cancellation.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether cancellation has been triggered.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until cancellation is triggered.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns once triggered.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
