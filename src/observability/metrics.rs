//! Metrics collection.
//!
//! # Metrics
//! - `login_attempts_total` (counter): every call to the login endpoint
//! - `login_retries_total` (counter): backoff waits started
//! - `login_outcomes_total` (counter): final outcomes by `kind`
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! embedding application installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::Outcome;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_attempt() {
    if enabled() {
        metrics::counter!("login_attempts_total").increment(1);
    }
}

pub fn record_retry() {
    if enabled() {
        metrics::counter!("login_retries_total").increment(1);
    }
}

pub fn record_outcome(outcome: &Outcome) {
    if !enabled() {
        return;
    }
    let kind = outcome.kind().map_or("success", |k| k.as_str());
    metrics::counter!("login_outcomes_total", "kind" => kind).increment(1);
}

/// In-memory recorder for asserting on counters in tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};

    #[derive(Default)]
    pub struct CountingRecorder {
        counters: Mutex<HashMap<String, Arc<AtomicU64>>>,
    }

    impl CountingRecorder {
        /// Sum of every counter named `name`, across label sets.
        pub fn count(&self, name: &str) -> u64 {
            self.counters
                .lock()
                .unwrap()
                .iter()
                .filter(|(key, _)| key.split('{').next() == Some(name))
                .map(|(_, value)| value.load(Ordering::SeqCst))
                .sum()
        }
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let labels: Vec<String> = key
                .labels()
                .map(|l| format!("{}={}", l.key(), l.value()))
                .collect();
            let id = if labels.is_empty() {
                key.name().to_string()
            } else {
                format!("{}{{{}}}", key.name(), labels.join(","))
            };
            let counter = self.counters.lock().unwrap().entry(id).or_default().clone();
            Counter::from_arc(counter)
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    /// Run `fut` to completion on a paused current-thread runtime with
    /// `recorder` installed for this thread.
    pub fn block_on_recorded<F: std::future::Future>(recorder: &CountingRecorder, fut: F) -> F::Output {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap();
        metrics::with_local_recorder(recorder, || runtime.block_on(fut))
    }
}
