//! Exponential backoff with optional jitter.

use std::time::Duration;
use rand::Rng;

/// Calculate the exponential backoff delay before retry number `attempt + 1`.
///
/// `attempt` is zero-indexed from the first retry, so `attempt = 0` yields
/// `initial` unchanged. The result saturates at `Duration::MAX` rather than
/// panicking when the product overflows.
pub fn calculate_backoff(initial: Duration, multiplier: f64, attempt: u32) -> Duration {
    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let nanos = initial.as_nanos() as f64 * multiplier.powi(exponent);
    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Duration::MAX;
    }
    Duration::from_nanos(nanos.round() as u64)
}

/// Add a random extra of up to `ratio * delay` to `delay`.
///
/// A ratio of zero returns `delay` untouched.
pub fn apply_jitter(delay: Duration, ratio: f64) -> Duration {
    let jitter_range = delay.as_millis().min(u64::MAX as u128) as u64;
    let jitter_range = (jitter_range as f64 * ratio) as u64;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    delay.saturating_add(Duration::from_millis(jitter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let initial = Duration::from_millis(1000);

        assert_eq!(calculate_backoff(initial, 1.5, 0), Duration::from_millis(1000));
        assert_eq!(calculate_backoff(initial, 1.5, 1), Duration::from_millis(1500));
        assert_eq!(calculate_backoff(initial, 1.5, 2), Duration::from_millis(2250));
    }

    #[test]
    fn test_backoff_constant_multiplier() {
        let initial = Duration::from_millis(250);
        for attempt in 0..5 {
            assert_eq!(calculate_backoff(initial, 1.0, attempt), initial);
        }
    }

    #[test]
    fn test_backoff_saturates() {
        let delay = calculate_backoff(Duration::from_secs(1), 10.0, 400);
        assert_eq!(delay, Duration::MAX);
    }

    #[test]
    fn test_jitter_bounds() {
        let delay = Duration::from_millis(1000);
        assert_eq!(apply_jitter(delay, 0.0), delay);

        for _ in 0..50 {
            let jittered = apply_jitter(delay, 0.1);
            assert!(jittered >= delay);
            assert!(jittered < Duration::from_millis(1100));
        }
    }
}
