//! Failure-aware cycle pacing

use std::time::Duration;
use trustlens_core::BackoffConfig;

/// Deterministic exponential backoff between cycles
///
/// The delay is `base * 2^max(0, failures - 1)` capped at `cap`: zero and
/// one failures both yield the base delay, so the first retry after a
/// success stays fast while repeated failures settle at the cap. No
/// jitter.
///
/// # Example
///
/// ```
/// use trustlens_agent::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::default();
///
/// assert_eq!(policy.delay_for(0), Duration::from_millis(2000));
/// assert_eq!(policy.delay_for(3), Duration::from_millis(8000));
/// assert_eq!(policy.delay_for(10), Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    base: Duration,
    cap: Duration,
}

impl BackoffPolicy {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }

    pub fn from_config(config: &BackoffConfig) -> Self {
        Self::new(
            Duration::from_millis(config.base_ms),
            Duration::from_millis(config.cap_ms),
        )
    }

    /// Delay before the next cycle given the consecutive-failure count
    pub fn delay_for(&self, consecutive_failures: u32) -> Duration {
        let mut delay = self.base;
        for _ in 1..consecutive_failures {
            delay = delay.saturating_mul(2);
            if delay >= self.cap {
                break;
            }
        }
        delay.min(self.cap)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        // 2 second floor, 10 second ceiling
        Self::new(Duration::from_millis(2000), Duration::from_millis(10000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_table() {
        let policy = BackoffPolicy::default();

        assert_eq!(policy.delay_for(0), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(8000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(10000));
        assert_eq!(policy.delay_for(10), Duration::from_millis(10000));
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(10000));
    }

    #[test]
    fn test_from_config_defaults() {
        let policy = BackoffPolicy::from_config(&BackoffConfig::default());
        assert_eq!(policy.delay_for(0), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(6), Duration::from_millis(10000));
    }
}
