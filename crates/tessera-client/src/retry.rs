//! Bounded exponential-backoff retry for transient network failures.
//!
//! Only transport errors are retried here; integrity, authorization, and
//! version-conflict failures surface to the caller immediately (the core
//! cannot know the caller's new intended value, so conflict retry belongs
//! in the caller's read-modify-write loop).

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::transport::TransportError;

/// Retry policy: a bounded number of attempts with doubling delays.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Retry attempts after the initial one.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Run `op` until it succeeds or the attempt budget is exhausted,
    /// sleeping `base_delay * 2^n` between attempts. Returns the last
    /// error when every attempt fails.
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> Result<T, TransportError>,
    ) -> Result<T, TransportError> {
        let mut delay = self.base_delay;
        let mut attempt = 0u32;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!(attempt, ?delay, error = %err, "retrying after transport failure");
                    thread::sleep(delay);
                    delay = delay.saturating_mul(2);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1))
    }

    #[test]
    fn first_success_needs_no_retry() {
        let calls = AtomicU32::new(0);
        let result = policy().run(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transient_failure_is_retried() {
        let calls = AtomicU32::new(0);
        let result = policy().run(|| {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(TransportError::Unavailable("flaky".into()))
            } else {
                Ok("reached")
            }
        });
        assert_eq!(result.unwrap(), "reached");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn budget_is_bounded() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = policy().run(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Unavailable("down".into()))
        });
        assert!(result.is_err());
        // Initial attempt + 3 retries.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
