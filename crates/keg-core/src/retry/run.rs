//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(attempt, delay_ms = d.as_millis() as u64, error = %e, "retrying fetch");
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn returns_value_on_success() {
        let got: Result<u32, _> = run_with_retry(&fast_policy(), || Ok(7));
        assert_eq!(got.unwrap(), 7);
    }

    #[test]
    fn retries_retryable_until_exhausted() {
        let mut calls = 0u32;
        let got: Result<(), _> = run_with_retry(&fast_policy(), || {
            calls += 1;
            Err(FetchError::Http(503))
        });
        assert!(matches!(got, Err(FetchError::Http(503))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn does_not_retry_fatal() {
        let mut calls = 0u32;
        let got: Result<(), _> = run_with_retry(&fast_policy(), || {
            calls += 1;
            Err(FetchError::Http(404))
        });
        assert!(got.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let mut calls = 0u32;
        let got = run_with_retry(&fast_policy(), || {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Http(502))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(got.unwrap(), 3);
    }
}
