//! Retry and backoff policy for the network stage.
//!
//! Encapsulates error classification (timeouts, throttling, connection
//! failures) and exponential backoff decisions so the install pipeline can
//! apply a consistent policy. Checksum mismatches never pass through here;
//! verification runs after the retry loop has returned.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
