//! Network stage error type for retry classification.

/// Error from one download or probe attempt (curl failure, HTTP error, or
/// staging write failure). Classified before deciding whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),

    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),

    /// Transfer ended with fewer bytes than Content-Length announced
    /// (e.g. server closed early). Retryable instead of silent truncation.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },

    /// Staging file write failed (disk full, permissions). Not retried.
    #[error("staging write: {0}")]
    Storage(#[from] std::io::Error),
}
