//! Single-stream HTTP GET into the staging file.

use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use crate::storage::StagingFile;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Downloads `url` with a single GET, appending the body to `staging`.
/// Returns the number of bytes written.
///
/// When `expected_len` is known (from the probe), a shorter transfer fails
/// with `PartialTransfer` so truncation can't masquerade as success.
pub fn download(
    url: &str,
    staging: &StagingFile,
    expected_len: Option<u64>,
) -> Result<u64, FetchError> {
    let written = Arc::new(AtomicU64::new(0));
    let written_cb = Arc::clone(&written);
    // A staging write failure aborts the transfer from inside the callback;
    // stash the io::Error so it wins over the generic curl write error.
    let write_failure: Arc<Mutex<Option<std::io::Error>>> = Arc::new(Mutex::new(None));
    let write_failure_cb = Arc::clone(&write_failure);
    let staging = staging.clone();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.timeout(Duration::from_secs(3600))?;
    easy.fail_on_error(false)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(move |data| {
            match staging.append(data) {
                Ok(()) => {
                    written_cb.fetch_add(data.len() as u64, Ordering::Relaxed);
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("staging write failed: {}", e);
                    *write_failure_cb.lock().expect("write_failure lock") = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        if let Err(e) = transfer.perform() {
            if let Some(io_err) = write_failure.lock().expect("write_failure lock").take() {
                return Err(FetchError::Storage(io_err));
            }
            return Err(FetchError::Curl(e));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let written = written.load(Ordering::Relaxed);
    if let Some(exp) = expected_len {
        if written != exp {
            return Err(FetchError::PartialTransfer {
                expected: exp,
                received: written,
            });
        }
    }
    Ok(written)
}

/// Download with the retry policy applied. Each attempt starts from an empty
/// staging file so a failed attempt can't leak bytes into the next one.
pub fn download_with_retry(
    url: &str,
    staging: &StagingFile,
    expected_len: Option<u64>,
    policy: &RetryPolicy,
) -> Result<u64, FetchError> {
    run_with_retry(policy, || {
        staging.rewind()?;
        download(url, staging, expected_len)
    })
}
