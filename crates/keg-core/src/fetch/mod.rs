//! HTTP metadata probing and artifact download.
//!
//! Uses the curl crate (libcurl). The HEAD probe confirms `Content-Length`
//! and captures `Content-Disposition` as a filename hint; the download is a
//! single sequential GET into the staging file. Both block the current
//! thread; async callers use `tokio::task::spawn_blocking`.

mod download;
mod parse;

pub use download::{download, download_with_retry};

use crate::retry::FetchError;
use std::str;
use std::time::Duration;

/// Result of a HEAD request: the headers the pipeline cares about.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. The probe is advisory: some servers reject HEAD, so
/// callers treat a failure as "no metadata" and let the GET and the checksum
/// be the real gates.
pub fn probe(url: &str) -> Result<ProbeResult, FetchError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    Ok(parse::parse_probe_headers(&headers))
}
