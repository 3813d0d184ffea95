//! Artifact filename derivation.
//!
//! The staging file for a download is named after the last URL path segment,
//! or the `Content-Disposition` filename when the server sends one, sanitized
//! for Linux filesystems.

mod sanitize;

pub use sanitize::sanitize_filename;

/// Fallback when neither the URL path nor Content-Disposition yields a name.
const DEFAULT_FILENAME: &str = "artifact.bin";

/// Derives a safe filename for the staged artifact.
///
/// Prefers the `Content-Disposition` filename when present, otherwise the
/// last path segment of `url`. The result is sanitized (no separators, NUL,
/// or control chars; trimmed dots/spaces; bounded length).
pub fn derive_artifact_name(url: &url::Url, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(content_disposition_filename)
        .or_else(|| last_path_segment(url));

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn last_path_segment(url: &url::Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Extracts `filename="..."` or `filename=token` from a Content-Disposition
/// value. RFC 5987 `filename*` encoding is not handled; release servers for
/// prebuilt binaries send plain ASCII names.
fn content_disposition_filename(value: &str) -> Option<String> {
    for param in value.split(';') {
        let param = param.trim();
        let Some((name, v)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let v = v.trim().trim_matches('"').trim();
        if !v.is_empty() {
            return Some(v.to_string());
        }
    }
    None
}
