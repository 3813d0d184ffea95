//! Parse HTTP response header lines into ProbeResult.

use super::ProbeResult;

/// Parse collected header lines. Later occurrences win, which matches how
/// redirect chains accumulate headers in a single capture.
pub(crate) fn parse_probe_headers(lines: &[String]) -> ProbeResult {
    let mut out = ProbeResult::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    out.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-disposition") {
                out.content_disposition = Some(value.to_string());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_length() {
        let lines = [
            "HTTP/1.1 200 OK".to_string(),
            "Content-Length: 12345".to_string(),
        ];
        let r = parse_probe_headers(&lines);
        assert_eq!(r.content_length, Some(12345));
        assert!(r.content_disposition.is_none());
    }

    #[test]
    fn parses_content_disposition() {
        let lines = ["Content-Disposition: attachment; filename=\"tool.tar.gz\"".to_string()];
        let r = parse_probe_headers(&lines);
        assert!(r
            .content_disposition
            .as_deref()
            .unwrap()
            .contains("tool.tar.gz"));
    }

    #[test]
    fn last_content_length_wins_across_redirects() {
        let lines = [
            "Content-Length: 0".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "Content-Length: 999".to_string(),
        ];
        let r = parse_probe_headers(&lines);
        assert_eq!(r.content_length, Some(999));
    }

    #[test]
    fn ignores_garbage_values() {
        let lines = ["Content-Length: banana".to_string()];
        let r = parse_probe_headers(&lines);
        assert!(r.content_length.is_none());
    }
}
