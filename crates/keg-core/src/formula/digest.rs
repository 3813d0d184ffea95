//! Validated SHA-256 digest string.

use super::ManifestError;
use std::fmt;

/// Hex length of a SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A validated, lowercase hex-encoded SHA-256 digest as declared in a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a computed lowercase hex digest.
    pub fn matches(&self, computed: &str) -> bool {
        self.0 == computed
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ManifestError;

    fn try_from(value: &str) -> Result<Self, ManifestError> {
        if value.len() != DIGEST_HEX_LEN {
            return Err(ManifestError::InvalidChecksum {
                reason: format!("expected {DIGEST_HEX_LEN} hex chars, got {}", value.len()),
            });
        }
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ManifestError::InvalidChecksum {
                reason: format!("non-hex character {bad:?}"),
            });
        }
        if value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ManifestError::InvalidChecksum {
                reason: "digest must be lowercase".to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
