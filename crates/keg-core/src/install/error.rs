//! Install pipeline error taxonomy with stage attribution.

use crate::extract::ExtractError;
use crate::formula::ManifestError;
use crate::retry::FetchError;
use semver::Version;
use std::fmt;
use std::path::PathBuf;

/// Pipeline stage an install request moves through, strictly in order.
/// No transition skips verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Declared,
    Downloaded,
    Verified,
    Installed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Declared => "declared",
            Stage::Downloaded => "downloaded",
            Stage::Verified => "verified",
            Stage::Installed => "installed",
        };
        write!(f, "{s}")
    }
}

/// Everything that can go wrong between reading a formula and placing the
/// binary. Each variant maps to the stage that failed; callers surface that
/// stage to the user.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The formula itself is unusable.
    #[error("formula rejected: {0}")]
    Manifest(#[from] ManifestError),

    /// Network failure after the retry policy gave up (or refused to retry).
    #[error("download failed: {0}")]
    Network(#[from] FetchError),

    /// Could not compute the digest of the staged artifact.
    #[error("digest computation failed: {0}")]
    Digest(#[source] anyhow::Error),

    /// The artifact does not match the formula. Fatal; never silently
    /// retried, and nothing is installed.
    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Filesystem failure, with the path that was being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested version is not newer than what the registry records.
    #[error("{name} {requested} is not newer than installed {installed} (use --force to reinstall)")]
    Downgrade {
        name: String,
        requested: Version,
        installed: Version,
    },
}

impl InstallError {
    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            InstallError::Manifest(_) | InstallError::Downgrade { .. } => Stage::Declared,
            InstallError::Network(_) => Stage::Downloaded,
            InstallError::Digest(_) | InstallError::ChecksumMismatch { .. } => Stage::Verified,
            InstallError::Extract(_) => Stage::Installed,
            InstallError::Io { stage, .. } => *stage,
        }
    }
}
