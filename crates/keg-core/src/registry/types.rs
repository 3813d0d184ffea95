//! Types stored in the install registry.

use semver::Version;
use std::path::PathBuf;

/// One installed artifact, as recorded after a successful install.
#[derive(Debug, Clone)]
pub struct InstallRecord {
    pub name: String,
    pub version: Version,
    /// Download URL the artifact came from.
    pub url: String,
    /// Declared (and verified) SHA-256 of the artifact.
    pub sha256: String,
    /// Where the binary was placed.
    pub binary_path: PathBuf,
    /// Unix seconds.
    pub installed_at: i64,
}

impl From<&crate::install::InstalledArtifact> for InstallRecord {
    fn from(a: &crate::install::InstalledArtifact) -> Self {
        InstallRecord {
            name: a.formula.name.clone(),
            version: a.formula.version.clone(),
            url: a.formula.url.to_string(),
            sha256: a.formula.sha256.as_str().to_string(),
            binary_path: a.binary_path.clone(),
            installed_at: a.installed_at,
        }
    }
}
