//! The install pipeline: Declared, Downloaded, Verified, Installed.
//!
//! Everything up to the final placement happens inside a temporary staging
//! directory, so a failure at any stage leaves no partial install behind.
//! The binary is moved under the install directory only after the staged
//! artifact's SHA-256 matches the formula.

mod error;

pub use error::{InstallError, Stage};

use crate::checksum;
use crate::extract::{self, ArchiveKind};
use crate::fetch;
use crate::formula::Formula;
use crate::registry::db::unix_timestamp;
use crate::retry::RetryPolicy;
use crate::storage::{self, StagingFile};
use crate::url_model;
use semver::Version;
use std::path::{Path, PathBuf};

/// Mode for installed binaries.
const BIN_MODE: u32 = 0o755;

/// Options for one install request.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub install_dir: PathBuf,
    pub retry: RetryPolicy,
    /// Version currently recorded for this formula name, if any.
    pub installed_version: Option<Version>,
    /// Allow reinstalling the same or an older version.
    pub force: bool,
}

/// Proof of a completed install; created only after the binary is in place.
#[derive(Debug, Clone)]
pub struct InstalledArtifact {
    pub formula: Formula,
    pub binary_path: PathBuf,
    /// Unix seconds.
    pub installed_at: i64,
}

/// Outcome of `fetch_verified`: a staged artifact whose digest matched.
pub struct VerifiedArtifact {
    /// Staging directory keeping the artifact alive; dropped on cleanup.
    staging: tempfile::TempDir,
    /// Path of the verified artifact inside the staging directory.
    artifact_path: PathBuf,
    /// Computed digest (equal to the formula's declared digest).
    pub sha256: String,
}

impl VerifiedArtifact {
    pub fn path(&self) -> &Path {
        &self.artifact_path
    }
}

/// Run the full pipeline for one formula. Blocking; call from
/// `tokio::task::spawn_blocking` in async contexts.
pub fn run(formula: &Formula, opts: &InstallOptions) -> Result<InstalledArtifact, InstallError> {
    version_gate(formula, opts)?;

    let verified = fetch_verified(formula, &opts.retry)?;
    let dest = place(formula, &verified, &opts.install_dir)?;

    tracing::info!(
        name = %formula.name,
        version = %formula.version,
        dest = %dest.display(),
        "installed"
    );

    Ok(InstalledArtifact {
        formula: formula.clone(),
        binary_path: dest,
        installed_at: unix_timestamp(),
    })
}

/// Download and verify without installing (`keg fetch`). The returned
/// artifact keeps its staging directory alive until dropped.
pub fn fetch_verified(
    formula: &Formula,
    retry: &RetryPolicy,
) -> Result<VerifiedArtifact, InstallError> {
    // Downloaded: stage the artifact under a temp dir.
    let staging = tempfile::tempdir().map_err(|source| InstallError::Io {
        stage: Stage::Downloaded,
        path: std::env::temp_dir(),
        source,
    })?;

    // The probe is advisory; servers that reject HEAD still get a GET.
    let probe = match fetch::probe(formula.url.as_str()) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(url = %formula.url, "HEAD probe failed ({e}), continuing");
            fetch::ProbeResult::default()
        }
    };

    let artifact_name =
        url_model::derive_artifact_name(&formula.url, probe.content_disposition.as_deref());
    let artifact_path = staging.path().join(&artifact_name);
    let part_path = storage::staging_path(&artifact_path);

    let part = StagingFile::create(&part_path).map_err(|source| InstallError::Io {
        stage: Stage::Downloaded,
        path: part_path.clone(),
        source,
    })?;

    let written = fetch::download_with_retry(
        formula.url.as_str(),
        &part,
        probe.content_length,
        retry,
    )?;
    part.sync().map_err(|source| InstallError::Io {
        stage: Stage::Downloaded,
        path: part_path.clone(),
        source,
    })?;
    tracing::debug!(url = %formula.url, bytes = written, "download complete");

    // Verified: digest must match the formula before anything else happens.
    let actual = checksum::sha256_path(&part_path).map_err(InstallError::Digest)?;
    if !formula.sha256.matches(&actual) {
        return Err(InstallError::ChecksumMismatch {
            url: formula.url.to_string(),
            expected: formula.sha256.to_string(),
            actual,
        });
    }

    // Drop the .part suffix now that the bytes are trusted.
    std::fs::rename(&part_path, &artifact_path).map_err(|source| InstallError::Io {
        stage: Stage::Verified,
        path: artifact_path.clone(),
        source,
    })?;

    Ok(VerifiedArtifact {
        staging,
        artifact_path,
        sha256: actual,
    })
}

/// Installed: extract if archived, then move the binary into place.
fn place(
    formula: &Formula,
    verified: &VerifiedArtifact,
    install_dir: &Path,
) -> Result<PathBuf, InstallError> {
    let artifact_name = verified
        .artifact_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let binary_src = match ArchiveKind::detect(&artifact_name) {
        ArchiveKind::TarGz => {
            let unpack_dir = verified.staging.path().join("unpacked");
            std::fs::create_dir_all(&unpack_dir).map_err(|source| InstallError::Io {
                stage: Stage::Installed,
                path: unpack_dir.clone(),
                source,
            })?;
            extract::unpack_tar_gz(&verified.artifact_path, &unpack_dir)?;
            extract::locate_binary(&unpack_dir, formula.binary())?
        }
        ArchiveKind::Raw => verified.artifact_path.clone(),
    };

    let dest = install_dir.join(formula.binary());
    storage::install_file(&binary_src, &dest, BIN_MODE).map_err(|source| InstallError::Io {
        stage: Stage::Installed,
        path: dest.clone(),
        source,
    })?;
    Ok(dest)
}

/// Declared-stage gate: refuse installing a version that is not newer than
/// the recorded one, unless forced.
fn version_gate(formula: &Formula, opts: &InstallOptions) -> Result<(), InstallError> {
    if opts.force {
        return Ok(());
    }
    if let Some(installed) = &opts.installed_version {
        if formula.version <= *installed {
            return Err(InstallError::Downgrade {
                name: formula.name.clone(),
                requested: formula.version.clone(),
                installed: installed.clone(),
            });
        }
    }
    Ok(())
}
