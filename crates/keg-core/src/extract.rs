//! Archive handling for downloaded artifacts.
//!
//! Prebuilt releases ship either as `.tar.gz` archives containing the binary
//! (the common case) or as the bare binary itself. Extraction validates each
//! entry path so a hostile archive cannot write outside the staging
//! directory.

use std::path::{Component, Path, PathBuf};

/// How the downloaded artifact is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Gzip-compressed tarball; the binary is a member.
    TarGz,
    /// The artifact is the binary itself.
    Raw,
}

impl ArchiveKind {
    /// Detect packaging from the artifact filename.
    pub fn detect(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            ArchiveKind::TarGz
        } else {
            ArchiveKind::Raw
        }
    }
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry attempts to escape the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal { path: String },

    #[error("archive contains no files")]
    EmptyArchive,

    /// The expected binary is not present in the extracted tree.
    #[error("binary {name:?} not found in archive")]
    BinaryNotFound { name: String },
}

/// Extract a `.tar.gz` archive into `dest_dir`, returning the extracted
/// entry names. Entry paths are validated before unpacking.
pub fn unpack_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractError> {
    let file = std::fs::File::open(archive_path)?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    let mut extracted = Vec::new();

    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        let entry_path = entry.path()?.into_owned();

        validate_entry_path(&entry_path)?;

        let dest_path = dest_dir.join(&entry_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        entry.unpack(&dest_path)?;

        if let Some(name) = entry_path.file_name() {
            extracted.push(name.to_string_lossy().into_owned());
        }
    }

    if extracted.is_empty() {
        return Err(ExtractError::EmptyArchive);
    }

    Ok(extracted)
}

/// Find the named binary in the extracted tree. Searches breadth-first so a
/// top-level `janus` wins over `docs/examples/janus`.
pub fn locate_binary(dest_dir: &Path, wanted: &str) -> Result<PathBuf, ExtractError> {
    let mut queue = std::collections::VecDeque::from([dest_dir.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        let mut subdirs = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let ty = entry.file_type()?;
            if ty.is_file() && entry.file_name().to_string_lossy() == wanted {
                return Ok(path);
            }
            if ty.is_dir() {
                subdirs.push(path);
            }
        }
        subdirs.sort();
        queue.extend(subdirs);
    }

    Err(ExtractError::BinaryNotFound {
        name: wanted.to_string(),
    })
}

/// Validate that a tar entry path cannot escape the destination directory
/// via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractError> {
    if path.is_absolute() {
        return Err(ExtractError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(ExtractError::PathTraversal {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}
