//! Formula lookup in the local formula directory.
//!
//! A formula argument on the CLI is either a path to a `.toml` file or a bare
//! name resolved against `<formula_dir>/<name>.toml`.

use super::ManifestError;
use std::path::{Path, PathBuf};

/// Resolve a formula spec to a file path.
///
/// An argument that names an existing file is used as-is; anything else is
/// treated as a formula name and looked up in `formula_dir`.
pub fn resolve(spec: &str, formula_dir: &Path) -> Result<PathBuf, ManifestError> {
    let direct = Path::new(spec);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    if spec.contains('/') || spec.contains('\\') {
        // Looked like a path but doesn't exist; don't treat it as a name.
        return Err(ManifestError::Io {
            path: direct.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "formula file not found"),
        });
    }

    let candidate = formula_dir.join(format!("{spec}.toml"));
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(ManifestError::NotFound {
            name: spec.to_string(),
            dir: formula_dir.to_path_buf(),
        })
    }
}

/// List the names of all formulas in `formula_dir`, sorted. A missing
/// directory is an empty catalogue, not an error.
pub fn list_formulas(formula_dir: &Path) -> Result<Vec<String>, ManifestError> {
    let entries = match std::fs::read_dir(formula_dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ManifestError::Io {
                path: formula_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Io {
            path: formula_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
