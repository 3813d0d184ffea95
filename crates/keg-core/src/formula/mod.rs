//! Formula model: the declarative install manifest.
//!
//! A formula is a small TOML file describing one prebuilt binary release:
//! name, description, homepage, download URL, semantic version, SHA-256
//! checksum, and optionally the binary member to install from the archive.
//! Formulas are immutable inputs; a new release is a new formula with a
//! higher version, never an edit of an old one.

mod catalogue;
mod digest;

pub use catalogue::{list_formulas, resolve};
pub use digest::Sha256Digest;

use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Errors raised while loading or validating a formula.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed formula TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("formula name is empty")]
    EmptyName,

    #[error("formula name {name:?} contains path separators or control characters")]
    InvalidName { name: String },

    #[error("{field} is not a well-formed URL ({value:?}): {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{field} must use http or https, got {value:?}")]
    UnsupportedScheme { field: &'static str, value: String },

    #[error("version {value:?} is not a semantic version: {source}")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("sha256 is not a valid digest: {reason}")]
    InvalidChecksum { reason: String },

    #[error("no formula named {name:?} under {dir}")]
    NotFound { name: String, dir: PathBuf },
}

/// Raw on-disk shape; every field is validated before it becomes a `Formula`.
/// Unknown keys are rejected so a typoed field fails loudly instead of being
/// silently ignored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFormula {
    name: String,
    description: String,
    #[serde(default)]
    homepage: Option<String>,
    url: String,
    version: String,
    sha256: String,
    #[serde(default)]
    binary: Option<String>,
}

/// A validated install manifest for one prebuilt binary release.
#[derive(Debug, Clone)]
pub struct Formula {
    pub name: String,
    pub description: String,
    /// Absent when the formula ships an empty homepage (the common case for
    /// CI-generated formulas).
    pub homepage: Option<Url>,
    pub url: Url,
    pub version: Version,
    pub sha256: Sha256Digest,
    binary: Option<String>,
}

impl Formula {
    /// Parse and validate a formula from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        let raw: RawFormula = toml::from_str(text)?;
        Self::validate(raw)
    }

    /// Load and validate a formula file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Name of the binary to install out of the artifact. Defaults to the
    /// formula name when the manifest does not say otherwise.
    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }

    fn validate(raw: RawFormula) -> Result<Self, ManifestError> {
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return Err(ManifestError::EmptyName);
        }
        if name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control() || c.is_whitespace())
        {
            return Err(ManifestError::InvalidName { name });
        }

        let url = parse_http_url("url", &raw.url)?;

        // Homepages in CI-generated formulas are frequently empty strings.
        let homepage = match raw.homepage.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(h) => Some(parse_http_url("homepage", h)?),
        };

        // Tags conventionally carry a leading 'v' (v0.1.2); accept it.
        let version_str = raw.version.trim().trim_start_matches('v');
        let version =
            Version::parse(version_str).map_err(|source| ManifestError::InvalidVersion {
                value: raw.version.clone(),
                source,
            })?;

        let sha256 = Sha256Digest::try_from(raw.sha256.trim())?;

        let binary = match raw.binary.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(b) if b.contains('/') || b.contains('\\') => {
                return Err(ManifestError::InvalidName {
                    name: b.to_string(),
                })
            }
            Some(b) => Some(b.to_string()),
        };

        Ok(Formula {
            name,
            description: raw.description.trim().to_string(),
            homepage,
            url,
            version,
            sha256,
            binary,
        })
    }
}

fn parse_http_url(field: &'static str, value: &str) -> Result<Url, ManifestError> {
    let url = Url::parse(value).map_err(|source| ManifestError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ManifestError::UnsupportedScheme {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn janus_toml() -> String {
        format!(
            r#"
            name = "janus"
            description = "Shared CI deployer + version syntax tool"
            homepage = ""
            url = "https://example.com/releases/janus_v0.1.2_Linux_x86_64.tar.gz"
            version = "0.1.2"
            sha256 = "{}"
            "#,
            "a".repeat(64)
        )
    }

    #[test]
    fn parses_valid_formula() {
        let f = Formula::from_toml_str(&janus_toml()).unwrap();
        assert_eq!(f.name, "janus");
        assert_eq!(f.version, Version::new(0, 1, 2));
        assert_eq!(f.binary(), "janus");
        assert!(f.homepage.is_none());
        assert_eq!(f.url.scheme(), "https");
    }

    #[test]
    fn binary_field_overrides_name() {
        let toml = janus_toml().replace(
            "version = \"0.1.2\"",
            "version = \"0.1.2\"\nbinary = \"janus-cli\"",
        );
        let f = Formula::from_toml_str(&toml).unwrap();
        assert_eq!(f.binary(), "janus-cli");
    }

    #[test]
    fn accepts_v_prefixed_version() {
        let toml = janus_toml().replace("version = \"0.1.2\"", "version = \"v0.1.8\"");
        let f = Formula::from_toml_str(&toml).unwrap();
        assert_eq!(f.version, Version::new(0, 1, 8));
    }

    #[test]
    fn rejects_missing_required_field() {
        let toml = janus_toml().replace("version = \"0.1.2\"", "");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::Toml(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let toml = janus_toml() + "\nchecksum = \"typo\"\n";
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::Toml(_))
        ));
    }

    #[test]
    fn rejects_malformed_url() {
        let toml = janus_toml().replace("https://example.com/releases", "not a url");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::InvalidUrl { field: "url", .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let toml = janus_toml().replace("https://example.com", "ftp://example.com");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::UnsupportedScheme { field: "url", .. })
        ));
    }

    #[test]
    fn rejects_bad_version() {
        let toml = janus_toml().replace("0.1.2", "latest");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn rejects_bad_digest() {
        let toml = janus_toml().replace(&"a".repeat(64), "deadbeef");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn rejects_name_with_separator() {
        let toml = janus_toml().replace("\"janus\"", "\"../janus\"");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::InvalidName { .. })
        ));
    }

    #[test]
    fn empty_name_rejected() {
        let toml = janus_toml().replace("\"janus\"", "\"  \"");
        assert!(matches!(
            Formula::from_toml_str(&toml),
            Err(ManifestError::EmptyName)
        ));
    }
}
