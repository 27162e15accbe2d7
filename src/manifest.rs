//! Release manifest loading and validation.
//!
//! The manifest (`releases.json`) is a flat JSON object mapping version
//! identifiers to the URLs of the installer archives for those versions.
//! Loading validates both the document shape and every version identifier,
//! and yields entries sorted by version so that processing order is a stated
//! contract rather than an accident of container iteration.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors arising from manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("{path} not found")]
    NotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The manifest file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Unreadable {
        /// Path to the unreadable manifest.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest content is not valid JSON.
    #[error("invalid JSON in release manifest: {source}")]
    Parse {
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest is valid JSON but not a flat object of strings.
    #[error("malformed release manifest: {reason}")]
    Shape {
        /// Description of the shape violation.
        reason: String,
    },
}

/// A validated release version identifier.
///
/// The identifier is taken verbatim from a manifest key and must contain at
/// least one non-whitespace character, because it is embedded directly in
/// the release tag.
///
/// # Examples
///
/// ```
/// use firebird_odbc_publisher::manifest::VersionId;
///
/// let version: VersionId = "2.0.5".try_into().expect("valid version");
/// assert_eq!(version.as_str(), "2.0.5");
/// assert_eq!(version.tag(), "v2.0.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId(String);

impl VersionId {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the release tag derived from this version.
    ///
    /// The tag is always the version prefixed with `v`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl TryFrom<&str> for VersionId {
    type Error = ManifestError;

    fn try_from(value: &str) -> Result<Self, ManifestError> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for VersionId {
    type Error = ManifestError;

    fn try_from(value: String) -> Result<Self, ManifestError> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a usable version identifier.
fn validate_version(value: &str) -> Result<(), ManifestError> {
    if value.trim().is_empty() {
        return Err(ManifestError::Shape {
            reason: "version identifiers must not be blank".to_owned(),
        });
    }
    Ok(())
}

/// A single manifest entry pairing a version with its artefact URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The declared release version.
    pub version: VersionId,
    /// URL of the installer archive for this version.
    pub source_url: String,
}

/// The declarative release manifest driving a reconciliation run.
///
/// Entries are held sorted by version identifier (lexicographic byte
/// order); iteration order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseManifest {
    entries: Vec<ManifestEntry>,
}

impl ReleaseManifest {
    /// Load and validate a manifest from `path`.
    ///
    /// Duplicate version keys in the JSON source resolve to the last
    /// occurrence, matching JSON object semantics.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] if the file is absent,
    /// [`ManifestError::Unreadable`] if it cannot be read,
    /// [`ManifestError::Parse`] if it is not valid JSON, and
    /// [`ManifestError::Shape`] if it is not a flat object of string keys
    /// to string values or a version key is blank.
    pub fn load(path: &Utf8Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_owned(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Unreadable {
            path: path.to_owned(),
            source,
        })?;

        let raw = parse_version_map(&text)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (version, source_url) in raw {
            entries.push(ManifestEntry {
                version: VersionId::try_from(version)?,
                source_url,
            });
        }

        log::trace!("manifest {path} declares {} version(s)", entries.len());
        Ok(Self { entries })
    }

    /// Build a manifest from pre-validated entries.
    ///
    /// Entries are sorted by version to preserve the ordering contract.
    #[must_use]
    pub fn from_entries(mut entries: Vec<ManifestEntry>) -> Self {
        entries.sort_by(|a, b| a.version.cmp(&b.version));
        Self { entries }
    }

    /// Return the manifest entries in processing order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Return the number of declared versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the manifest declares no versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the manifest body into a sorted version-to-URL map.
///
/// Syntax failures map to [`ManifestError::Parse`]; type mismatches (a
/// non-object document or non-string values) map to
/// [`ManifestError::Shape`].
fn parse_version_map(text: &str) -> Result<BTreeMap<String, String>, ManifestError> {
    match serde_json::from_str::<BTreeMap<String, String>>(text) {
        Ok(map) => Ok(map),
        Err(source) => match source.classify() {
            serde_json::error::Category::Data => Err(ManifestError::Shape {
                reason: source.to_string(),
            }),
            _ => Err(ManifestError::Parse { source }),
        },
    }
}
