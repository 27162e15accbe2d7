//! Error taxonomy for the publisher.
//!
//! Failures split into two tiers. [`StartupError`] covers preconditions
//! checked before any version is processed; one of these aborts the run
//! with a non-zero exit code. [`VersionError`] covers everything that can
//! go wrong while reconciling a single version; these are reported and
//! contained so the remaining versions still run.

use crate::fetch::FetchError;
use crate::manifest::ManifestError;
use crate::publish::PublishError;

/// Errors that abort the run before reconciliation starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The `gh` tool could not be spawned or identified.
    #[error("GitHub CLI (gh) is not installed or not in PATH ({reason})")]
    GhUnavailable {
        /// Description of the probe failure.
        reason: String,
    },
    /// The credential environment variable is unset or blank.
    #[error("{variable} environment variable is not set")]
    CredentialMissing {
        /// Name of the missing variable.
        variable: &'static str,
    },
    /// The release manifest could not be loaded.
    #[error("{0}")]
    Manifest(#[from] ManifestError),
}

/// Errors contained within a single version's reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// Downloading or unpacking the installer archive failed.
    #[error("{0}")]
    Fetch(#[from] FetchError),
    /// A scratch directory could not be provisioned.
    #[error("scratch directory unavailable: {reason}")]
    Scratch {
        /// Description of the provisioning failure.
        reason: String,
    },
    /// Creating the release or uploading an asset failed.
    #[error("{0}")]
    Publish(#[from] PublishError),
}

/// Result alias for startup-phase operations.
pub type Result<T> = std::result::Result<T, StartupError>;
