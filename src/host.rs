//! Release host capability interface.
//!
//! The narrow `exists`/`create`/`upload` surface is the seam between the
//! reconciliation logic and the hosting service, enabling in-memory fakes
//! in tests. The production implementation lives in [`crate::gh`].

use crate::manifest::VersionId;
use camino::Utf8Path;
use thiserror::Error;

/// Errors arising from release host operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host command could not be spawned or timed out.
    #[error("failed to invoke release command: {0}")]
    Invoke(#[from] std::io::Error),

    /// The host rejected the request.
    #[error("{detail}")]
    Rejected {
        /// The service's error detail, typically its stderr output.
        detail: String,
    },
}

/// The parameters for creating a remote release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    /// The release tag (for example `v2.0.5`).
    pub tag: String,
    /// Human-readable release title.
    pub title: String,
    /// Multi-line release notes.
    pub notes: String,
}

/// Operations the reconciliation workflow needs from a release host.
///
/// Implementations must keep [`release_exists`](ReleaseHost::release_exists)
/// free of side effects; `create_release` and `upload_asset` are the only
/// mutating operations, and neither is retried or rolled back by callers.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseHost {
    /// Report whether a release tagged for `version` already exists.
    ///
    /// A query failure is indistinguishable from an absent release: both
    /// report `false` and the caller proceeds to publish. This conflation
    /// is a known weakness kept for behavioural compatibility; a transient
    /// query error leads to a publish attempt that the host then rejects
    /// as a duplicate.
    fn release_exists(&self, version: &VersionId) -> bool;

    /// Create a release from `draft`.
    ///
    /// Returns the host's confirmation detail (for GitHub, the release
    /// URL) on success.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Rejected`] when the host refuses the request
    /// and [`HostError::Invoke`] when the host command cannot be run.
    fn create_release(&self, draft: &ReleaseDraft) -> Result<String, HostError>;

    /// Upload the file at `file` as an asset of the release tagged `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Rejected`] when the host refuses the upload
    /// and [`HostError::Invoke`] when the host command cannot be run.
    fn upload_asset(&self, tag: &str, file: &Utf8Path) -> Result<(), HostError>;
}
