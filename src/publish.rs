//! Release creation and asset upload for a single version.
//!
//! Builds the fixed release draft for a version and drives the release
//! host through create-then-upload. Uploads run strictly in order and
//! stop at the first failure; nothing already created or uploaded is
//! rolled back.

use std::io::Write;

use crate::fetch::InstallerAsset;
use crate::host::{HostError, ReleaseDraft, ReleaseHost};
use crate::manifest::VersionId;
use crate::output::write_stderr_line;

/// Errors arising while publishing one version's release.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The release host rejected the create request.
    #[error("creating release {tag} failed: {source}")]
    Create {
        /// The tag the release was to carry.
        tag: String,
        /// The host's rejection detail.
        source: HostError,
    },

    /// The release host rejected an asset upload.
    #[error("uploading {asset} to {tag} failed: {source}")]
    Upload {
        /// The tag of the release being populated.
        tag: String,
        /// Filename of the asset that failed.
        asset: String,
        /// The host's rejection detail.
        source: HostError,
    },
}

/// Build the release draft for `version` with the fixed title and notes.
#[must_use]
pub fn draft_for(version: &VersionId) -> ReleaseDraft {
    ReleaseDraft {
        tag: version.tag(),
        title: release_title(version),
        notes: release_notes(version),
    }
}

/// The release title for a version.
fn release_title(version: &VersionId) -> String {
    format!("Firebird ODBC Driver {version}")
}

/// The release notes body for a version.
fn release_notes(version: &VersionId) -> String {
    format!(
        "Firebird ODBC Driver version {version}\n\
         \n\
         This release contains:\n\
         - Windows x86 (32-bit) installer\n\
         - Windows x64 (64-bit) installer\n\
         \n\
         Original distribution repackaged for easier access via GitHub API."
    )
}

/// Create the release for `version` and upload `installers` in order.
///
/// Upload failures stop the remaining uploads; the created release and
/// any assets already uploaded are left in place.
///
/// # Errors
///
/// Returns [`PublishError::Create`] if the host rejects the release, or
/// [`PublishError::Upload`] naming the first asset the host rejects.
pub fn publish_version(
    host: &dyn ReleaseHost,
    version: &VersionId,
    installers: &[InstallerAsset],
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<(), PublishError> {
    let draft = draft_for(version);

    if !quiet {
        write_stderr_line(stderr, format!("Creating release {}...", draft.tag));
    }
    let confirmation = host
        .create_release(&draft)
        .map_err(|source| PublishError::Create {
            tag: draft.tag.clone(),
            source,
        })?;
    if !confirmation.is_empty() && !quiet {
        write_stderr_line(stderr, format!("Release created: {confirmation}"));
    }

    for asset in installers {
        if !quiet {
            write_stderr_line(stderr, format!("Uploading {}...", asset.file_name));
        }
        host.upload_asset(&draft.tag, &asset.path)
            .map_err(|source| PublishError::Upload {
                tag: draft.tag.clone(),
                asset: asset.file_name.clone(),
                source,
            })?;
        if !quiet {
            write_stderr_line(stderr, format!("Uploaded {}", asset.file_name));
        }
    }

    Ok(())
}
