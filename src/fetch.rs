//! Installer acquisition pipeline for a single version.
//!
//! Downloads the ZIP archive named by the manifest into a throwaway
//! staging directory, unpacks it into the caller's scratch directory,
//! and enumerates the installer executables found at the top level.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

use crate::artefact::download::{ArchiveDownloader, DownloadError};
use crate::artefact::extract::{ArchiveExtractor, ExtractError};
use crate::output::write_stderr_line;

/// File extension identifying installer executables.
const INSTALLER_EXTENSION: &str = "exe";

/// Filename given to the downloaded archive inside its staging directory.
const ARCHIVE_FILENAME: &str = "installers.zip";

/// An installer executable unpacked into the scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerAsset {
    /// The bare filename, as shown in progress output.
    pub file_name: String,
    /// Absolute path of the unpacked file inside the scratch directory.
    pub path: Utf8PathBuf,
}

/// Errors arising while acquiring a version's installers.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Downloading the archive failed.
    #[error("{0}")]
    Download(#[from] DownloadError),

    /// Unpacking the archive failed.
    #[error("{0}")]
    Archive(#[from] ExtractError),

    /// I/O error staging the archive or enumerating installers.
    #[error("I/O error during fetch: {0}")]
    Io(#[from] std::io::Error),
}

/// Download the archive at `url` and unpack it into `scratch_dir`,
/// returning the installer executables found there.
///
/// The archive itself is staged in a temporary directory that is removed
/// on every return path; only the unpacked contents survive in
/// `scratch_dir`, whose lifetime the caller owns. The returned list is
/// sorted by filename and may be empty.
///
/// # Errors
///
/// Returns [`FetchError`] if the download, the unpacking, or the
/// enumeration of `scratch_dir` fails.
pub fn fetch_installers(
    downloader: &dyn ArchiveDownloader,
    extractor: &dyn ArchiveExtractor,
    url: &str,
    scratch_dir: &Utf8Path,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<Vec<InstallerAsset>, FetchError> {
    // Step 1: Download the archive into a staging directory whose drop
    // removes it whether or not the rest of the pipeline succeeds.
    let staging = tempfile::tempdir()?;
    let archive_path = staging.path().join(ARCHIVE_FILENAME);
    if !quiet {
        write_stderr_line(stderr, format!("Downloading {url}..."));
    }
    downloader.download_archive(url, &archive_path)?;

    // Step 2: Unpack into the caller's scratch directory.
    if !quiet {
        write_stderr_line(stderr, format!("Extracting to {scratch_dir}..."));
    }
    extractor.extract(&archive_path, scratch_dir.as_std_path())?;

    // Step 3: Enumerate installers at the top level of the scratch
    // directory. Nested directories are not searched.
    let installers = discover_installers(scratch_dir)?;
    if !installers.is_empty() && !quiet {
        let names = installers
            .iter()
            .map(|asset| asset.file_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write_stderr_line(
            stderr,
            format!("Found {} installer file(s): {names}", installers.len()),
        );
    }
    Ok(installers)
}

/// List regular files directly under `scratch_dir` with the installer
/// extension, sorted by filename.
fn discover_installers(scratch_dir: &Utf8Path) -> Result<Vec<InstallerAsset>, FetchError> {
    let mut installers = Vec::new();
    for entry in scratch_dir.read_dir_utf8()? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension() != Some(INSTALLER_EXTENSION) {
            continue;
        }
        let Some(file_name) = path.file_name().map(str::to_owned) else {
            continue;
        };
        installers.push(InstallerAsset { file_name, path });
    }
    installers.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(installers)
}
