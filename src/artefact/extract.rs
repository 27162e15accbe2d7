//! Archive extraction for installer ZIP files.
//!
//! Extracts `.zip` archives to a scratch directory with path traversal
//! protection to prevent zip-slip attacks.

use std::path::Path;

/// Trait for extracting installer archives, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the list of filenames that were extracted. An archive with
    /// no file entries yields an empty list; whether that is acceptable is
    /// the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::PathTraversal`] if any entry attempts to
    /// escape the destination directory.
    /// Returns [`ExtractError::Archive`] if the file is not a valid ZIP.
    /// Returns [`ExtractError::Io`] on I/O failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The archive is malformed or not a ZIP file.
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },
}

/// Default extractor using the `zip` crate.
///
/// Validates each entry path before extraction to guard against path
/// traversal attacks (zip-slip).
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractError> {
        let file = std::fs::File::open(archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut extracted = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(ExtractError::PathTraversal {
                    path: entry.name().to_owned(),
                });
            };

            let dest_path = dest_dir.join(&relative);
            if entry.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = std::fs::File::create(&dest_path)?;
            std::io::copy(&mut entry, &mut out)?;

            if let Some(name) = relative.file_name() {
                extracted.push(name.to_string_lossy().into_owned());
            }
        }

        Ok(extracted)
    }
}
