//! Archive download logic for installer retrieval.
//!
//! Provides a trait-based abstraction for downloading installer archives
//! from the URLs named in the release manifest, enabling dependency
//! injection for testing.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout for installer archive downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for downloading installer archives.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveDownloader {
    /// Download the archive at `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or file write fails.
    fn download_archive(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from archive download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested archive was not found (HTTP 404).
    #[error("archive not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
pub struct HttpDownloader;

impl ArchiveDownloader for HttpDownloader {
    fn download_archive(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        download_to_file(url, dest)
    }
}

/// Download a URL and write the body to a file.
fn download_to_file(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let response = http_agent()
        .get(url)
        .call()
        .map_err(|e| map_ureq_error(url, &e))?;
    let mut file = std::fs::File::create(dest)?;
    std::io::copy(&mut response.into_body().as_reader(), &mut file).map_err(DownloadError::Io)?;
    Ok(())
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
