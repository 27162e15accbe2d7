//! Reconciliation driver for the release manifest.
//!
//! Walks the manifest in version order, skips versions whose release
//! already exists, fetches and publishes the rest, and contains every
//! per-version failure so one bad version never aborts the batch.

use camino::Utf8PathBuf;
use std::io::Write;

use crate::artefact::download::ArchiveDownloader;
use crate::artefact::extract::ArchiveExtractor;
use crate::error::VersionError;
use crate::fetch::fetch_installers;
use crate::host::ReleaseHost;
use crate::manifest::{ManifestEntry, ReleaseManifest, VersionId};
use crate::output::{processing_banner, write_stderr_line};
use crate::publish::publish_version;

/// The outcome recorded for one manifest version.
#[derive(Debug)]
pub enum VersionOutcome {
    /// The release was created and all assets uploaded.
    Published {
        /// Number of assets uploaded.
        assets: usize,
    },
    /// A release with the version's tag already exists remotely.
    Skipped,
    /// The archive contained no installer files; nothing was published.
    SkippedEmpty,
    /// Fetching or publishing failed; later versions still ran.
    Failed {
        /// The contained failure.
        error: VersionError,
    },
}

/// Ordered per-version outcomes for a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    outcomes: Vec<(VersionId, VersionOutcome)>,
}

impl RunSummary {
    /// The recorded outcomes, in processing order.
    #[must_use]
    pub fn outcomes(&self) -> &[(VersionId, VersionOutcome)] {
        &self.outcomes
    }

    /// Number of versions processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of versions published this run.
    #[must_use]
    pub fn published(&self) -> usize {
        self.count(|outcome| matches!(outcome, VersionOutcome::Published { .. }))
    }

    /// Number of versions skipped, whether already released or empty.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|outcome| {
            matches!(outcome, VersionOutcome::Skipped | VersionOutcome::SkippedEmpty)
        })
    }

    /// Number of versions that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, VersionOutcome::Failed { .. }))
    }

    /// Render the aggregate counts as a single line.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Published {}, skipped {}, failed {} of {} version(s).",
            self.published(),
            self.skipped(),
            self.failed(),
            self.total()
        )
    }

    fn count(&self, matcher: impl Fn(&VersionOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matcher(outcome))
            .count()
    }
}

/// Drives one reconciliation run over a manifest.
pub struct Reconciler<'a> {
    host: &'a dyn ReleaseHost,
    downloader: &'a dyn ArchiveDownloader,
    extractor: &'a dyn ArchiveExtractor,
    quiet: bool,
}

impl<'a> Reconciler<'a> {
    /// Assemble a driver from its collaborators.
    #[must_use]
    pub fn new(
        host: &'a dyn ReleaseHost,
        downloader: &'a dyn ArchiveDownloader,
        extractor: &'a dyn ArchiveExtractor,
        quiet: bool,
    ) -> Self {
        Self {
            host,
            downloader,
            extractor,
            quiet,
        }
    }

    /// Process every manifest entry in order and return the outcomes.
    ///
    /// Failures are contained per version; this function itself cannot
    /// fail.
    pub fn run(&self, manifest: &ReleaseManifest, stderr: &mut dyn Write) -> RunSummary {
        let mut outcomes = Vec::new();
        for entry in manifest.entries() {
            if !self.quiet {
                for line in processing_banner(&entry.version) {
                    write_stderr_line(stderr, line);
                }
            }

            let outcome = self.process_version(entry, stderr);
            self.report_outcome(&entry.version, &outcome, stderr);
            if !self.quiet {
                write_stderr_line(stderr, "");
            }
            outcomes.push((entry.version.clone(), outcome));
        }
        RunSummary { outcomes }
    }

    /// Reconcile one version, containing every failure in the outcome.
    fn process_version(&self, entry: &ManifestEntry, stderr: &mut dyn Write) -> VersionOutcome {
        if self.host.release_exists(&entry.version) {
            return VersionOutcome::Skipped;
        }
        match self.fetch_and_publish(entry, stderr) {
            Ok(Some(assets)) => VersionOutcome::Published { assets },
            Ok(None) => VersionOutcome::SkippedEmpty,
            Err(error) => VersionOutcome::Failed { error },
        }
    }

    /// Fetch the version's installers into a scoped scratch directory and
    /// publish them. Returns `None` when the archive held no installers.
    ///
    /// The scratch directory is reclaimed when this function returns,
    /// whatever the outcome.
    fn fetch_and_publish(
        &self,
        entry: &ManifestEntry,
        stderr: &mut dyn Write,
    ) -> Result<Option<usize>, VersionError> {
        let scratch = tempfile::tempdir().map_err(|e| VersionError::Scratch {
            reason: e.to_string(),
        })?;
        let scratch_dir =
            Utf8PathBuf::try_from(scratch.path().to_path_buf()).map_err(|e| {
                VersionError::Scratch {
                    reason: format!("scratch path is not valid UTF-8: {e}"),
                }
            })?;

        let installers = fetch_installers(
            self.downloader,
            self.extractor,
            &entry.source_url,
            &scratch_dir,
            self.quiet,
            stderr,
        )?;
        if installers.is_empty() {
            return Ok(None);
        }

        publish_version(self.host, &entry.version, &installers, self.quiet, stderr)?;
        Ok(Some(installers.len()))
    }

    /// Write the outcome line for a version. Warnings and failures are
    /// written even in quiet mode.
    fn report_outcome(
        &self,
        version: &VersionId,
        outcome: &VersionOutcome,
        stderr: &mut dyn Write,
    ) {
        match outcome {
            VersionOutcome::Skipped => {
                if !self.quiet {
                    write_stderr_line(
                        stderr,
                        format!("Release {} already exists, skipping...", version.tag()),
                    );
                }
            }
            VersionOutcome::SkippedEmpty => {
                write_stderr_line(
                    stderr,
                    format!("Warning: No installer files found for version {version}"),
                );
            }
            VersionOutcome::Published { .. } => {
                if !self.quiet {
                    write_stderr_line(
                        stderr,
                        format!("✓ Successfully published release {}", version.tag()),
                    );
                }
            }
            VersionOutcome::Failed { error } => {
                write_stderr_line(stderr, failure_line(version, error));
            }
        }
    }
}

/// Render the failure line for a version, distinguishing publish
/// rejections from everything that precedes them.
fn failure_line(version: &VersionId, error: &VersionError) -> String {
    match error {
        VersionError::Publish(_) => {
            format!("✗ Failed to publish release {}: {error}", version.tag())
        }
        _ => format!("✗ Error processing version {version}: {error}"),
    }
}
