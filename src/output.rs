//! Output formatting for the publisher CLI.
//!
//! This module provides the stderr line writer used throughout the run,
//! the banner framing each version's processing block, and dry-run
//! information formatting.

use crate::manifest::{ManifestEntry, VersionId};
use camino::Utf8Path;
use std::io::Write;

/// Width of the `=` rule framing each version's processing block.
const BANNER_WIDTH: usize = 60;

/// Write one line to the given stderr sink.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// The three banner lines framing a version's processing block.
#[must_use]
pub fn processing_banner(version: &VersionId) -> [String; 3] {
    let rule = "=".repeat(BANNER_WIDTH);
    [
        rule.clone(),
        format!("Processing version {version}"),
        rule,
    ]
}

/// Manifest information for dry-run output.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use firebird_odbc_publisher::manifest::{ManifestEntry, VersionId};
/// use firebird_odbc_publisher::output::DryRunInfo;
///
/// let path = Utf8PathBuf::from("releases.json");
/// let entries = vec![ManifestEntry {
///     version: VersionId::try_from("2.0.5")?,
///     source_url: "https://example.test/v2.zip".to_owned(),
/// }];
///
/// let info = DryRunInfo {
///     manifest_path: &path,
///     entries: &entries,
/// };
///
/// let output = info.display_text();
/// assert!(output.contains("Dry run"));
/// assert!(output.contains("2.0.5"));
/// # Ok::<(), firebird_odbc_publisher::manifest::ManifestError>(())
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Path the manifest was loaded from.
    pub manifest_path: &'a Utf8Path,
    /// The manifest entries, in processing order.
    pub entries: &'a [ManifestEntry],
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no releases will be published".to_owned(),
            String::new(),
            format!("Manifest: {}", self.manifest_path),
            String::new(),
            "Versions to reconcile:".to_owned(),
        ];

        if self.entries.is_empty() {
            lines.push("  (none)".to_owned());
        }
        for entry in self.entries {
            lines.push(format!("  - {}: {}", entry.version, entry.source_url));
        }

        lines.join("\n")
    }
}
