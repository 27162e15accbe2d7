//! CLI argument definitions for the release publisher.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and
//! focused on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Publish Firebird ODBC Driver installer releases.
#[derive(Parser, Debug)]
#[command(name = "firebird-odbc-publisher")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish Firebird ODBC Driver installer releases.\n\n",
    "Reads a JSON manifest mapping version numbers to installer archive URLs ",
    "and brings the repository's GitHub releases in line with it: versions ",
    "whose tagged release already exists are skipped, and the rest are ",
    "downloaded, unpacked, and published with their installer executables ",
    "attached as release assets. Failures are reported per version and never ",
    "abort the remaining versions.\n\n",
    "Requires the GitHub CLI (gh) on PATH and a GITHUB_TOKEN with permission ",
    "to create releases in the repository gh resolves from the working ",
    "directory.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Reconcile releases.json in the working directory:\n",
    "    $ firebird-odbc-publisher\n\n",
    "  Use a manifest from another location:\n",
    "    $ firebird-odbc-publisher --manifest dist/releases.json\n\n",
    "  Preview the manifest without contacting GitHub:\n",
    "    $ firebird-odbc-publisher --dry-run\n\n",
    "  Publish with progress output suppressed:\n",
    "    $ firebird-odbc-publisher --quiet\n",
))]
pub struct Cli {
    /// Path to the release manifest.
    #[arg(short, long, value_name = "PATH", default_value = "releases.json")]
    pub manifest: Utf8PathBuf,

    /// Show the manifest contents and exit without publishing.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors and warnings still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Cli {
    /// Creates a `Cli` instance with the default manifest path and all
    /// flags disabled.
    ///
    /// This is useful for testing or programmatic construction where only
    /// specific fields need to be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use firebird_odbc_publisher::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert_eq!(cli.manifest.as_str(), "releases.json");
    /// assert!(!cli.dry_run);
    /// assert!(!cli.quiet);
    /// ```
    fn default() -> Self {
        Self {
            manifest: Utf8PathBuf::from("releases.json"),
            dry_run: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
