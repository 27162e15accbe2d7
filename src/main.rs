//! Firebird ODBC Driver release publisher CLI entrypoint.
//!
//! This binary reconciles a JSON release manifest against the
//! repository's GitHub releases: versions whose tagged release already
//! exists are skipped, and the rest are downloaded, unpacked, and
//! published with their installer executables attached as assets.

use clap::Parser;
use firebird_odbc_publisher::artefact::download::HttpDownloader;
use firebird_odbc_publisher::artefact::extract::ZipExtractor;
use firebird_odbc_publisher::cli::Cli;
use firebird_odbc_publisher::config::{PublisherConfig, resolve_token};
use firebird_odbc_publisher::error::Result;
use firebird_odbc_publisher::exec::SystemCommandExecutor;
use firebird_odbc_publisher::gh::{GhClient, probe_gh_version};
use firebird_odbc_publisher::manifest::ReleaseManifest;
use firebird_odbc_publisher::output::{DryRunInfo, write_stderr_line};
use firebird_odbc_publisher::reconcile::Reconciler;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    // Dry-run mode: show the manifest without contacting anything
    if cli.dry_run {
        return run_dry(cli, stderr);
    }

    let executor = SystemCommandExecutor;

    // Step 1: Verify the GitHub CLI is available
    let gh_version = probe_gh_version(&executor)?;
    if !cli.quiet {
        write_stderr_line(stderr, format!("Using GitHub CLI: {gh_version}"));
    }

    // Step 2: Resolve the credential from the environment
    let token = resolve_token()?;
    let config = PublisherConfig::from_cli(cli, token);

    // Step 3: Load the release manifest
    let manifest = ReleaseManifest::load(&config.manifest_path)?;
    if !config.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Found {} release(s) in {}",
                manifest.len(),
                config.manifest_path
            ),
        );
        write_stderr_line(stderr, "");
    }

    // Step 4: Reconcile every manifest version against the release host
    let host = GhClient::new(&executor, config.token.clone());
    let reconciler = Reconciler::new(&host, &HttpDownloader, &ZipExtractor, config.quiet);
    let summary = reconciler.run(&manifest, stderr);

    // Step 5: Report the aggregate outcome
    if !config.quiet {
        write_stderr_line(stderr, summary.summary_line());
        write_stderr_line(stderr, "All releases processed.");
    }

    Ok(())
}

/// Runs in dry-run mode, listing the manifest without side effects.
fn run_dry(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let manifest = ReleaseManifest::load(&cli.manifest)?;
    let info = DryRunInfo {
        manifest_path: &cli.manifest,
        entries: manifest.entries(),
    };
    write_stderr_line(stderr, info.display_text());
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("Error: {err}"));
            1
        }
    }
}
