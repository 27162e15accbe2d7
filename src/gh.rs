//! GitHub CLI adapter for the release host interface.
//!
//! All remote operations are delegated to the `gh` tool: `gh release view`
//! for existence queries, `gh release create` for publication, and
//! `gh release upload` for assets. The repository `gh` operates on is
//! whatever it resolves from the working directory. Commands run through
//! the [`CommandExecutor`] seam with the credential forwarded explicitly
//! in the child environment.

use crate::config::GITHUB_TOKEN_VAR;
use crate::error::StartupError;
use crate::exec::CommandExecutor;
use crate::host::{HostError, ReleaseDraft, ReleaseHost};
use crate::manifest::VersionId;
use camino::Utf8Path;
use std::process::Output;

/// The release host CLI command.
const GH_COMMAND: &str = "gh";

/// A [`ReleaseHost`] backed by the `gh` command-line tool.
pub struct GhClient<'e> {
    executor: &'e dyn CommandExecutor,
    token: String,
}

impl<'e> GhClient<'e> {
    /// Create a client that runs `gh` through `executor` with `token`
    /// forwarded as the `GITHUB_TOKEN` of every invocation.
    #[must_use]
    pub fn new(executor: &'e dyn CommandExecutor, token: String) -> Self {
        Self { executor, token }
    }

    /// Run `gh` with the configured credential in the child environment.
    fn run_gh(&self, args: &[&str]) -> std::io::Result<Output> {
        log::trace!("gh invocation: {}", args.join(" "));
        self.executor
            .run(GH_COMMAND, args, &[(GITHUB_TOKEN_VAR, &self.token)])
    }
}

impl ReleaseHost for GhClient<'_> {
    fn release_exists(&self, version: &VersionId) -> bool {
        let tag = version.tag();
        self.run_gh(&["release", "view", &tag])
            .is_ok_and(|output| output.status.success())
    }

    fn create_release(&self, draft: &ReleaseDraft) -> Result<String, HostError> {
        let output = self.run_gh(&[
            "release",
            "create",
            &draft.tag,
            "--title",
            &draft.title,
            "--notes",
            &draft.notes,
        ])?;
        if !output.status.success() {
            return Err(HostError::Rejected {
                detail: stderr_detail(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    fn upload_asset(&self, tag: &str, file: &Utf8Path) -> Result<(), HostError> {
        let output = self.run_gh(&["release", "upload", tag, file.as_str()])?;
        if !output.status.success() {
            return Err(HostError::Rejected {
                detail: stderr_detail(&output),
            });
        }
        Ok(())
    }
}

/// Probe `gh --version` and return a short tool identification string.
///
/// The returned string has the form `gh <version>` when the banner parses,
/// or the banner's first line verbatim otherwise.
///
/// # Errors
///
/// Returns [`StartupError::GhUnavailable`] if the tool cannot be spawned
/// or exits unsuccessfully.
pub fn probe_gh_version(executor: &dyn CommandExecutor) -> Result<String, StartupError> {
    let output = executor
        .run(GH_COMMAND, &["--version"], &[])
        .map_err(|source| StartupError::GhUnavailable {
            reason: source.to_string(),
        })?;

    if !output.status.success() {
        return Err(StartupError::GhUnavailable {
            reason: stderr_detail(&output),
        });
    }

    Ok(parse_version_banner(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

/// Condense the `gh --version` banner into `<tool> <version>`.
///
/// The banner's first line reads `gh version 2.40.0 (2024-01-01)`; the
/// second word is dropped. A banner with fewer than three words is
/// returned trimmed.
fn parse_version_banner(stdout: &str) -> String {
    let first_line = stdout.lines().next().unwrap_or_default();
    let mut words = first_line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(tool), Some(_), Some(version)) => format!("{tool} {version}"),
        _ => first_line.trim().to_owned(),
    }
}

/// Extract a trimmed stderr message from a command output.
fn stderr_detail(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}
