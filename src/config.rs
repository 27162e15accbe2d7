//! Runtime configuration for a publishing run.
//!
//! Gathers the CLI arguments and the ambient credential into one explicit
//! value so nothing below the entrypoint reads the environment.

use crate::cli::Cli;
use crate::error::StartupError;
use camino::Utf8PathBuf;

/// Environment variable holding the release host credential.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Resolved configuration for one publishing run.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Path to the release manifest.
    pub manifest_path: Utf8PathBuf,
    /// Credential forwarded to every release host invocation.
    pub token: String,
    /// When true, suppress progress output.
    pub quiet: bool,
}

impl PublisherConfig {
    /// Combine parsed CLI arguments with a resolved credential.
    #[must_use]
    pub fn from_cli(cli: &Cli, token: String) -> Self {
        Self {
            manifest_path: cli.manifest.clone(),
            token,
            quiet: cli.quiet,
        }
    }
}

/// Read the credential from the environment.
///
/// # Errors
///
/// Returns [`StartupError::CredentialMissing`] when the variable is unset
/// or empty.
pub fn resolve_token() -> Result<String, StartupError> {
    match std::env::var(GITHUB_TOKEN_VAR) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(StartupError::CredentialMissing {
            variable: GITHUB_TOKEN_VAR,
        }),
    }
}
