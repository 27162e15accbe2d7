//! Bounded external command execution.
//!
//! All interaction with the release host happens through an external CLI
//! tool, so command execution sits behind a trait for dependency injection
//! in tests. The system implementation captures output and applies a
//! timeout to prevent hangs on network issues.

use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default timeout for release host commands (5 minutes).
///
/// Uploads of installer binaries can legitimately take a while on slow
/// links, so the bound is generous.
///
/// Output is drained only after the wait completes, so a child that fills
/// the OS pipe buffer (roughly 64 KiB) before exiting stalls until this
/// timeout kills it. The subcommands run here print a few lines at most.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Abstraction for running external commands.
///
/// The `env` pairs are set on the child process in addition to the
/// inherited environment, so credentials reach the child without mutating
/// the parent process state.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs a command with arguments and environment and returns the
    /// captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the
    /// command, including expiry of the execution timeout.
    fn run<'a>(
        &self,
        cmd: &str,
        args: &[&'a str],
        env: &[(&'a str, &'a str)],
    ) -> std::io::Result<Output>;
}

/// Executes commands on the host system with a bounded wait.
///
/// # Examples
///
/// ```no_run
/// use firebird_odbc_publisher::exec::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("gh", &["--version"], &[])?;
/// assert!(output.status.success());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
        log::trace!("running {cmd} with {} argument(s)", args.len());
        let mut child = Command::new(cmd)
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        match child.wait_timeout(COMMAND_TIMEOUT)? {
            Some(status) => {
                // Command completed within timeout - collect output
                let stdout = child
                    .stdout
                    .take()
                    .map(std::io::read_to_string)
                    .transpose()?
                    .unwrap_or_default();
                let stderr = child
                    .stderr
                    .take()
                    .map(std::io::read_to_string)
                    .transpose()?
                    .unwrap_or_default();

                Ok(Output {
                    status,
                    stdout: stdout.into_bytes(),
                    stderr: stderr.into_bytes(),
                })
            }
            None => {
                // Timeout - kill the process
                let _ = child.kill();
                let _ = child.wait();
                Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!(
                        "{cmd} timed out after {} seconds",
                        COMMAND_TIMEOUT.as_secs()
                    ),
                ))
            }
        }
    }
}
