//! Shared test utilities for the publisher crate.

use crate::exec::CommandExecutor;
use crate::host::{HostError, ReleaseDraft, ReleaseHost};
use crate::manifest::VersionId;
use camino::Utf8Path;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a successful command `Output` carrying the given stdout text.
pub fn success_output_with(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "gh").
    pub cmd: &'static str,
    /// The arguments to pass to the command.
    pub args: Vec<&'static str>,
    /// The environment variables the invocation must carry.
    pub env: Vec<(&'static str, &'static str)>,
    /// The result to return when this command is invoked.
    pub result: std::io::Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
        let mut expected = self.expected.borrow_mut();
        let call = expected.pop_front().expect("unexpected command invocation");

        assert_eq!(call.cmd, cmd);
        assert_eq!(call.args.as_slice(), args);
        assert_eq!(call.env.as_slice(), env);

        call.result
    }
}

/// A scripted in-memory release host recording every interaction.
///
/// Configure failures and pre-existing releases before the run, then
/// inspect what was queried, created, and uploaded afterwards.
#[derive(Debug, Default)]
pub struct RecordingHost {
    existing: Vec<String>,
    create_error: Option<String>,
    upload_failures: Vec<String>,
    created: Mutex<Vec<ReleaseDraft>>,
    uploaded: Mutex<Vec<(String, String)>>,
    exists_queries: Mutex<Vec<String>>,
}

impl RecordingHost {
    /// Creates a host with no existing releases and no scripted failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `version` as already released.
    pub fn mark_existing(&mut self, version: &str) {
        self.existing.push(version.to_owned());
    }

    /// Scripts every subsequent create call to fail with `detail`.
    pub fn fail_create_with(&mut self, detail: &str) {
        self.create_error = Some(detail.to_owned());
    }

    /// Scripts uploads of the named file to fail.
    pub fn fail_upload_of(&mut self, file_name: &str) {
        self.upload_failures.push(file_name.to_owned());
    }

    /// The drafts of every release created so far.
    pub fn created(&self) -> Vec<ReleaseDraft> {
        self.created.lock().expect("created lock").clone()
    }

    /// Every `(tag, file name)` pair uploaded so far, in order.
    pub fn uploaded(&self) -> Vec<(String, String)> {
        self.uploaded.lock().expect("uploaded lock").clone()
    }

    /// Every version queried for existence, in order.
    pub fn exists_queries(&self) -> Vec<String> {
        self.exists_queries.lock().expect("queries lock").clone()
    }
}

impl ReleaseHost for RecordingHost {
    fn release_exists(&self, version: &VersionId) -> bool {
        self.exists_queries
            .lock()
            .expect("queries lock")
            .push(version.as_str().to_owned());
        self.existing.iter().any(|v| v == version.as_str())
    }

    fn create_release(&self, draft: &ReleaseDraft) -> Result<String, HostError> {
        if let Some(detail) = &self.create_error {
            return Err(HostError::Rejected {
                detail: detail.clone(),
            });
        }
        self.created.lock().expect("created lock").push(draft.clone());
        Ok(format!("https://releases.example/{}", draft.tag))
    }

    fn upload_asset(&self, tag: &str, file: &Utf8Path) -> Result<(), HostError> {
        let name = file.file_name().unwrap_or_default().to_owned();
        if self.upload_failures.contains(&name) {
            return Err(HostError::Rejected {
                detail: format!("upload of {name} rejected"),
            });
        }
        self.uploaded
            .lock()
            .expect("uploaded lock")
            .push((tag.to_owned(), name));
        Ok(())
    }
}
