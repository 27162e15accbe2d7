//! Behaviour-driven tests for the GitHub CLI release host adapter.
//!
//! Every scenario scripts the exact command invocations the adapter is
//! expected to make, including the credential forwarded in the child
//! environment, and asserts on the mapped result.

use camino::Utf8Path;
use firebird_odbc_publisher::config::GITHUB_TOKEN_VAR;
use firebird_odbc_publisher::error::StartupError;
use firebird_odbc_publisher::gh::{GhClient, probe_gh_version};
use firebird_odbc_publisher::host::{HostError, ReleaseHost};
use firebird_odbc_publisher::manifest::VersionId;
use firebird_odbc_publisher::publish::draft_for;
use firebird_odbc_publisher::test_utils::{
    ExpectedCall, StubExecutor, failure_output, success_output, success_output_with,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const TOKEN: &str = "test-token";

const RELEASE_NOTES: &str = "Firebird ODBC Driver version 2.0.5\n\
    \n\
    This release contains:\n\
    - Windows x86 (32-bit) installer\n\
    - Windows x64 (64-bit) installer\n\
    \n\
    Original distribution repackaged for easier access via GitHub API.";

const CREATE_ARGS: [&str; 7] = [
    "release",
    "create",
    "v2.0.5",
    "--title",
    "Firebird ODBC Driver 2.0.5",
    "--notes",
    RELEASE_NOTES,
];

const UPLOAD_ARGS: [&str; 4] = [
    "release",
    "upload",
    "v2.0.5",
    "/staging/firebird_odbc_x64.exe",
];

#[derive(Default)]
struct GhWorld {
    calls: Vec<ExpectedCall>,
    exists: Option<bool>,
    creation: Option<Result<String, HostError>>,
    upload: Option<Result<(), HostError>>,
    probe: Option<Result<String, StartupError>>,
}

#[fixture]
fn world() -> GhWorld {
    GhWorld::default()
}

fn launch_failure() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory")
}

#[given("the release view command succeeds")]
fn given_view_succeeds(world: &mut GhWorld) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: vec!["release", "view", "v2.0.5"],
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(success_output()),
    });
}

#[given("the release view command reports no release")]
fn given_view_reports_absent(world: &mut GhWorld) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: vec!["release", "view", "v2.0.5"],
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(failure_output("release not found\n")),
    });
}

#[given("the release view command cannot be launched")]
fn given_view_launch_fails(world: &mut GhWorld) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: vec!["release", "view", "v2.0.5"],
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Err(launch_failure()),
    });
}

#[given("the release create command succeeds with confirmation \"{url}\"")]
fn given_create_succeeds(world: &mut GhWorld, url: String) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: CREATE_ARGS.to_vec(),
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(success_output_with(&format!("{url}\n"))),
    });
}

#[given("the release create command is rejected with \"{detail}\"")]
fn given_create_rejected(world: &mut GhWorld, detail: String) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: CREATE_ARGS.to_vec(),
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(failure_output(&format!("{detail}\n"))),
    });
}

#[given("the release upload command succeeds")]
fn given_upload_succeeds(world: &mut GhWorld) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: UPLOAD_ARGS.to_vec(),
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(success_output()),
    });
}

#[given("the release upload command is rejected with \"{detail}\"")]
fn given_upload_rejected(world: &mut GhWorld, detail: String) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: UPLOAD_ARGS.to_vec(),
        env: vec![(GITHUB_TOKEN_VAR, TOKEN)],
        result: Ok(failure_output(&format!("{detail}\n"))),
    });
}

#[given("the version command reports \"{banner}\"")]
fn given_version_banner(world: &mut GhWorld, banner: String) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: vec!["--version"],
        env: Vec::new(),
        result: Ok(success_output_with(&format!(
            "{banner}\nhttps://github.com/cli/cli/releases/tag/v2.40.1\n"
        ))),
    });
}

#[given("the version command cannot be launched")]
fn given_version_launch_fails(world: &mut GhWorld) {
    world.calls.push(ExpectedCall {
        cmd: "gh",
        args: vec!["--version"],
        env: Vec::new(),
        result: Err(launch_failure()),
    });
}

#[when("the existence of release \"{version}\" is queried")]
fn when_existence_queried(world: &mut GhWorld, version: String) {
    let executor = StubExecutor::new(std::mem::take(&mut world.calls));
    let client = GhClient::new(&executor, TOKEN.to_owned());
    let version = VersionId::try_from(version).expect("valid version");
    world.exists = Some(client.release_exists(&version));
    executor.assert_finished();
}

#[when("release \"{version}\" is created from its draft")]
fn when_release_created(world: &mut GhWorld, version: String) {
    let executor = StubExecutor::new(std::mem::take(&mut world.calls));
    let client = GhClient::new(&executor, TOKEN.to_owned());
    let version = VersionId::try_from(version).expect("valid version");
    let draft = draft_for(&version);
    world.creation = Some(client.create_release(&draft));
    executor.assert_finished();
}

#[when("asset \"{path}\" is uploaded to \"{tag}\"")]
fn when_asset_uploaded(world: &mut GhWorld, path: String, tag: String) {
    let executor = StubExecutor::new(std::mem::take(&mut world.calls));
    let client = GhClient::new(&executor, TOKEN.to_owned());
    world.upload = Some(client.upload_asset(&tag, Utf8Path::new(&path)));
    executor.assert_finished();
}

#[when("the tool version is probed")]
fn when_version_probed(world: &mut GhWorld) {
    let executor = StubExecutor::new(std::mem::take(&mut world.calls));
    world.probe = Some(probe_gh_version(&executor));
    executor.assert_finished();
}

#[then("the release is reported as existing")]
fn then_release_exists(world: &mut GhWorld) {
    assert_eq!(world.exists, Some(true));
}

#[then("the release is reported as absent")]
fn then_release_absent(world: &mut GhWorld) {
    assert_eq!(world.exists, Some(false));
}

#[then("the creation confirmation is \"{url}\"")]
fn then_creation_confirmation(world: &mut GhWorld, url: String) {
    let creation = world.creation.as_ref().expect("creation attempted");
    assert_eq!(creation.as_ref().ok(), Some(&url));
}

#[then("the creation is rejected with \"{detail}\"")]
fn then_creation_rejected(world: &mut GhWorld, detail: String) {
    let creation = world.creation.as_ref().expect("creation attempted");
    match creation {
        Err(HostError::Rejected { detail: actual }) => assert_eq!(actual, &detail),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[then("the upload is accepted")]
fn then_upload_accepted(world: &mut GhWorld) {
    let upload = world.upload.as_ref().expect("upload attempted");
    assert!(upload.is_ok(), "expected accepted upload, got {upload:?}");
}

#[then("the upload is rejected with \"{detail}\"")]
fn then_upload_rejected(world: &mut GhWorld, detail: String) {
    let upload = world.upload.as_ref().expect("upload attempted");
    match upload {
        Err(HostError::Rejected { detail: actual }) => assert_eq!(actual, &detail),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[then("the probe reports \"{banner}\"")]
fn then_probe_reports(world: &mut GhWorld, banner: String) {
    let probe = world.probe.as_ref().expect("probe attempted");
    assert_eq!(probe.as_ref().ok(), Some(&banner));
}

#[then("the probe fails with \"{text}\"")]
fn then_probe_fails(world: &mut GhWorld, text: String) {
    let probe = world.probe.as_ref().expect("probe attempted");
    let err = probe.as_ref().err().expect("expected probe to fail");
    let message = err.to_string();
    assert!(
        message.contains(&text),
        "expected {message:?} to contain {text:?}"
    );
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "An existing release is detected"
)]
fn scenario_existing_release(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "A missing release is reported as absent"
)]
fn scenario_missing_release(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "A launch failure reads as absent"
)]
fn scenario_launch_failure(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "Creating a release sends the draft and returns the confirmation"
)]
fn scenario_create_release(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "A rejected creation carries the command detail"
)]
fn scenario_create_rejected(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "Uploading an asset targets the release tag"
)]
fn scenario_upload_asset(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "A rejected upload carries the command detail"
)]
fn scenario_upload_rejected(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "The version banner is condensed to tool and version"
)]
fn scenario_version_banner(world: GhWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/gh_adapter.feature",
    name = "A missing CLI tool is a startup failure"
)]
fn scenario_version_unavailable(world: GhWorld) {
    let _ = world;
}
