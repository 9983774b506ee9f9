//! Shared test utilities for the publisher crate.
//!
//! Provides a stub [`CommandExecutor`] that never spawns a process plus
//! canned `cargo metadata` documents, so publish flows can be exercised
//! end-to-end against a temporary registry.

use crate::error::Result;
use crate::executor::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::{Metadata, MetadataCommand};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a successful command `Output` carrying the given stdout.
#[must_use]
pub fn output_with_stdout(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
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
    /// The command to execute (e.g., "cargo").
    pub cmd: String,
    /// The arguments to pass to the command.
    pub args: Vec<String>,
    /// The working directory the command must run in.
    pub cwd: Utf8PathBuf,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Create an expectation from borrowed parts.
    #[must_use]
    pub fn new(cmd: &str, args: &[&str], cwd: &Utf8Path, result: Result<Output>) -> Self {
        Self {
            cmd: cmd.to_owned(),
            args: args.iter().map(|&a| a.to_owned()).collect(),
            cwd: cwd.to_owned(),
            result,
        }
    }
}

/// A stub implementation of [`CommandExecutor`] for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
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
    fn run(&self, cmd: &str, args: &[&str], cwd: &Utf8Path) -> Result<Output> {
        let mut expected = self.expected.borrow_mut();
        let call = expected.pop_front().expect("unexpected command invocation");

        assert_eq!(call.cmd, cmd);
        assert_eq!(call.args, args);
        assert_eq!(call.cwd, cwd);

        call.result
    }
}

/// Builds a realistic `cargo metadata --no-deps` document for one package.
///
/// `deps` is a JSON array in the shape cargo emits for the `dependencies`
/// field.
///
/// # Panics
///
/// Panics if the document fails to serialize, which cannot happen for
/// string inputs.
#[must_use]
pub fn metadata_json(name: &str, vers: &str, deps: serde_json::Value) -> String {
    let id = format!("path+file:///tmp/{name}#{vers}");
    let document = json!({
        "packages": [{
            "name": name,
            "version": vers,
            "id": &id,
            "license": null,
            "license_file": null,
            "description": null,
            "source": null,
            "dependencies": deps,
            "targets": [{
                "kind": ["lib"],
                "crate_types": ["lib"],
                "name": name,
                "src_path": format!("/tmp/{name}/src/lib.rs"),
                "edition": "2021",
                "doc": true,
                "doctest": true,
                "test": true
            }],
            "features": {},
            "manifest_path": format!("/tmp/{name}/Cargo.toml"),
            "metadata": null,
            "publish": null,
            "authors": [],
            "categories": [],
            "keywords": [],
            "readme": null,
            "repository": null,
            "homepage": null,
            "documentation": null,
            "edition": "2021",
            "links": null,
            "default_run": null,
            "rust_version": null
        }],
        "workspace_members": [&id],
        "workspace_default_members": [&id],
        "resolve": null,
        "target_directory": format!("/tmp/{name}/target"),
        "version": 1,
        "workspace_root": format!("/tmp/{name}"),
        "metadata": null
    });
    serde_json::to_string(&document).expect("fixture document serializes")
}

/// Parses a fixture document into a [`Metadata`] value.
///
/// # Panics
///
/// Panics if the document does not parse; fixtures are expected to be
/// well-formed.
#[must_use]
pub fn metadata_fixture(document: &str) -> Metadata {
    MetadataCommand::parse(document).expect("fixture metadata parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_returns_the_queued_result_for_a_matching_call() {
        let stub = StubExecutor::new(vec![ExpectedCall::new(
            "git",
            &["status"],
            Utf8Path::new("/registry"),
            Ok(success_output()),
        )]);

        let output = stub
            .run("git", &["status"], Utf8Path::new("/registry"))
            .expect("queued result");
        assert!(output.status.success());
        stub.assert_finished();
    }

    #[test]
    #[should_panic(expected = "unexpected command invocation")]
    fn stub_panics_when_no_call_is_queued() {
        let stub = StubExecutor::new(Vec::new());
        let _ = stub.run("git", &["status"], Utf8Path::new("/registry"));
    }

    #[test]
    #[should_panic]
    fn stub_panics_when_the_arguments_differ() {
        let stub = StubExecutor::new(vec![ExpectedCall::new(
            "git",
            &["status"],
            Utf8Path::new("/registry"),
            Ok(success_output()),
        )]);
        let _ = stub.run("git", &["log"], Utf8Path::new("/registry"));
    }

    #[test]
    #[should_panic(expected = "expected no further command invocations")]
    fn assert_finished_panics_on_unconsumed_calls() {
        let stub = StubExecutor::new(vec![ExpectedCall::new(
            "git",
            &["status"],
            Utf8Path::new("/registry"),
            Ok(success_output()),
        )]);
        stub.assert_finished();
    }
}
