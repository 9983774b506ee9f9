//! Version-control backend: staging and committing registry changes.
//!
//! All git invocations run in the registry root. Operations block until git
//! exits; failures surface the command line and captured stderr and abort
//! the publish. Nothing already written to the registry is rolled back.

use crate::error::{PublishError, Result};
use crate::executor::{CommandExecutor, display_command};
use camino::{Utf8Path, Utf8PathBuf};

/// Git backend scoped to a registry checkout.
pub struct GitBackend<'a> {
    executor: &'a dyn CommandExecutor,
    registry_root: &'a Utf8Path,
}

impl<'a> GitBackend<'a> {
    /// Create a backend running git through `executor` in `registry_root`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor, registry_root: &'a Utf8Path) -> Self {
        Self {
            executor,
            registry_root,
        }
    }

    /// Stage the given paths.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ExternalTool`] on a non-zero exit.
    pub fn add(&self, paths: &[&Utf8PathBuf]) -> Result<()> {
        let mut args = vec!["add"];
        args.extend(paths.iter().map(|p| p.as_str()));
        self.run_git(&args)
    }

    /// Create a commit with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ExternalTool`] on a non-zero exit.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_git(&["commit", "-m", message])
    }

    /// Run git in the registry root, failing on a non-zero exit.
    fn run_git(&self, args: &[&str]) -> Result<()> {
        let output = self.executor.run("git", args, self.registry_root)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PublishError::ExternalTool {
                command: display_command("git", args),
                stderr: stderr.trim().to_owned(),
            });
        }
        Ok(())
    }
}

/// Commit message used when publishing a version.
#[must_use]
pub fn publish_commit_message(name: &str, vers: &str) -> String {
    format!("updated crate {name} to version {vers}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, success_output};

    #[test]
    fn add_stages_all_paths_in_one_invocation() {
        let root = Utf8PathBuf::from("/registry");
        let artefact = Utf8PathBuf::from("/registry/crates/demo/demo-0.1.0.crate");
        let index = Utf8PathBuf::from("/registry/de/mo/demo");

        let executor = StubExecutor::new(vec![ExpectedCall::new(
            "git",
            &["add", artefact.as_str(), index.as_str()],
            &root,
            Ok(success_output()),
        )]);

        GitBackend::new(&executor, &root)
            .add(&[&artefact, &index])
            .expect("add succeeds");
        executor.assert_finished();
    }

    #[test]
    fn commit_failure_surfaces_the_stderr() {
        let root = Utf8PathBuf::from("/registry");
        let executor = StubExecutor::new(vec![ExpectedCall::new(
            "git",
            &["commit", "-m", "updated crate demo to version 0.1.0"],
            &root,
            Ok(failure_output("nothing to commit")),
        )]);

        let err = GitBackend::new(&executor, &root)
            .commit(&publish_commit_message("demo", "0.1.0"))
            .expect_err("non-zero exit");

        let msg = err.to_string();
        assert!(msg.contains("git commit"));
        assert!(msg.contains("nothing to commit"));
        executor.assert_finished();
    }

    #[test]
    fn publish_commit_message_names_crate_and_version() {
        assert_eq!(
            publish_commit_message("demo", "0.2.1"),
            "updated crate demo to version 0.2.1"
        );
    }
}
