//! Abstraction for running external commands.
//!
//! Both collaborators of the publisher — cargo and git — are
//! directory-scoped, so the executor takes a working directory alongside the
//! command and arguments. The orchestrator depends only on the trait,
//! allowing tests to substitute a stub that never spawns a process.

use crate::error::{PublishError, Result};
use camino::Utf8Path;
use std::process::{Command, Output};

/// Abstraction for running external commands in a working directory.
pub trait CommandExecutor {
    /// Runs a command with arguments in `cwd` and returns the captured
    /// output.
    ///
    /// Blocks until the command exits; there is no timeout, so a hung
    /// subprocess hangs the caller.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the
    /// command. A non-zero exit status is not an error at this layer; callers
    /// inspect `Output::status`.
    fn run(&self, cmd: &str, args: &[&str], cwd: &Utf8Path) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use stevedore::executor::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("cargo", &["--version"], Utf8Path::new("."))?;
/// assert!(output.status.success());
/// # Ok::<(), stevedore::error::PublishError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str], cwd: &Utf8Path) -> Result<Output> {
        Command::new(cmd)
            .args(args)
            .current_dir(cwd.as_std_path())
            .output()
            .map_err(PublishError::from)
    }
}

/// Formats a command and its arguments for error messages.
#[must_use]
pub fn display_command(cmd: &str, args: &[&str]) -> String {
    let mut line = String::from(cmd);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_joins_arguments_with_spaces() {
        let line = display_command("cargo", &["metadata", "--no-deps"]);
        assert_eq!(line, "cargo metadata --no-deps");
    }

    #[test]
    fn display_command_with_no_arguments_is_the_command() {
        assert_eq!(display_command("git", &[]), "git");
    }
}
