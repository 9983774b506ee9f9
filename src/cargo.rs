//! Build backend: cargo invocations for metadata and packaging.
//!
//! Wraps the external build tool behind the injected
//! [`CommandExecutor`](crate::executor::CommandExecutor) so the orchestrator
//! can be exercised without spawning cargo.

use crate::error::{PublishError, Result};
use crate::executor::{CommandExecutor, display_command};
use crate::layout::ARTEFACT_EXT;
use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::{Metadata, MetadataCommand};

/// Arguments of the metadata command.
const METADATA_ARGS: [&str; 4] = ["metadata", "--no-deps", "--format-version", "1"];

/// Cargo build backend scoped to a crate source directory.
pub struct CargoBackend<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> CargoBackend<'a> {
    /// Create a backend that runs cargo through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Produce the crate's build metadata document.
    ///
    /// Runs `cargo metadata --no-deps` in `crate_dir` and parses the
    /// document from standard output.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingDirectory`] if `crate_dir` does not
    /// exist, [`PublishError::ExternalTool`] on a non-zero exit, and
    /// [`PublishError::Metadata`] if the output does not parse.
    pub fn metadata(&self, crate_dir: &Utf8Path) -> Result<Metadata> {
        let output = self.run_cargo(crate_dir, &METADATA_ARGS)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        MetadataCommand::parse(stdout).map_err(|err| PublishError::Metadata {
            reason: err.to_string(),
        })
    }

    /// Package the crate, materializing the artefact under
    /// `target/package`.
    ///
    /// Extra `-v` flags are forwarded for each verbosity level.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingDirectory`] if `crate_dir` does not
    /// exist and [`PublishError::ExternalTool`] on a non-zero exit.
    pub fn package(&self, crate_dir: &Utf8Path, verbosity: u8) -> Result<()> {
        let mut args = vec!["package"];
        for _ in 0..verbosity {
            args.push("-v");
        }
        self.run_cargo(crate_dir, &args)?;
        Ok(())
    }

    /// Locate the packaged artefact for `name` at `vers`.
    ///
    /// Cargo writes it to `target/package/{name}-{vers}.crate` inside the
    /// crate directory.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::BuildIncomplete`] if the artefact is absent.
    pub fn artefact_path(
        &self,
        crate_dir: &Utf8Path,
        name: &str,
        vers: &str,
    ) -> Result<Utf8PathBuf> {
        let path = crate_dir
            .join("target")
            .join("package")
            .join(format!("{name}-{vers}.{ARTEFACT_EXT}"));
        if !path.exists() {
            return Err(PublishError::BuildIncomplete { path });
        }
        Ok(path)
    }

    /// Run cargo in `crate_dir`, failing on a non-zero exit.
    fn run_cargo(&self, crate_dir: &Utf8Path, args: &[&str]) -> Result<std::process::Output> {
        if !crate_dir.exists() {
            return Err(PublishError::MissingDirectory {
                path: crate_dir.to_owned(),
            });
        }

        let output = self.executor.run("cargo", args, crate_dir)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PublishError::ExternalTool {
                command: display_command("cargo", args),
                stderr: stderr.trim().to_owned(),
            });
        }
        Ok(output)
    }
}
