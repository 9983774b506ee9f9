//! Publish orchestration.
//!
//! Sequences the whole publish: build metadata → normalize → package →
//! checksum → index write → artefact copy → commit. Each step is fatal on
//! failure and nothing is undone afterwards; a failure after the index write
//! leaves the index updated but the artefact uncommitted, which a re-run
//! repairs at the index layer (replace-by-version) at the cost of a
//! redundant commit.

use crate::cargo::CargoBackend;
use crate::config::RegistryConfig;
use crate::digest::compute_sha256;
use crate::entry::IndexEntry;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::git::{GitBackend, publish_commit_message};
use crate::index::write_entry;
use crate::layout::RegistryLayout;
use crate::output::write_progress_line;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;

/// Settings for a publish run.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Suppress progress output.
    pub quiet: bool,
    /// Verbosity forwarded to cargo (repeat count of `-v`).
    pub verbosity: u8,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Name of the published crate.
    pub name: String,
    /// Version that was published.
    pub vers: String,
    /// Registry path of the copied artefact.
    pub artefact_file: Utf8PathBuf,
    /// Path of the updated index file.
    pub index_file: Utf8PathBuf,
}

/// Publisher for a single registry.
pub struct Publisher<'a> {
    config: &'a RegistryConfig,
    executor: &'a dyn CommandExecutor,
    options: PublishOptions,
}

impl<'a> Publisher<'a> {
    /// Create a publisher for `config`, running external tools through
    /// `executor`.
    #[must_use]
    pub fn new(
        config: &'a RegistryConfig,
        executor: &'a dyn CommandExecutor,
        options: PublishOptions,
    ) -> Self {
        Self {
            config,
            executor,
            options,
        }
    }

    /// Publish the crate at `crate_dir` into the registry.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from any step; see
    /// [`PublishError`](crate::error::PublishError) for the taxonomy.
    pub fn publish(&self, crate_dir: &Utf8Path, stderr: &mut dyn Write) -> Result<PublishOutcome> {
        let cargo = CargoBackend::new(self.executor);

        let metadata = cargo.metadata(crate_dir)?;
        let mut entry = IndexEntry::from_metadata(&metadata, &self.config.upstream)?;

        self.progress(
            stderr,
            format!(
                "packaging {}-{} in directory {crate_dir}",
                entry.name, entry.vers
            ),
        );

        cargo.package(crate_dir, self.options.verbosity)?;
        let built = cargo.artefact_path(crate_dir, entry.name.as_str(), &entry.vers)?;
        self.progress(stderr, format!("success, crate at {built}"));

        entry.cksum = Some(compute_sha256(&built)?);

        let layout = RegistryLayout::new(self.config.root());
        let index_dir = layout.index_dir(&entry.name)?;
        let crate_dir_in_registry = layout.crate_dir(&entry.name);
        fs::create_dir_all(&index_dir)?;
        fs::create_dir_all(&crate_dir_in_registry)?;

        let index_file = layout.index_file(&entry.name)?;
        write_entry(&index_file, &entry)?;
        self.progress(
            stderr,
            format!("wrote new version line to index file {index_file}"),
        );

        let artefact_file = layout.artefact_file(&entry.name, &entry.vers);
        fs::copy(&built, &artefact_file)?;
        self.progress(stderr, format!("wrote crate to {artefact_file}"));

        let git = GitBackend::new(self.executor, self.config.root());
        git.add(&[&artefact_file, &index_file])?;
        git.commit(&publish_commit_message(entry.name.as_str(), &entry.vers))?;

        Ok(PublishOutcome {
            name: entry.name.into_inner(),
            vers: entry.vers,
            artefact_file,
            index_file,
        })
    }

    fn progress(&self, stderr: &mut dyn Write, message: String) {
        if !self.options.quiet {
            write_progress_line(stderr, message);
        }
    }
}
