//! CLI argument definitions for the stevedore publisher.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Publish a crate into a git-backed local registry.
#[derive(Parser, Debug)]
#[command(name = "stevedore")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish a crate into a git-backed local registry.\n\n",
    "Stevedore packages the crate at the given path with cargo, records its ",
    "metadata and SHA-256 checksum in the registry's crates.io-style index, ",
    "copies the packaged artefact into the registry's content tree, and ",
    "commits both files.\n\n",
    "The commit is local: run `git push` in the registry afterwards to ",
    "publish it.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish the crate in ./mylib into the registry checkout at ~/registry:\n",
    "    $ stevedore --registry ~/registry ./mylib\n\n",
    "  Publish from inside the registry checkout itself:\n",
    "    $ stevedore ../mylib\n",
))]
pub struct Cli {
    /// Path to the crate source directory to publish.
    #[arg(value_name = "CRATE_DIR")]
    pub crate_dir: Utf8PathBuf,

    /// Registry checkout to publish into [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    pub registry: Option<Utf8PathBuf>,

    /// Index URL that unpinned dependencies are pinned to
    /// [default: the crates.io index].
    #[arg(long, value_name = "URL")]
    pub upstream: Option<String>,

    /// Increase cargo output verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// The registry root, defaulting to the current directory.
    #[must_use]
    pub fn registry_root(&self) -> Utf8PathBuf {
        self.registry
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from("."))
    }
}

impl Default for Cli {
    /// Creates a `Cli` instance publishing from the current directory with
    /// all flags disabled.
    ///
    /// This is useful for testing or programmatic construction where only
    /// specific fields need to be set.
    fn default() -> Self {
        Self {
            crate_dir: Utf8PathBuf::from("."),
            registry: None,
            upstream: None,
            verbosity: 0,
            quiet: false,
        }
    }
}
