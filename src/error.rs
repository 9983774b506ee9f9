//! Error types for the stevedore publisher.
//!
//! Every error here is fatal: publishing is a one-shot, strictly sequential
//! operation with no retries and no rollback of steps that already completed.
//! Variants carry the captured diagnostics a user needs to see why the
//! failing step aborted.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing a crate into the registry.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The crate source directory does not exist.
    #[error("crate directory {path} does not exist")]
    MissingDirectory {
        /// Path that was expected to contain the crate source.
        path: Utf8PathBuf,
    },

    /// An external tool (cargo or git) exited non-zero.
    #[error("failed to run {command}: {stderr}")]
    ExternalTool {
        /// The full command line that was run.
        command: String,
        /// Captured standard error from the failed invocation.
        stderr: String,
    },

    /// The packaged artefact was absent after `cargo package` succeeded.
    #[error("{path} missing after packaging")]
    BuildIncomplete {
        /// Path where the artefact was expected.
        path: Utf8PathBuf,
    },

    /// The build metadata document contained no packages.
    #[error("build metadata contains no packages; nothing to publish")]
    InvalidPackage,

    /// The crate name cannot be mapped to a registry directory.
    #[error("invalid crate name {name:?}")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// The build metadata document could not be parsed.
    #[error("failed to parse cargo metadata: {reason}")]
    Metadata {
        /// Description of the parse failure.
        reason: String,
    },

    /// An existing index file contains a line that is not a valid entry.
    #[error("corrupt index file {path}: {reason}")]
    CorruptIndex {
        /// Path to the index file that failed to parse.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A checksum string is not a well-formed SHA-256 digest.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;
