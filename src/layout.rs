//! Registry path sharding.
//!
//! The on-disk layout mirrors the crates.io index convention so tooling that
//! expects that layout works unmodified: index files are fanned out across
//! nested directories derived from the crate name, bounding per-directory
//! entry counts for large registries, while artefacts live in a flat
//! `crates/{name}` tree.

use crate::crate_name::CrateName;
use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Maps crate names to directories under a registry root.
#[derive(Debug, Clone)]
pub struct RegistryLayout {
    root: Utf8PathBuf,
}

impl RegistryLayout {
    /// Create a layout rooted at the registry checkout.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The registry root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding the crate's packaged artefacts.
    ///
    /// Always `crates/{name}` regardless of name length.
    #[must_use]
    pub fn crate_dir(&self, name: &CrateName) -> Utf8PathBuf {
        self.root.join("crates").join(name.as_str())
    }

    /// Directory holding the crate's index file.
    ///
    /// Names of length 1 or 2 shard into a directory named by that length;
    /// length 3 into `3/{first char}`; longer names into
    /// `{first two chars}/{next two chars}`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidName`] for an empty name, or one whose
    /// sharding prefix does not fall on character boundaries. Neither is
    /// reachable from a valid manifest but must never be guessed at.
    pub fn index_dir(&self, name: &CrateName) -> Result<Utf8PathBuf> {
        let name = name.as_str();
        let shard = match name.len() {
            0 => return Err(invalid_name(name)),
            1 => Utf8PathBuf::from("1"),
            2 => Utf8PathBuf::from("2"),
            3 => {
                let first = name.get(..1).ok_or_else(|| invalid_name(name))?;
                Utf8PathBuf::from("3").join(first)
            }
            _ => {
                let prefix = name.get(..2).ok_or_else(|| invalid_name(name))?;
                let rest = name.get(2..4).ok_or_else(|| invalid_name(name))?;
                Utf8PathBuf::from(prefix).join(rest)
            }
        };
        Ok(self.root.join(shard))
    }

    /// Full path of the crate's index file.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidName`] for an empty name.
    pub fn index_file(&self, name: &CrateName) -> Result<Utf8PathBuf> {
        Ok(self.index_dir(name)?.join(name.as_str()))
    }

    /// Registry path of a version's packaged artefact.
    #[must_use]
    pub fn artefact_file(&self, name: &CrateName, vers: &str) -> Utf8PathBuf {
        self.crate_dir(name)
            .join(format!("{name}-{vers}.{ARTEFACT_EXT}"))
    }
}

fn invalid_name(name: &str) -> PublishError {
    PublishError::InvalidName {
        name: name.to_owned(),
    }
}

/// File extension of packaged artefacts.
pub const ARTEFACT_EXT: &str = "crate";
