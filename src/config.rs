//! Registry configuration.
//!
//! The original tooling for this registry kept the root path and the upstream
//! index URL as process-wide constants. Here they are explicit configuration
//! passed into each component, so tests can run against a temporary registry
//! root without touching global state.

use camino::{Utf8Path, Utf8PathBuf};

/// The public upstream index that unpinned dependencies are assumed to
/// originate from.
///
/// Cargo resolves a dependency without an explicit `registry` against the
/// registry its index entry lives in, so every dependency published here is
/// pinned to this URL unless the manifest says otherwise.
pub const CRATES_IO_INDEX: &str = "https://github.com/rust-lang/crates.io-index";

/// Configuration for a single registry checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Root directory of the registry checkout.
    pub root: Utf8PathBuf,
    /// Index URL that unpinned dependencies are pinned to.
    pub upstream: String,
}

impl RegistryConfig {
    /// Create a configuration with the default upstream index.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            upstream: CRATES_IO_INDEX.to_owned(),
        }
    }

    /// Create a configuration with an explicit upstream index URL.
    #[must_use]
    pub fn with_upstream(root: impl Into<Utf8PathBuf>, upstream: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            upstream: upstream.into(),
        }
    }

    /// The registry root as a path.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_the_crates_io_upstream() {
        let config = RegistryConfig::new("/registry");
        assert_eq!(config.upstream, CRATES_IO_INDEX);
        assert_eq!(config.root(), Utf8Path::new("/registry"));
    }

    #[test]
    fn with_upstream_overrides_the_default() {
        let config = RegistryConfig::with_upstream("/registry", "https://example.com/index");
        assert_eq!(config.upstream, "https://example.com/index");
    }
}
