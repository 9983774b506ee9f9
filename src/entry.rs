//! Canonical index-entry schema and the metadata normalizer.
//!
//! A registry index file holds one JSON document per line, one line per
//! published version. The schema here is the fixed field set the index
//! format recognizes; normalization reduces a raw `cargo metadata` document
//! to it, discarding everything else and defaulting the optional fields.

use crate::crate_name::CrateName;
use crate::digest::Sha256Digest;
use crate::error::{PublishError, Result};
use cargo_metadata::{Dependency, DependencyKind, Metadata, Package};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One version's canonical metadata record in a crate's index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Crate name.
    pub name: CrateName,
    /// Version string of this entry.
    pub vers: String,
    /// Direct dependencies, normalized.
    pub deps: Vec<IndexDependency>,
    /// Hex SHA-256 of the packaged artefact.
    ///
    /// Unset until the artefact exists on disk; a fresh entry is normalized
    /// first and gains its checksum once `cargo package` has produced the
    /// file to hash.
    pub cksum: Option<Sha256Digest>,
    /// Feature flags and the features each one enables.
    pub features: BTreeMap<String, Vec<String>>,
    /// Whether this version has been yanked. Always `false` on publish.
    pub yanked: bool,
    /// Native-library link name, if the crate declares one.
    pub links: Option<String>,
}

/// A normalized dependency within an [`IndexEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDependency {
    /// Name the dependency is referred to by in the manifest. For renamed
    /// dependencies this is the rename; the real crate name goes in
    /// `package`.
    pub name: String,
    /// Version requirement.
    pub req: String,
    /// Features requested from the dependency.
    pub features: Vec<String>,
    /// Whether the dependency is optional.
    pub optional: bool,
    /// Whether default features are enabled. Defaults to `true` when the
    /// source document omits it.
    #[serde(default = "default_features_default")]
    pub default_features: bool,
    /// Target cfg constraint, if any.
    pub target: Option<String>,
    /// Dependency kind: `"normal"`, `"dev"`, or `"build"`.
    pub kind: Option<String>,
    /// Index URL of the registry the dependency resolves against. Never left
    /// unset by normalization: an unpinned dependency would resolve against
    /// this registry by cargo's convention.
    pub registry: Option<String>,
    /// Real crate name of a renamed dependency.
    pub package: Option<String>,
}

const fn default_features_default() -> bool {
    true
}

impl IndexEntry {
    /// Normalize a `cargo metadata --no-deps` document into a canonical
    /// entry for its first package.
    ///
    /// The checksum is left unset; [`yanked`](Self::yanked) is always
    /// `false` because a fresh publish is never yanked. Every dependency
    /// without an explicit registry is pinned to `upstream`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidPackage`] if the document contains no
    /// packages.
    pub fn from_metadata(metadata: &Metadata, upstream: &str) -> Result<Self> {
        let package = metadata
            .packages
            .first()
            .ok_or(PublishError::InvalidPackage)?;
        Ok(Self::from_package(package, upstream))
    }

    /// Normalize a single package record.
    #[must_use]
    pub fn from_package(package: &Package, upstream: &str) -> Self {
        let deps = package
            .dependencies
            .iter()
            .map(|dep| IndexDependency::from_cargo(dep, upstream))
            .collect();

        log::debug!(
            "normalized {} v{} with {} dependencies",
            package.name,
            package.version,
            package.dependencies.len()
        );

        Self {
            name: CrateName::from(package.name.to_string()),
            vers: package.version.to_string(),
            deps,
            cksum: None,
            features: package.features.clone(),
            yanked: false,
            links: package.links.clone(),
        }
    }

    /// Serialize the entry as a single index line.
    ///
    /// # Panics
    ///
    /// Never in practice: the entry contains no non-string map keys and no
    /// non-serializable values.
    #[must_use]
    pub fn to_index_line(&self) -> String {
        serde_json::to_string(self).expect("index entries serialize to JSON")
    }
}

impl IndexDependency {
    /// Normalize one `cargo metadata` dependency record.
    ///
    /// Retains only the recognized field set. A renamed dependency keeps the
    /// in-manifest name in `name` and records the real crate name in
    /// `package`, per the index convention. A dependency without an explicit
    /// registry is pinned to `upstream`.
    #[must_use]
    pub fn from_cargo(dep: &Dependency, upstream: &str) -> Self {
        let (name, package) = match &dep.rename {
            Some(rename) => (rename.clone(), Some(dep.name.to_string())),
            None => (dep.name.to_string(), None),
        };

        let kind = match dep.kind {
            DependencyKind::Development => "dev",
            DependencyKind::Build => "build",
            _ => "normal",
        };

        Self {
            name,
            req: dep.req.to_string(),
            features: dep.features.clone(),
            optional: dep.optional,
            default_features: dep.uses_default_features,
            target: dep.target.as_ref().map(ToString::to_string),
            kind: Some(kind.to_owned()),
            registry: dep
                .registry
                .clone()
                .or_else(|| Some(upstream.to_owned())),
            package,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CRATES_IO_INDEX;
    use crate::test_utils::{metadata_fixture, metadata_json};
    use serde_json::json;

    #[test]
    fn empty_metadata_is_an_invalid_package() {
        let mut metadata = metadata_fixture(&metadata_json("demo", "0.1.0", json!([])));
        metadata.packages.clear();
        let err = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX)
            .expect_err("no packages means nothing to publish");
        assert!(matches!(err, PublishError::InvalidPackage));
    }

    #[test]
    fn normalization_copies_version_and_clears_publish_state() {
        let metadata = metadata_fixture(&metadata_json("demo", "1.2.3", json!([])));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        assert_eq!(entry.name, CrateName::from("demo"));
        assert_eq!(entry.vers, "1.2.3");
        assert!(!entry.yanked);
        assert!(entry.cksum.is_none());
        assert!(entry.links.is_none());
    }

    #[test]
    fn unpinned_dependency_is_pinned_to_the_upstream_registry() {
        let deps = json!([{
            "name": "serde",
            "source": "registry+https://github.com/rust-lang/crates.io-index",
            "req": "^1.0",
            "kind": null,
            "rename": null,
            "optional": false,
            "uses_default_features": true,
            "features": [],
            "target": null,
            "registry": null
        }]);
        let metadata = metadata_fixture(&metadata_json("demo", "0.1.0", deps));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        let dep = entry.deps.first().expect("one dependency");
        assert_eq!(dep.registry.as_deref(), Some(CRATES_IO_INDEX));
        assert_eq!(dep.kind.as_deref(), Some("normal"));
        assert!(dep.default_features);
    }

    #[test]
    fn explicit_registry_is_preserved() {
        let deps = json!([{
            "name": "internal-util",
            "source": null,
            "req": "^0.3",
            "kind": null,
            "rename": null,
            "optional": false,
            "uses_default_features": false,
            "features": ["extras"],
            "target": null,
            "registry": "https://example.com/private-index"
        }]);
        let metadata = metadata_fixture(&metadata_json("demo", "0.1.0", deps));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        let dep = entry.deps.first().expect("one dependency");
        assert_eq!(
            dep.registry.as_deref(),
            Some("https://example.com/private-index")
        );
        assert!(!dep.default_features);
        assert_eq!(dep.features, vec!["extras".to_owned()]);
    }

    #[test]
    fn renamed_dependency_records_the_real_name_in_package() {
        let deps = json!([{
            "name": "serde",
            "source": "registry+https://github.com/rust-lang/crates.io-index",
            "req": "^1.0",
            "kind": null,
            "rename": "serde_renamed",
            "optional": false,
            "uses_default_features": true,
            "features": [],
            "target": null,
            "registry": null
        }]);
        let metadata = metadata_fixture(&metadata_json("demo", "0.1.0", deps));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        let dep = entry.deps.first().expect("one dependency");
        assert_eq!(dep.name, "serde_renamed");
        assert_eq!(dep.package.as_deref(), Some("serde"));
    }

    #[test]
    fn dev_and_build_kinds_are_spelled_out() {
        let deps = json!([
            {
                "name": "rstest",
                "source": "registry+https://github.com/rust-lang/crates.io-index",
                "req": "^0.26",
                "kind": "dev",
                "rename": null,
                "optional": false,
                "uses_default_features": true,
                "features": [],
                "target": null,
                "registry": null
            },
            {
                "name": "cc",
                "source": "registry+https://github.com/rust-lang/crates.io-index",
                "req": "^1.0",
                "kind": "build",
                "rename": null,
                "optional": false,
                "uses_default_features": true,
                "features": [],
                "target": null,
                "registry": null
            }
        ]);
        let metadata = metadata_fixture(&metadata_json("demo", "0.1.0", deps));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        let kinds: Vec<_> = entry.deps.iter().map(|d| d.kind.as_deref()).collect();
        assert_eq!(kinds, vec![Some("dev"), Some("build")]);
    }

    #[test]
    fn index_line_round_trips_through_serde() {
        let metadata = metadata_fixture(&metadata_json("demo", "0.1.0", json!([])));
        let entry = IndexEntry::from_metadata(&metadata, CRATES_IO_INDEX).expect("one package");

        let line = entry.to_index_line();
        assert!(!line.contains('\n'), "index lines must be single lines");

        let parsed: IndexEntry = serde_json::from_str(&line).expect("line parses back");
        assert_eq!(parsed, entry);
    }

    #[test]
    fn absent_default_features_deserializes_to_true() {
        let line = json!({
            "name": "old",
            "req": "^1",
            "features": [],
            "optional": false,
            "target": null,
            "kind": "normal",
            "registry": CRATES_IO_INDEX,
            "package": null
        });
        let dep: IndexDependency =
            serde_json::from_value(line).expect("entry without default_features parses");
        assert!(dep.default_features);
    }
}
