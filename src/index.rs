//! Per-crate index file writer.
//!
//! Each crate's index file is a newline-delimited sequence of JSON entries,
//! one per published version. Writing is replace-by-version: the new entry's
//! line supersedes any existing line for the same version while every other
//! line is carried over byte-for-byte in its original order.
//!
//! This is a plain read-modify-write with no locking. Two publishers racing
//! on the same crate can lose an update; the registry is assumed to be
//! exclusively accessible to one invocation at a time.

use crate::entry::IndexEntry;
use crate::error::{PublishError, Result};
use camino::Utf8Path;
use serde::Deserialize;
use std::fs;
use std::io;

/// The one field the writer needs from an existing line.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    vers: String,
}

/// Write `entry` into the index file at `path`, replacing any existing line
/// for the same version.
///
/// Creates the file if it does not exist. The result is the retained lines
/// followed by the new entry's line, joined by `\n` with no trailing
/// newline.
///
/// # Errors
///
/// Returns [`PublishError::CorruptIndex`] if an existing line is not a valid
/// entry document, or [`PublishError::Io`] on read/write failure.
pub fn write_entry(path: &Utf8Path, entry: &IndexEntry) -> Result<()> {
    let mut lines = retained_lines(path, &entry.vers)?;
    lines.push(entry.to_index_line());
    fs::write(path, lines.join("\n"))?;
    log::debug!("wrote {} v{} to {path}", entry.name, entry.vers);
    Ok(())
}

/// Read the existing index lines, dropping any whose version equals `vers`.
///
/// A missing file is an empty index, not an error.
fn retained_lines(path: &Utf8Path, vers: &str) -> Result<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut retained = Vec::new();
    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }
        let probe: VersionProbe =
            serde_json::from_str(line).map_err(|err| PublishError::CorruptIndex {
                path: path.to_owned(),
                reason: err.to_string(),
            })?;
        if probe.vers != vers {
            retained.push(line.to_owned());
        }
    }
    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crate_name::CrateName;
    use crate::digest::Sha256Digest;
    use camino::Utf8PathBuf;
    use std::collections::BTreeMap;

    fn entry(vers: &str, cksum_byte: char) -> IndexEntry {
        IndexEntry {
            name: CrateName::from("demo"),
            vers: vers.to_owned(),
            deps: Vec::new(),
            cksum: Some(
                Sha256Digest::try_from(cksum_byte.to_string().repeat(64))
                    .expect("valid test digest"),
            ),
            features: BTreeMap::new(),
            yanked: false,
            links: None,
        }
    }

    fn index_path(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("demo")).expect("utf-8 temp path")
    }

    #[test]
    fn first_write_creates_a_single_line_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = index_path(&dir);

        write_entry(&path, &entry("0.1.0", 'a')).expect("first write");

        let contents = fs::read_to_string(&path).expect("file exists");
        assert_eq!(contents.lines().count(), 1);
        assert!(!contents.ends_with('\n'), "no trailing newline");
    }

    #[test]
    fn second_version_appends_after_the_first() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = index_path(&dir);

        write_entry(&path, &entry("0.1.0", 'a')).expect("first write");
        let first_line = fs::read_to_string(&path).expect("file exists");
        write_entry(&path, &entry("0.2.0", 'b')).expect("second write");

        let contents = fs::read_to_string(&path).expect("file exists");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().copied(), Some(first_line.as_str()));
        assert!(lines.get(1).is_some_and(|l| l.contains("\"0.2.0\"")));
    }

    #[test]
    fn republishing_replaces_only_the_matching_version() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = index_path(&dir);

        write_entry(&path, &entry("0.1.0", 'a')).expect("first write");
        write_entry(&path, &entry("0.2.0", 'b')).expect("second write");
        let before: Vec<String> = fs::read_to_string(&path)
            .expect("file exists")
            .lines()
            .map(ToOwned::to_owned)
            .collect();

        write_entry(&path, &entry("0.1.0", 'c')).expect("republish");

        let contents = fs::read_to_string(&path).expect("file exists");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "replace, not append");
        // The untouched 0.2.0 line is byte-identical and keeps its slot order
        // relative to other retained lines.
        assert_eq!(lines.first().copied(), before.get(1).map(String::as_str));
        assert!(
            lines
                .get(1)
                .is_some_and(|l| l.contains("\"0.1.0\"") && l.contains(&"c".repeat(64)))
        );
    }

    #[test]
    fn corrupt_line_aborts_the_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = index_path(&dir);
        fs::write(&path, "not json").expect("seed corrupt file");

        let err = write_entry(&path, &entry("0.1.0", 'a')).expect_err("corrupt index is fatal");
        assert!(matches!(err, PublishError::CorruptIndex { .. }));

        let contents = fs::read_to_string(&path).expect("file exists");
        assert_eq!(contents, "not json", "failed write leaves the file alone");
    }
}
