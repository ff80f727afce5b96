//! Read-only virtual filesystem over archive contents
//!
//! A helper for tests that want to consume an archive's files by path
//! without touching the real filesystem. Not part of the codec itself.

use crate::archive::Archive;
use std::collections::HashMap;

/// A read-only map from file names to payloads.
///
/// Leading slashes are stripped from names so absolute-looking entries are
/// addressable with relative paths. With duplicate names the last entry wins,
/// matching map semantics.
#[derive(Debug, Clone, Default)]
pub struct MapFs {
    entries: HashMap<String, Vec<u8>>,
}

impl MapFs {
    /// Read a file's payload by path
    pub fn read(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(|d| d.as_slice())
    }

    /// Whether a file exists at the given path
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All paths, sorted for deterministic iteration
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl From<&Archive> for MapFs {
    fn from(archive: &Archive) -> Self {
        let mut entries = HashMap::with_capacity(archive.len());
        for file in archive {
            let name = file.name.trim_start_matches('/').to_string();
            entries.insert(name, file.data.clone());
        }
        Self { entries }
    }
}
