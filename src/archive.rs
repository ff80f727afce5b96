//! Archive data structures

/// Default marker byte repeated to form separator runs.
pub const DEFAULT_MARKER: u8 = b'=';

/// Minimum number of marker bytes in a separator run.
pub const MIN_RUN_LENGTH: usize = 2;

/// Replace marker overrides that cannot form a valid separator.
///
/// A newline marker would collide with the line structure of the format and
/// the zero byte is the unset sentinel; both fall back to [`DEFAULT_MARKER`].
pub(crate) fn normalize_marker(marker: u8) -> u8 {
    if marker == 0 || marker == b'\n' {
        DEFAULT_MARKER
    } else {
        marker
    }
}

/// A single named payload in an archive.
///
/// The name is an arbitrary string; embedded newlines are escaped as the
/// literal two-character sequence `\n` when the archive is encoded. The data
/// is an arbitrary byte sequence, including empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Name of the file (may include subdirectories)
    pub name: String,
    /// Contents of the file
    pub data: Vec<u8>,
}

impl File {
    /// Create a new file with the given name and data
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// An ordered collection of files plus a free-form leading comment.
///
/// File order is meaningful and round-trips through encode/decode exactly.
/// The comment holds whatever bytes precede the first separator line; an
/// archive with zero files encodes to just its comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    /// Free-form bytes before the first separator line
    pub comment: Vec<u8>,
    /// Files in the archive, in insertion order
    pub files: Vec<File>,
}

impl Archive {
    /// Create a new empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an archive with a comment
    pub fn with_comment(comment: impl Into<Vec<u8>>) -> Self {
        Self {
            comment: comment.into(),
            files: Vec::new(),
        }
    }

    /// Append a file to the archive.
    ///
    /// Duplicate names are allowed; the format has no uniqueness rule and
    /// callers own any de-duplication policy.
    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Replace the payload of an existing name in place, or append a new file.
    ///
    /// An existing name keeps its position in the archive, so updating a
    /// single file produces a minimal diff of the encoded form.
    pub fn upsert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let name = name.into();
        match self.files.iter_mut().find(|f| f.name == name) {
            Some(file) => file.data = data.into(),
            None => self.files.push(File::new(name, data)),
        }
    }

    /// Look up a payload by name, returning the first match
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.data.as_slice())
    }

    /// Number of files in the archive
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the archive contains no files (it may still carry a comment)
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over the files in order
    pub fn iter(&self) -> std::slice::Iter<'_, File> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a File;
    type IntoIter = std::slice::Iter<'a, File>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl FromIterator<File> for Archive {
    fn from_iter<I: IntoIterator<Item = File>>(iter: I) -> Self {
        Self {
            comment: Vec::new(),
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut archive = Archive::new();
        archive.add_file(File::new("a", "1"));
        archive.add_file(File::new("b", "2"));
        archive.add_file(File::new("c", "3"));

        archive.upsert("b", "changed");

        assert_eq!(archive.len(), 3);
        assert_eq!(archive.files[1].name, "b");
        assert_eq!(archive.files[1].data, b"changed");
    }

    #[test]
    fn test_upsert_appends_new_name() {
        let mut archive = Archive::new();
        archive.add_file(File::new("a", "1"));

        archive.upsert("z", "new");

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.files[1].name, "z");
        assert_eq!(archive.files[1].data, b"new");
    }

    #[test]
    fn test_get() {
        let mut archive = Archive::new();
        archive.add_file(File::new("dir/file", "payload"));

        assert_eq!(archive.get("dir/file"), Some(b"payload".as_slice()));
        assert_eq!(archive.get("missing"), None);
    }

    #[test]
    fn test_normalize_marker() {
        assert_eq!(normalize_marker(b'='), b'=');
        assert_eq!(normalize_marker(b'#'), b'#');
        assert_eq!(normalize_marker(b'\n'), b'=');
        assert_eq!(normalize_marker(0), b'=');
    }

    #[test]
    fn test_from_iterator() {
        let archive: Archive = vec![File::new("a", "1"), File::new("b", "2")]
            .into_iter()
            .collect();
        assert_eq!(archive.len(), 2);
        assert!(archive.comment.is_empty());
    }
}
