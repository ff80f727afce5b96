//! Archive encoder
//!
//! Encoding is a pure function of the archive: pick a separator run length
//! that cannot collide with any payload, then emit each file as
//! `<separator><name>\n<data>`. It cannot fail for any in-memory archive.

use crate::archive::{normalize_marker, Archive, File, DEFAULT_MARKER, MIN_RUN_LENGTH};
use anyhow::{Context, Result};
use std::path::Path;

/// Compute the separator run length that is collision-free for these files.
///
/// Scans every payload once, tracking runs of the marker byte that start at a
/// line boundary. Any line-start run of length `k` forces the separator run
/// to be longer than `k`, so a payload line like `== x` can never be mistaken
/// for a separator. The start of a payload counts as a line boundary because
/// the encoded stream places it right after the name line's newline.
pub fn run_length(files: &[File], marker: u8) -> usize {
    let marker = normalize_marker(marker);
    let mut longest = 0usize;

    for file in files {
        // None means the current line can no longer hold a marker run.
        let mut run: Option<usize> = Some(0);
        for &byte in &file.data {
            if byte == b'\n' {
                run = Some(0);
            } else if byte == marker {
                if let Some(count) = run.as_mut() {
                    *count += 1;
                    longest = longest.max(*count);
                }
            } else {
                run = None;
            }
        }
    }

    (longest + 1).max(MIN_RUN_LENGTH)
}

/// Encodes an archive into textar format
#[derive(Debug, Clone)]
pub struct Encoder {
    marker: u8,
}

impl Encoder {
    /// Create a new encoder using the default `=` marker
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER,
        }
    }

    /// Override the marker byte.
    ///
    /// A newline or zero byte falls back to the default marker.
    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = normalize_marker(marker);
        self
    }

    /// Encode an archive to a fresh byte buffer
    pub fn encode(&self, archive: &Archive) -> Vec<u8> {
        self.encode_into(archive, Vec::new())
    }

    /// Encode an archive by appending to a caller-supplied buffer.
    ///
    /// Returns the buffer so callers can reuse its allocation across calls.
    /// An archive with zero files appends only the comment bytes.
    pub fn encode_into(&self, archive: &Archive, mut out: Vec<u8>) -> Vec<u8> {
        out.extend_from_slice(&archive.comment);
        if archive.is_empty() {
            return out;
        }

        let run = run_length(&archive.files, self.marker);

        // The full separator: newline, marker run, space.
        let mut separator = Vec::with_capacity(run + 2);
        separator.push(b'\n');
        separator.resize(run + 1, self.marker);
        separator.push(b' ');

        for file in &archive.files {
            if out.is_empty() {
                // The file must not start with a blank line, so the very
                // first separator drops its leading newline.
                out.extend_from_slice(&separator[1..]);
            } else {
                out.extend_from_slice(&separator);
            }
            out.extend_from_slice(escape_name(&file.name).as_bytes());
            out.push(b'\n');
            out.extend_from_slice(&file.data);
        }
        out
    }

    /// Encode an archive directly to a writer
    pub fn encode_to_writer<W: std::io::Write>(&self, archive: &Archive, mut writer: W) -> Result<()> {
        writer
            .write_all(&self.encode(archive))
            .context("Failed to write archive")?;
        Ok(())
    }

    /// Encode an archive to a file
    pub fn encode_to_file(&self, archive: &Archive, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode(archive))
            .with_context(|| format!("Failed to write archive: {}", path.display()))?;
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape literal newlines in a name as the two-character sequence `\n`.
///
/// The decoder does not reverse this escape; see the crate docs for the
/// round-trip caveat on names containing newlines.
fn escape_name(name: &str) -> std::borrow::Cow<'_, str> {
    if name.contains('\n') {
        std::borrow::Cow::Owned(name.replace('\n', "\\n"))
    } else {
        std::borrow::Cow::Borrowed(name)
    }
}
