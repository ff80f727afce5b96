//! Archive decoder
//!
//! Decoding is total: any byte buffer produces an archive. Malformed input
//! never errors, it degrades to a zero-file archive carrying the raw input as
//! its comment. Callers that require entries must check for an empty result
//! themselves.

use crate::archive::{normalize_marker, Archive, File, DEFAULT_MARKER};
use anyhow::{Context, Result};
use std::path::Path;

/// Decodes a textar archive
#[derive(Debug, Clone)]
pub struct Decoder {
    marker: u8,
    keep_comment_entries: bool,
}

impl Decoder {
    /// Create a new decoder using the default `=` marker
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            keep_comment_entries: false,
        }
    }

    /// Override the marker byte, matching the encoder's override.
    ///
    /// A newline or zero byte falls back to the default marker.
    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = normalize_marker(marker);
        self
    }

    /// Keep files whose name is empty or starts with `#`.
    ///
    /// Such files are annotations inside the archive and are dropped by
    /// default.
    pub fn with_keep_comment_entries(mut self, keep: bool) -> Self {
        self.keep_comment_entries = keep;
        self
    }

    /// Decode an archive from a byte buffer. Never fails.
    ///
    /// The separator is discovered from the first doubled-marker line: the
    /// run length read there is fixed for the whole parse. Input without any
    /// usable separator becomes a zero-file archive whose comment is the
    /// entire input.
    pub fn decode(&self, data: &[u8]) -> Archive {
        let marker = self.marker;
        let mut archive = Archive::new();

        // Too short to contain a "XX " separator.
        if data.len() <= 2 {
            archive.comment = data.to_vec();
            return archive;
        }

        // Find the first separator line and split off the comment.
        let mut p: &[u8];
        if data[0] == marker && data[1] == marker {
            p = &data[2..];
        } else {
            match find(data, &[b'\n', marker, marker]) {
                Some(pos) => {
                    archive.comment = data[..pos].to_vec();
                    p = &data[pos + 3..];
                }
                None => {
                    // No separator anywhere, the whole input is a comment.
                    archive.comment = data.to_vec();
                    return archive;
                }
            }
        }

        // Read the rest of the marker run to fix the separator length.
        let mut run = 2;
        while let Some((&byte, rest)) = p.split_first() {
            if byte != marker {
                break;
            }
            run += 1;
            p = rest;
        }
        if p.first() != Some(&b' ') {
            // Marker run not followed by a space, treat everything as a
            // comment rather than guessing.
            archive.comment = data.to_vec();
            return archive;
        }
        p = &p[1..];

        let mut separator = Vec::with_capacity(run + 2);
        separator.push(b'\n');
        separator.resize(run + 1, marker);
        separator.push(b' ');

        // Split the remainder into (name, payload) pairs on the fixed
        // separator. The last payload runs to the end of the buffer.
        loop {
            let Some(nl) = p.iter().position(|&b| b == b'\n') else {
                break;
            };
            let name = String::from_utf8_lossy(&p[..nl]).into_owned();
            p = &p[nl + 1..];

            let payload = match find(p, &separator) {
                Some(pos) => {
                    let payload = &p[..pos];
                    p = &p[pos + separator.len()..];
                    payload
                }
                None => {
                    let payload = p;
                    p = &[];
                    payload
                }
            };
            archive.files.push(File::new(name, payload));
        }

        if !self.keep_comment_entries {
            archive
                .files
                .retain(|f| !f.name.is_empty() && !f.name.starts_with('#'));
        }
        archive
    }

    /// Decode the named file as an archive.
    ///
    /// Only the read can fail; the parse itself is total.
    pub fn decode_file(&self, path: &Path) -> Result<Archive> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read archive: {}", path.display()))?;
        Ok(self.decode(&data))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// First occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
