//! # textar
//!
//! A reversible text archive format: a set of named byte payloads packed
//! into one human-editable text stream, and back.
//!
//! Each file is encoded as `<SEP> <NAME>\n<CONTENT>`. SEP is a run of two or
//! more `=` signs at the start of a line; the run length of the first such
//! line fixes the separator for the whole archive. Anything before the first
//! separator is a free-form comment:
//!
//! ```text
//! Some comments here.
//!
//! === file1
//! file1 content.
//!
//! === file2
//! file2 content.
//! == file3
//! this is a textar within textar.
//! ```
//!
//! The separator here is `===`, so the archive contains `file1` and `file2`;
//! the `== file3` line is plain content inside `file2`.
//!
//! ## Dynamic separator length
//!
//! [`Encoder::encode`] scans the payloads and picks a separator run longer
//! than any marker run found at a line start, so any byte content encodes
//! and decodes perfectly without escaping. This is the whole trick of the
//! format: the separator length is a function of the worst collision in the
//! data.
//!
//! ## Lenient decoding
//!
//! [`Decoder::decode`] never fails. Input with no usable separator becomes a
//! zero-file archive whose comment is the raw input. Strictness is the
//! caller's job.
//!
//! ## Known quirk
//!
//! The encoder escapes newlines in names as the literal two characters `\n`,
//! but the decoder does not reverse the escape. A name containing a real
//! newline therefore does not round-trip unless the caller unescapes it.
//! This asymmetry is part of the format and is kept as is.

pub mod archive;
pub mod decoder;
pub mod encoder;
pub mod fs;
pub mod indent;

pub use archive::{Archive, File, DEFAULT_MARKER, MIN_RUN_LENGTH};
pub use decoder::Decoder;
pub use encoder::{run_length, Encoder};
pub use fs::MapFs;
pub use indent::{indent, unindent};
