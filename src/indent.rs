//! Line indenting helpers
//!
//! These exist so archives can embed other archives (or other large nested
//! payloads) legibly: indent the inner document before storing it, unindent
//! after extracting. Round-trip holds for any prefix and data; it is the
//! caller's job to pick a prefix that does not already open lines of the
//! data.

/// Prefix the buffer start and every line after a newline with `prefix`.
pub fn indent(data: &[u8], prefix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + prefix.len());
    out.extend_from_slice(prefix);
    for &byte in data {
        out.push(byte);
        if byte == b'\n' {
            out.extend_from_slice(prefix);
        }
    }
    out
}

/// Strip `prefix` from the buffer start and from every line after a newline.
///
/// Inverse of [`indent`]: `unindent(indent(data, p), p) == data`. Lines that
/// do not carry the prefix are kept as they are.
pub fn unindent(data: &[u8], prefix: &[u8]) -> Vec<u8> {
    let mut rest = data;
    if rest.starts_with(prefix) {
        rest = &rest[prefix.len()..];
    }

    let mut out = Vec::with_capacity(rest.len());
    let mut i = 0;
    while i < rest.len() {
        let byte = rest[i];
        out.push(byte);
        i += 1;
        if byte == b'\n' && rest[i..].starts_with(prefix) {
            i += prefix.len();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        assert_eq!(indent(b"a\nb", b"  "), b"  a\n  b");
        assert_eq!(indent(b"a\nb\n", b"\t"), b"\ta\n\tb\n\t");
    }

    #[test]
    fn test_unindent() {
        assert_eq!(unindent(b"  a\n  b", b"  "), b"a\nb");
        // Unprefixed lines pass through untouched.
        assert_eq!(unindent(b"  a\nb", b"  "), b"a\nb");
    }

    #[test]
    fn test_indent_unindent_roundtrip() {
        let src = b"some\nXXindented\nstring";
        assert_eq!(unindent(&indent(src, b"XX"), b"XX"), src);
    }

    #[test]
    fn test_indent_unindent_roundtrip_trailing_newline() {
        let src = b"line\n";
        assert_eq!(unindent(&indent(src, b"> "), b"> "), src);
    }

    #[test]
    fn test_indent_empty_data() {
        assert_eq!(indent(b"", b"XX"), b"XX");
        assert_eq!(unindent(b"XX", b"XX"), b"");
    }

    #[test]
    fn test_empty_prefix_is_identity() {
        assert_eq!(indent(b"a\nb", b""), b"a\nb");
        assert_eq!(unindent(b"a\nb", b""), b"a\nb");
    }
}
