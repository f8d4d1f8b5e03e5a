//! Tokenizer for the two delimiter families.
//!
//! Produces typed tokens with byte offsets into the original buffer, in
//! left-to-right order. Matches are non-overlapping: once a tag token is
//! recognized, scanning resumes after it, so a backtick inside an opening
//! tag's attribute span is not a separate token.

use bstr::ByteSlice;

/// The delimiter the token was matched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `<code ...>`, case-insensitive, attributes allowed.
    OpenTag,
    /// `</code>`, case-insensitive.
    CloseTag,
    /// A single backtick.
    Marker,
}

/// A delimiter match in the original (pre-replacement) buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset in the original buffer.
    pub offset: usize,
    /// Byte length of the matched delimiter text.
    pub len: usize,
}

impl Token {
    /// Byte offset of the first byte after the delimiter.
    pub(crate) fn end(self) -> usize {
        self.offset + self.len
    }
}

/// Scans `text` once and returns every delimiter token in order.
pub(crate) fn scan(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(found) = bytes[pos..].find_byteset(b"`<") {
        let at = pos + found;

        if bytes[at] == b'`' {
            tokens.push(Token {
                kind: TokenKind::Marker,
                offset: at,
                len: 1,
            });
            pos = at + 1;
        } else if let Some(end) = match_close_tag(bytes, at, b"code") {
            tokens.push(Token {
                kind: TokenKind::CloseTag,
                offset: at,
                len: end - at,
            });
            pos = end;
        } else if let Some(end) = match_open_tag(bytes, at, b"code") {
            tokens.push(Token {
                kind: TokenKind::OpenTag,
                offset: at,
                len: end - at,
            });
            pos = end;
        } else {
            pos = at + 1;
        }
    }

    tokens
}

/// Matches `</name>` at `at`, returning the offset just past the `>`.
pub(crate) fn match_close_tag(bytes: &[u8], at: usize, name: &[u8]) -> Option<usize> {
    let end = at + name.len() + 3;
    let tag = bytes.get(at..end)?;
    (tag[0] == b'<'
        && tag[1] == b'/'
        && tag[2..2 + name.len()].eq_ignore_ascii_case(name)
        && tag[tag.len() - 1] == b'>')
        .then_some(end)
}

/// Matches `<name`, any run of non-`>` bytes, then `>` at `at`, returning the
/// offset just past the `>`. Mirrors the `<name[^>]*>` pattern, including its
/// quirks: `<codex>` matches, and the attribute span may cross newlines.
pub(crate) fn match_open_tag(bytes: &[u8], at: usize, name: &[u8]) -> Option<usize> {
    if *bytes.get(at)? != b'<' {
        return None;
    }
    let head = bytes.get(at + 1..at + 1 + name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    let close = bytes[at + 1 + name.len()..].find_byte(b'>')?;
    Some(at + 1 + name.len() + close + 1)
}
