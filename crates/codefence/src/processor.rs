//! The scan-and-rewrite pass over one comment.
//!
//! Token offsets stay in original-buffer coordinates for the whole pass; the
//! running `offset` ledger translates them into current-buffer coordinates at
//! splice time, so earlier replacements never invalidate later tokens.

#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use bstr::ByteSlice;

use crate::{
    format::prepare_code_block,
    options::ProcessorOptions,
    scanner::{self, Token, TokenKind},
};

/// Where the currently open block started, in original coordinates.
///
/// `block_start` covers the opening delimiter; `body_start` is the first byte
/// after it.
#[derive(Debug, Clone, Copy)]
struct AnchorPoint {
    block_start: usize,
    body_start: usize,
}

/// Owns one comment's text and rewrites every detected code block in place.
///
/// Construct it with the raw text, call [`parse_code_blocks`], optionally
/// call [`strip_pre_tags`], then read the result back out. Every input string
/// is valid input; malformed markup is resolved by policy, never rejected.
///
/// [`parse_code_blocks`]: Self::parse_code_blocks
/// [`strip_pre_tags`]: Self::strip_pre_tags
#[derive(Debug)]
pub struct CodeBlockProcessor {
    buffer: String,
    options: ProcessorOptions,
    /// Accumulated length delta of all replacements so far.
    offset: isize,
    anchor: Option<AnchorPoint>,
}

impl CodeBlockProcessor {
    /// Creates a processor owning `text`.
    pub fn new(text: impl Into<String>, options: ProcessorOptions) -> Self {
        Self {
            buffer: text.into(),
            options,
            offset: 0,
            anchor: None,
        }
    }

    /// The processed text so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Consumes the processor, returning the final text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.buffer
    }

    /// Detects every code block and replaces it with its formatted version.
    ///
    /// Returns `true` if at least one block was found and replaced, `false`
    /// if the text contains no usable delimiters (the buffer is then left
    /// exactly as it was).
    pub fn parse_code_blocks(&mut self) -> bool {
        let tokens = scanner::scan(&self.buffer);
        if tokens.is_empty() {
            return false;
        }

        let original_len = self.buffer.len();

        let mut open_tag_depth = 0_usize;
        let mut tag_is_open = false;
        let mut marker_is_open = false;
        let mut last_open_tag_pos: Option<usize> = None;
        let mut last_close_token: Option<Token> = None;

        for token in tokens {
            match token.kind {
                TokenKind::Marker => {
                    // Tags take precedence: markers inside an open tag-block
                    // are literal text.
                    if tag_is_open {
                        continue;
                    }

                    if marker_is_open {
                        self.replace_code_block(token.offset, token.len);
                    } else {
                        self.set_anchor(token);
                    }
                    marker_is_open = !marker_is_open;
                }
                TokenKind::OpenTag => {
                    // No nesting across delimiter families.
                    if marker_is_open {
                        continue;
                    }

                    last_open_tag_pos = Some(token.offset);
                    open_tag_depth += 1;

                    // Nested opens only deepen; the block is defined by the
                    // outermost pair.
                    if open_tag_depth == 1 {
                        tag_is_open = true;
                        self.set_anchor(token);
                    }
                }
                TokenKind::CloseTag => {
                    // Stray closer.
                    if open_tag_depth == 0 {
                        continue;
                    }

                    last_close_token = Some(token);
                    open_tag_depth -= 1;

                    if open_tag_depth == 0 {
                        tag_is_open = false;
                        self.replace_code_block(token.offset, token.len);
                    }
                }
            }
        }

        // Tokens existed but none ever opened a block (e.g. all strays).
        if self.anchor.is_none() {
            return false;
        }

        // Malformed markup: an unbalanced closing tag later in the text than
        // the last recognized open wins over closing at end-of-buffer.
        let unbalanced_close = last_close_token.filter(|close| {
            tag_is_open && last_open_tag_pos.is_some_and(|open_pos| open_pos < close.offset)
        });

        if let Some(close) = unbalanced_close {
            self.replace_code_block(close.offset, close.len);
            // Markers suppressed inside the tag-block may still pair up.
            self.replace_leftover_marker_pairs();
        } else if tag_is_open || marker_is_open {
            // No usable closing delimiter: the trailing content becomes the
            // block body.
            self.replace_code_block(original_len, 0);
        }

        true
    }

    /// Removes every `<pre ...>` / `</pre>` tag except the ones wrapping a
    /// `<code>`-formatted block.
    ///
    /// Wrapper tags produced by block formatting sit immediately against a
    /// code tag and are kept; `<pre>` tags typed anywhere else are stripped.
    pub fn strip_pre_tags(&mut self) {
        let bytes = self.buffer.as_bytes();
        let mut out = String::with_capacity(self.buffer.len());
        let mut pos = 0;

        while let Some(found) = bytes[pos..].find_byte(b'<') {
            let at = pos + found;
            out.push_str(&self.buffer[pos..at]);

            if let Some(end) = scanner::match_open_tag(bytes, at, b"pre") {
                // Keep only when immediately followed by an opening code tag.
                if scanner::match_open_tag(bytes, end, b"code").is_some() {
                    out.push_str(&self.buffer[at..end]);
                }
                pos = end;
            } else if let Some(end) = scanner::match_close_tag(bytes, at, b"pre") {
                // Keep only when immediately preceded by a closing code tag.
                if at >= 7 && bytes[at - 7..at].eq_ignore_ascii_case(b"</code>") {
                    out.push_str(&self.buffer[at..end]);
                }
                pos = end;
            } else {
                out.push('<');
                pos = at + 1;
            }
        }

        out.push_str(&self.buffer[pos..]);
        self.buffer = out;
    }

    fn set_anchor(&mut self, token: Token) {
        self.anchor = Some(AnchorPoint {
            block_start: token.offset,
            body_start: token.end(),
        });
    }

    /// Replaces the block between the current anchor and the end delimiter at
    /// `end_offset`/`end_len` (original coordinates) with its formatted body.
    fn replace_code_block(&mut self, end_offset: usize, end_len: usize) {
        let Some(anchor) = self.anchor else {
            return;
        };

        let full_span = end_offset + end_len - anchor.block_start;
        let body_len = end_offset - anchor.body_start;

        let start = (anchor.block_start as isize + self.offset) as usize;
        let body_start = (anchor.body_start as isize + self.offset) as usize;

        let body = &self.buffer[body_start..body_start + body_len];
        let replacement = prepare_code_block(body, self.options.charset);

        self.offset += replacement.len() as isize - full_span as isize;
        self.buffer.replace_range(start..start + full_span, &replacement);
    }

    /// Second pass over the whole current buffer: replaces every lazily
    /// paired, non-empty `` `body` `` span left over after an unbalanced
    /// tag-block was force-closed.
    fn replace_leftover_marker_pairs(&mut self) {
        let bytes = self.buffer.as_bytes();
        let mut out = String::with_capacity(self.buffer.len());
        let mut pos = 0;

        while let Some(found) = bytes[pos..].find_byte(b'`') {
            let open = pos + found;
            // The closer is the nearest backtick leaving a non-empty body.
            let Some(close) = bytes
                .get(open + 2..)
                .and_then(|rest| rest.find_byte(b'`'))
                .map(|idx| open + 2 + idx)
            else {
                break;
            };

            out.push_str(&self.buffer[pos..open]);
            out.push_str(&prepare_code_block(
                &self.buffer[open + 1..close],
                self.options.charset,
            ));
            pos = close + 1;
        }

        out.push_str(&self.buffer[pos..]);
        self.buffer = out;
    }
}

/// Processes one comment end to end.
///
/// Runs [`CodeBlockProcessor::parse_code_blocks`]; when blocks were found and
/// the author is not privileged, stray `<pre>` tags are stripped afterwards.
///
/// # Examples
///
/// ```rust
/// use codefence::{ProcessorOptions, process_comment};
///
/// let out = process_comment("try <code>x > 0</code>", ProcessorOptions::default());
/// assert_eq!(out, "try <code>x &gt; 0</code>");
/// ```
#[must_use]
pub fn process_comment(text: &str, options: ProcessorOptions) -> String {
    let mut processor = CodeBlockProcessor::new(text, options);

    if processor.parse_code_blocks() && !options.privileged {
        processor.strip_pre_tags();
    }

    processor.into_text()
}
