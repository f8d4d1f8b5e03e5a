//! Escaping and wrapping of extracted code-block bodies.

use crate::options::Charset;

/// Raw body lengths above this render as a block rather than inline.
const BLOCK_LENGTH_THRESHOLD: usize = 70;

/// Formats one extracted body into the text spliced back into the buffer.
///
/// The body is escaped, trimmed and wrapped in `<code>` tags; long bodies and
/// bodies with block-ish whitespace get an extra `<pre>` wrapper so the
/// renderer treats them as a block instead of inline code.
///
/// The inline/block length decision uses the raw (pre-escaping) body length;
/// the whitespace probe runs on the trimmed body, so leading and trailing
/// runs never force a block on their own.
pub(crate) fn prepare_code_block(body: &str, charset: Charset) -> String {
    let raw_len = body.len();
    let escaped = charset.escape_text(body);
    let code = format!("<code>{}</code>", escaped.trim());

    if raw_len > BLOCK_LENGTH_THRESHOLD || has_block_whitespace(escaped.trim()) {
        return format!("<pre>{code}</pre>");
    }

    code
}

/// True if `text` contains a newline, carriage return, tab, or a run of three
/// or more consecutive spaces.
fn has_block_whitespace(text: &str) -> bool {
    let mut space_run = 0;
    for ch in text.chars() {
        match ch {
            '\n' | '\r' | '\t' => return true,
            ' ' => {
                space_run += 1;
                if space_run == 3 {
                    return true;
                }
            }
            _ => space_run = 0,
        }
    }
    false
}
