//! Single-pass detection and normalization of code-block markup in free-form
//! comment text.
//!
//! Two delimiter families are recognized: an HTML-like `<code>`/`</code>` tag
//! pair (case-insensitive, attributes allowed on the opening tag) and a
//! symmetric backtick marker that opens on odd occurrences and closes on even
//! ones. Each detected block is replaced in place with an escaped, trimmed
//! `<code>` fragment, wrapped in `<pre>` when the body is long or contains
//! block-ish whitespace. Text outside recognized blocks is left untouched.
//!
//! Malformed markup (unclosed tags, stray closers, mixed delimiter styles) is
//! never an error: the processor always commits to one deterministic
//! interpretation and returns a well-defined string for every input.
//!
//! # Examples
//!
//! ```rust
//! use codefence::{ProcessorOptions, process_comment};
//!
//! let out = process_comment("see `let x = 1;` here", ProcessorOptions::default());
//! assert_eq!(out, "see <code>let x = 1;</code> here");
//! ```
//!
//! Driving the processor directly:
//!
//! ```rust
//! use codefence::{CodeBlockProcessor, ProcessorOptions};
//!
//! let mut processor = CodeBlockProcessor::new("<code>a < b</code>", ProcessorOptions::default());
//! assert!(processor.parse_code_blocks());
//! assert_eq!(processor.text(), "<code>a &lt; b</code>");
//! ```

mod format;
mod options;
mod processor;
mod scanner;

#[cfg(test)]
mod tests;

pub use options::{Charset, CharsetError, ProcessorOptions};
pub use processor::{CodeBlockProcessor, process_comment};
