use std::{borrow::Cow, fmt, str::FromStr};

use thiserror::Error;

/// Configuration for a [`CodeBlockProcessor`].
///
/// The processor itself raises no errors; these options only select the
/// escaping charset and whether the caller is a privileged author.
///
/// # Examples
///
/// ```rust
/// use codefence::{Charset, ProcessorOptions};
///
/// let options = ProcessorOptions {
///     charset: Charset::Latin1,
///     ..Default::default()
/// };
/// assert!(!options.privileged);
/// ```
///
/// [`CodeBlockProcessor`]: crate::CodeBlockProcessor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessorOptions {
    /// The character encoding declared by the hosting environment.
    ///
    /// Resolved once by the host and injected here; it must not vary across
    /// invocations within the same process lifetime. Used only by the
    /// escaping step.
    ///
    /// # Default
    ///
    /// [`Charset::Utf8`]
    pub charset: Charset,

    /// Whether the author of the text is privileged (for example, a
    /// moderator).
    ///
    /// Privileged authors keep any `<pre>` tags they typed themselves;
    /// unprivileged authors have stray `<pre>` tags stripped after code
    /// blocks are parsed.
    ///
    /// # Default
    ///
    /// `false`
    pub privileged: bool,
}

/// A character encoding label accepted by the escaping step.
///
/// All supported charsets are ASCII-compatible supersets, so the
/// markup-significant characters `&`, `<` and `>` have the same byte
/// representation in every one of them and a single escape table applies.
///
/// ```rust
/// use codefence::Charset;
///
/// let charset: Charset = "ISO-8859-1".parse().unwrap();
/// assert_eq!(charset, Charset::Latin1);
/// assert!("EBCDIC".parse::<Charset>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Charset {
    /// UTF-8, the default for virtually every modern host.
    #[default]
    Utf8,
    /// ISO-8859-1.
    Latin1,
    /// US-ASCII.
    Ascii,
    /// Windows-1252.
    Windows1252,
}

impl Charset {
    /// The canonical label for this charset.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
            Charset::Windows1252 => "Windows-1252",
        }
    }

    /// Escapes `&`, `<` and `>` in `text`, leaving quotes untouched.
    pub(crate) fn escape_text(self, text: &str) -> Cow<'_, str> {
        match self {
            // One table covers every supported charset; see the type docs.
            Charset::Utf8 | Charset::Latin1 | Charset::Ascii | Charset::Windows1252 => {
                html_escape::encode_text(text)
            }
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        // Labels in the wild vary in case and hyphenation ("utf8", "UTF-8").
        let mut normalized = String::with_capacity(label.len());
        for ch in label.trim().chars() {
            if ch != '-' && ch != '_' {
                normalized.extend(ch.to_lowercase());
            }
        }

        match normalized.as_str() {
            "utf8" => Ok(Charset::Utf8),
            "iso88591" | "latin1" => Ok(Charset::Latin1),
            "usascii" | "ascii" => Ok(Charset::Ascii),
            "windows1252" | "cp1252" => Ok(Charset::Windows1252),
            _ => Err(CharsetError {
                label: label.into(),
            }),
        }
    }
}

/// Returned when a charset label is not one of the supported encodings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized charset label {label:?}")]
pub struct CharsetError {
    label: String,
}
