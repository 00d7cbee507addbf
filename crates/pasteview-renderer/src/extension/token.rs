//! Extension tokens.
//!
//! Tokens are the transient result of a successful [`recognize`] call. They
//! borrow from the scanned text, are handed straight to the matching
//! extension's `render`, and never outlive a single render pass.
//!
//! [`recognize`]: super::InlineExtension::recognize

use std::fmt;
use std::str::FromStr;

/// Token produced by an inline extension.
///
/// `raw` is the exact consumed prefix of the slice that was offered to
/// `recognize`. It is never empty, so advancing the scan cursor by
/// `raw.len()` always makes progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineToken<'a> {
    /// The exact substring consumed by the recognizer.
    pub raw: &'a str,
    /// Construct-specific payload.
    pub data: InlineData<'a>,
}

/// Payload of an [`InlineToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineData<'a> {
    /// `%color%text%%` — colored span, body rendered as literal text.
    ColoredText {
        /// CSS color keyword or `#RGB`/`#RRGGBB` hex, as written.
        color: &'a str,
        /// Trimmed body.
        text: &'a str,
    },
    /// `==text==` — highlighted span, body rendered as literal text.
    Highlight {
        /// Trimmed body.
        text: &'a str,
    },
    /// `!>text` — disclosure widget, body re-parsed as inline markdown.
    Spoiler {
        /// Trimmed rest-of-line body.
        text: &'a str,
    },
}

/// Token produced by a block extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockToken<'a> {
    /// The exact substring consumed by the recognizer.
    pub raw: &'a str,
    /// Construct-specific payload.
    pub data: BlockData<'a>,
}

/// Payload of a [`BlockToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockData<'a> {
    /// `!!! kind [title]` call-out box with a multi-line body.
    Admonition {
        /// Call-out kind keyword.
        kind: AdmonitionKind,
        /// Trimmed same-line title, if present.
        title: Option<&'a str>,
        /// Trimmed body (may be empty).
        body: &'a str,
    },
}

/// Kind keyword of an admonition call-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AdmonitionKind {
    Note,
    Info,
    Warning,
    Danger,
    Greentext,
}

impl AdmonitionKind {
    /// The lowercase keyword as it appears in the source.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Greentext => "greentext",
        }
    }

    /// Icon shown in the rendered title line.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Note => "\u{1f4dd}",      // 📝
            Self::Info => "\u{2139}\u{fe0f}", // ℹ️
            Self::Warning => "\u{26a0}\u{fe0f}", // ⚠️
            Self::Danger => "\u{1f6a8}",    // 🚨
            Self::Greentext => "\u{1f4ac}", // 💬
        }
    }

    /// Title used when the header line carries none: the capitalized keyword.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Greentext => "Greentext",
        }
    }
}

impl fmt::Display for AdmonitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown admonition kind keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown admonition kind: {0:?}")]
pub struct ParseAdmonitionKindError(pub String);

impl FromStr for AdmonitionKind {
    type Err = ParseAdmonitionKindError;

    /// Strict match against the lowercase keyword set. No case folding:
    /// `Note` is not a kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            "greentext" => Ok(Self::Greentext),
            other => Err(ParseAdmonitionKindError(other.to_owned())),
        }
    }
}
