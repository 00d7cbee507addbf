//! Inline extension trait.
//!
//! Inline extensions are recognized while scanning within a line of running
//! text, alongside the host grammar's emphasis and links.

use super::{InlineHost, InlineToken};

/// A pluggable inline syntax extension.
///
/// Implementations are registered in order into an
/// [`ExtensionSet`](super::ExtensionSet); at each scan position the first
/// registered extension whose [`recognize`](Self::recognize) succeeds wins.
///
/// # Contract
///
/// - `probe` is a scan-skip hint only. It may over-report candidate
///   positions but must never under-report: if `recognize` would succeed at
///   offset `p`, `probe` must return `p` or an earlier offset. Correctness
///   must hold even if it always returns `Some(0)`.
/// - `recognize` is anchored at the start of its input (it must not match
///   later in the string) and total: it returns `None` for any input it
///   does not match, and never panics. A returned token's `raw` is a
///   non-empty literal prefix of the input.
/// - Both are pure; they read only the slice they are given.
///
/// # Example
///
/// ```
/// use pasteview_renderer::extension::{
///     InlineData, InlineExtension, InlineHost, InlineToken,
/// };
///
/// struct Wavy;
///
/// impl InlineExtension for Wavy {
///     fn name(&self) -> &'static str { "wavy" }
///
///     fn probe(&self, text: &str) -> Option<usize> { text.find('~') }
///
///     fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
///         let body = text.strip_prefix('~')?;
///         let end = body.find('~')?;
///         Some(InlineToken {
///             raw: &text[..end + 2],
///             data: InlineData::Highlight { text: body[..end].trim() },
///         })
///     }
///
///     fn render(&self, token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
///         match token.data {
///             InlineData::Highlight { text } => format!("<wavy>{text}</wavy>"),
///             _ => String::new(),
///         }
///     }
/// }
/// ```
pub trait InlineExtension: Send + Sync {
    /// Unique extension name.
    fn name(&self) -> &'static str;

    /// Earliest offset at which this construct could possibly start, or
    /// `None` when the text cannot contain it at all.
    fn probe(&self, text: &str) -> Option<usize>;

    /// Attempt a strict match anchored at the start of `text`.
    fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>>;

    /// Render a token this extension produced to an HTML fragment.
    fn render(&self, token: &InlineToken<'_>, host: &dyn InlineHost) -> String;
}
