//! Block extension trait.
//!
//! Block extensions are recognized only at structural boundaries: the scan
//! offers them the remaining input at each line start outside code fences.

use super::{BlockToken, InlineHost};

/// A pluggable block syntax extension.
///
/// Same probe/recognize/render contract as
/// [`InlineExtension`](super::InlineExtension), except `recognize` is only
/// offered input beginning at a line start and may consume multiple lines.
/// The returned `raw` must stop short of content belonging to the next
/// structural element (trailing blank lines, a following construct).
pub trait BlockExtension: Send + Sync {
    /// Unique extension name.
    fn name(&self) -> &'static str;

    /// Earliest offset at which this construct could possibly start, or
    /// `None` when the text cannot contain it at all. The block scan only
    /// consults `recognize` at line starts this reported, so it may
    /// over-report but must never under-report.
    fn probe(&self, text: &str) -> Option<usize>;

    /// Attempt a strict match anchored at the start of `text`.
    fn recognize<'a>(&self, text: &'a str) -> Option<BlockToken<'a>>;

    /// Render a token this extension produced to an HTML block.
    fn render(&self, token: &BlockToken<'_>, host: &dyn InlineHost) -> String;
}
