//! Spoilers: `!>rest of line`.

use super::{InlineData, InlineExtension, InlineHost, InlineToken};

/// Inline extension for `!>text`.
///
/// Greedy to the end of the line; there is no closing delimiter. Renders a
/// `<details>` disclosure with a fixed "Spoiler" summary. The hidden body is
/// re-parsed as inline markdown through the host, so emphasis, links and the
/// other extensions all work inside it.
pub struct Spoiler;

impl InlineExtension for Spoiler {
    fn name(&self) -> &'static str {
        "spoiler"
    }

    fn probe(&self, text: &str) -> Option<usize> {
        text.find("!>")
    }

    fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
        let after_marker = text.strip_prefix("!>")?;
        let body_len = after_marker.find('\n').unwrap_or(after_marker.len());
        let body = &after_marker[..body_len];

        Some(InlineToken {
            raw: &text[..2 + body_len],
            data: InlineData::Spoiler { text: body.trim() },
        })
    }

    fn render(&self, token: &InlineToken<'_>, host: &dyn InlineHost) -> String {
        match token.data {
            InlineData::Spoiler { text } => {
                format!(
                    "<details><summary>Spoiler</summary>{}</details>",
                    host.render_inline(text)
                )
            }
            _ => String::new(),
        }
    }
}
