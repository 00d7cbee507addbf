//! Highlighted text: `==text==`.

use super::{InlineData, InlineExtension, InlineHost, InlineToken};
use crate::util::escape_html;

/// Inline extension for `==text==`.
///
/// The body is the shortest run up to the closing `==`, confined to the
/// current line; `====` therefore matches with an empty body. Renders a
/// yellow-background `<span>` whose content is literal text, not re-parsed
/// markdown.
pub struct Highlight;

impl InlineExtension for Highlight {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn probe(&self, text: &str) -> Option<usize> {
        text.find("==")
    }

    fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
        let after_open = text.strip_prefix("==")?;
        let line = match after_open.find('\n') {
            Some(i) => &after_open[..i],
            None => after_open,
        };

        let close = line.find("==")?;
        let body = &line[..close];

        Some(InlineToken {
            raw: &text[..2 + close + 2],
            data: InlineData::Highlight { text: body.trim() },
        })
    }

    fn render(&self, token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
        match token.data {
            InlineData::Highlight { text } => {
                format!(
                    r#"<span style="background-color: yellow;">{}</span>"#,
                    escape_html(text)
                )
            }
            _ => String::new(),
        }
    }
}
