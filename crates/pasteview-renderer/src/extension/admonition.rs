//! Admonition call-outs: `!!! kind [title]` followed by a body.

use super::{AdmonitionKind, BlockData, BlockExtension, BlockToken, InlineHost};

/// Block extension for `!!!` call-out boxes.
///
/// The header line is `!!!`, optional spaces, a strict lowercase kind
/// keyword (`note`, `info`, `warning`, `danger`, `greentext`), and an
/// optional free-text title. The body is every following line up to (and
/// not including) the first blank line, the next `!!!` line, or end of
/// input. An unknown keyword fails the whole match and the text falls back
/// to the host grammar.
///
/// Renders a classed `<div>` with an icon, a title line, and the body;
/// title and body are re-parsed as inline markdown through the host.
pub struct Admonition;

impl BlockExtension for Admonition {
    fn name(&self) -> &'static str {
        "admonition"
    }

    fn probe(&self, text: &str) -> Option<usize> {
        text.find("!!!")
    }

    fn recognize<'a>(&self, text: &'a str) -> Option<BlockToken<'a>> {
        let header_end = text.find('\n').unwrap_or(text.len());
        let header = &text[..header_end];

        let after_marker = header.strip_prefix("!!!")?;
        let rest = after_marker.trim_start_matches([' ', '\t']);

        let keyword_len = rest
            .find(|c: char| c == ' ' || c == '\t')
            .unwrap_or(rest.len());
        let kind: AdmonitionKind = rest[..keyword_len].parse().ok()?;

        let title = rest[keyword_len..].trim();
        let title = if title.is_empty() { None } else { Some(title) };

        // Body: full lines until a blank line, the next `!!!` header, or
        // end of input. The terminator is left unconsumed.
        let body_start = header_end + 1;
        let mut body_end = body_start;
        let mut pos = body_start;
        while pos < text.len() {
            let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
            let line = &text[pos..line_end];
            if line.is_empty() || line.starts_with("!!!") {
                break;
            }
            body_end = line_end;
            if line_end == text.len() {
                break;
            }
            pos = line_end + 1;
        }

        let (body, raw_end) = if header_end < text.len() && body_end > body_start {
            (text[body_start..body_end].trim(), body_end)
        } else {
            ("", header_end)
        };

        Some(BlockToken {
            raw: &text[..raw_end],
            data: BlockData::Admonition { kind, title, body },
        })
    }

    fn render(&self, token: &BlockToken<'_>, host: &dyn InlineHost) -> String {
        let BlockData::Admonition { kind, title, body } = token.data;
        let title_html = host.render_inline(title.unwrap_or_else(|| kind.default_title()));
        let body_html = host.render_inline(body);
        format!(
            r#"<div class="admonition admonition-{kind}"><p class="admonition-title">{icon} {title_html}</p><p>{body_html}</p></div>"#,
            icon = kind.icon(),
        )
    }
}
