//! Colored text: `%color%text%%`.

use super::{InlineData, InlineExtension, InlineHost, InlineToken};
use crate::util::escape_html;

/// Inline extension for `%color%text%%`.
///
/// The color spec is either a run of ASCII letters (a named CSS color) or
/// `#` followed by exactly 3 or 6 hex digits. The body is the shortest run
/// up to the closing `%%`, confined to the current line. A literal `%`
/// inside the body fails the match at that delimiter; there is no escape
/// mechanism.
///
/// Renders a `<span>` with an inline `color` style. The body is emitted as
/// literal text, not re-parsed as markdown.
pub struct ColoredText;

impl InlineExtension for ColoredText {
    fn name(&self) -> &'static str {
        "coloredText"
    }

    fn probe(&self, text: &str) -> Option<usize> {
        text.find('%')
    }

    fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
        let after_open = text.strip_prefix('%')?;
        let color_len = color_spec_len(after_open)?;
        let color = &after_open[..color_len];

        let after_color = after_open[color_len..].strip_prefix('%')?;
        let line = match after_color.find('\n') {
            Some(i) => &after_color[..i],
            None => after_color,
        };

        // Body runs to the first `%`, which must open the `%%` closer.
        let percent = line.find('%')?;
        if !line[percent..].starts_with("%%") {
            return None;
        }
        let body = &line[..percent];

        let raw_len = 1 + color_len + 1 + percent + 2;
        Some(InlineToken {
            raw: &text[..raw_len],
            data: InlineData::ColoredText {
                color,
                text: body.trim(),
            },
        })
    }

    fn render(&self, token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
        match token.data {
            InlineData::ColoredText { color, text } => {
                format!(
                    r#"<span style="color: {color};">{}</span>"#,
                    escape_html(text)
                )
            }
            _ => String::new(),
        }
    }
}

/// Length of a valid color spec at the start of `s`.
///
/// Either one or more ASCII letters, or `#` followed by exactly 3 or 6 hex
/// digits (a longer or shorter hex run is rejected outright).
fn color_spec_len(s: &str) -> Option<usize> {
    if let Some(hex) = s.strip_prefix('#') {
        let run = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
        if run == 3 || run == 6 {
            return Some(1 + run);
        }
        return None;
    }

    let run = s.bytes().take_while(u8::is_ascii_alphabetic).count();
    if run > 0 { Some(run) } else { None }
}

#[cfg(test)]
mod tests {
    use super::super::host::PassthroughHost;
    use super::*;
    use pretty_assertions::assert_eq;

    fn recognize(text: &str) -> Option<InlineToken<'_>> {
        ColoredText.recognize(text)
    }

    #[test]
    fn test_named_color() {
        let token = recognize("%red%warm text%% tail").unwrap();
        assert_eq!(token.raw, "%red%warm text%%");
        assert_eq!(
            token.data,
            InlineData::ColoredText {
                color: "red",
                text: "warm text",
            }
        );
    }

    #[test]
    fn test_hex_colors() {
        let token = recognize("%#f00%x%%").unwrap();
        assert_eq!(
            token.data,
            InlineData::ColoredText { color: "#f00", text: "x" }
        );

        let token = recognize("%#00ff00%x%%").unwrap();
        assert_eq!(
            token.data,
            InlineData::ColoredText { color: "#00ff00", text: "x" }
        );
    }

    #[test]
    fn test_invalid_hex_lengths() {
        assert!(recognize("%#f0%x%%").is_none());
        assert!(recognize("%#f000%x%%").is_none());
        assert!(recognize("%#f00000f%x%%").is_none());
    }

    #[test]
    fn test_body_trimmed() {
        let token = recognize("%blue%  padded  %%").unwrap();
        assert_eq!(
            token.data,
            InlineData::ColoredText { color: "blue", text: "padded" }
        );
    }

    #[test]
    fn test_literal_percent_in_body_fails() {
        assert!(recognize("%red%50% off%%").is_none());
    }

    #[test]
    fn test_unterminated_fails() {
        assert!(recognize("%red%never closed").is_none());
        assert!(recognize("%red%").is_none());
    }

    #[test]
    fn test_body_cannot_span_lines() {
        assert!(recognize("%red%line one\nline two%%").is_none());
    }

    #[test]
    fn test_not_anchored_elsewhere() {
        assert!(recognize("text %red%x%%").is_none());
    }

    #[test]
    fn test_missing_color_fails() {
        assert!(recognize("%%x%%").is_none());
        assert!(recognize("%1red%x%%").is_none());
    }

    #[test]
    fn test_render_literal_escaped() {
        let token = recognize("%red%<b>*not markdown*</b>%%").unwrap();
        let html = ColoredText.render(&token, &PassthroughHost);
        assert_eq!(
            html,
            r#"<span style="color: red;">&lt;b&gt;*not markdown*&lt;/b&gt;</span>"#
        );
    }

    #[test]
    fn test_probe() {
        assert_eq!(ColoredText.probe("no match here"), None);
        assert_eq!(ColoredText.probe("ab %red%x%%"), Some(3));
    }
}
