//! Markdown-to-HTML renderer with extension dispatch.
//!
//! Rendering is a three-stage pipeline. A preprocessing pass scans the raw
//! markdown for extension constructs, replaces block matches with their
//! rendered HTML and inline matches with stand-in markers, and leaves code
//! fences untouched. The preprocessed text then goes through pulldown-cmark.
//! Finally the markers in the rendered HTML are swapped for the stashed
//! inline fragments, so fragment contents are never re-tokenized by the
//! host grammar.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use crate::extension::scanner::{Fragments, preprocess, preprocess_inline};
use crate::extension::{ExtensionSet, InlineHost};
use crate::util::escape_html;

/// Renderer configuration.
///
/// The defaults match the stock renderer: GFM extensions on, single
/// newlines rendered as hard breaks, inline recursion capped at 16.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    gfm: bool,
    breaks: bool,
    max_inline_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            max_inline_depth: 16,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the GFM extensions (tables, strikethrough, task
    /// lists).
    #[must_use]
    pub fn gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Render single newlines as `<br>` instead of soft breaks.
    #[must_use]
    pub fn breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Cap on nested inline re-parses. Past the cap the text is emitted as
    /// escaped literal HTML instead of recursing further.
    #[must_use]
    pub fn max_inline_depth(mut self, depth: usize) -> Self {
        self.max_inline_depth = depth;
        self
    }
}

/// Markdown renderer over a fixed extension set.
///
/// Parse calls take `&self` and share no mutable state, so one renderer can
/// serve any number of concurrent callers.
pub struct Renderer {
    extensions: ExtensionSet,
    config: RenderConfig,
}

impl Renderer {
    /// Renderer with the given extensions and default configuration.
    #[must_use]
    pub fn new(extensions: ExtensionSet) -> Self {
        Self::with_config(extensions, RenderConfig::default())
    }

    /// Renderer with explicit configuration.
    #[must_use]
    pub fn with_config(extensions: ExtensionSet, config: RenderConfig) -> Self {
        Self { extensions, config }
    }

    /// Renderer with the stock extension set.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ExtensionSet::standard())
    }

    fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.config.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_GFM);
        }
        options
    }

    /// Render a markdown document to HTML.
    #[must_use]
    pub fn parse(&self, input: &str) -> String {
        let host = InlineCx {
            renderer: self,
            depth: 0,
        };
        let mut fragments = Fragments::new();
        let pre = preprocess(&self.extensions, input, &host, &mut fragments);

        let parser = Parser::new_ext(&pre, self.options());
        let mut out = String::with_capacity(pre.len() * 3 / 2);
        if self.config.breaks {
            html::push_html(&mut out, parser.map(harden_breaks));
        } else {
            html::push_html(&mut out, parser);
        }

        fragments.apply(&mut out);
        out
    }

    /// Render a fragment of inline markdown, without a wrapping paragraph.
    #[must_use]
    pub fn parse_inline(&self, text: &str) -> String {
        self.parse_inline_at(text, 0)
    }

    fn parse_inline_at(&self, text: &str, depth: usize) -> String {
        if depth >= self.config.max_inline_depth {
            tracing::warn!(depth, "inline nesting limit reached, emitting literal text");
            return escape_html(text).into_owned();
        }

        let host = InlineCx {
            renderer: self,
            depth,
        };
        let mut fragments = Fragments::new();
        let pre = preprocess_inline(&self.extensions, text, &host, &mut fragments);

        let parser = Parser::new_ext(&pre, self.options());
        let events = inline_events(parser.into_offset_iter(), &pre);
        let mut out = String::with_capacity(pre.len() * 3 / 2);
        if self.config.breaks {
            html::push_html(&mut out, events.into_iter().map(harden_breaks));
        } else {
            html::push_html(&mut out, events.into_iter());
        }

        fragments.apply(&mut out);
        out
    }
}

/// Flatten a block-level event stream into inline-only events.
///
/// Paragraph wrappers are dropped, and every other block construct (a
/// heading, a list, a block quote, a code block) is emitted as its literal
/// source text instead of block HTML, line by line with soft breaks between
/// its lines and between adjacent blocks. Inline markup inside paragraphs
/// parses normally; inside a literalized block it stays source text along
/// with the rest of the construct.
fn inline_events<'a, I>(mut iter: I, source: &'a str) -> Vec<Event<'a>>
where
    I: Iterator<Item = (Event<'a>, std::ops::Range<usize>)>,
{
    let mut events = Vec::new();
    let mut first = true;
    while let Some((event, range)) = iter.next() {
        match event {
            Event::Start(Tag::Paragraph) => {
                if !first {
                    events.push(Event::SoftBreak);
                }
                first = false;
            }
            Event::End(TagEnd::Paragraph) => {}
            Event::Start(tag) if literalized(&tag) => {
                if !first {
                    events.push(Event::SoftBreak);
                }
                first = false;
                push_source_lines(&source[range], &mut events);
                // Drop everything up to the matching end tag; the literal
                // source already covers it.
                let mut depth = 1_usize;
                for (inner, _) in iter.by_ref() {
                    match inner {
                        Event::Start(_) => depth += 1,
                        Event::End(_) => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Rule => {
                if !first {
                    events.push(Event::SoftBreak);
                }
                first = false;
                push_source_lines(&source[range], &mut events);
            }
            other => events.push(other),
        }
    }
    events
}

/// Block tags that are emitted as literal source text in inline mode.
fn literalized(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_)
            | Tag::List(_)
            | Tag::FootnoteDefinition(_)
            | Tag::Table(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
    )
}

fn push_source_lines<'a>(source: &'a str, events: &mut Vec<Event<'a>>) {
    let mut lines = source.trim_end_matches('\n').split('\n');
    if let Some(line) = lines.next() {
        events.push(Event::Text(line.into()));
    }
    for line in lines {
        events.push(Event::SoftBreak);
        events.push(Event::Text(line.into()));
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::standard()
    }
}

/// pulldown-cmark has no breaks switch, so the soft-break events are mapped
/// to hard breaks instead.
fn harden_breaks(event: Event<'_>) -> Event<'_> {
    match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    }
}

/// Inline host backed by the renderer itself, carrying the recursion depth
/// of the render call it was created for.
struct InlineCx<'r> {
    renderer: &'r Renderer,
    depth: usize,
}

impl InlineHost for InlineCx<'_> {
    fn render_inline(&self, text: &str) -> String {
        self.renderer.parse_inline_at(text, self.depth + 1)
    }
}
