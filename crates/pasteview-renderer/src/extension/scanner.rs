//! Scan dispatch for registered extensions.
//!
//! The preprocessing pass walks raw markdown before the host parser sees
//! it. Block extensions are offered the remaining input at every line start
//! outside code fences; their rendered HTML is emitted directly (the host
//! passes raw HTML blocks through verbatim). Inline extensions are offered
//! the running text position by position; their rendered fragments are
//! stashed in a [`Fragments`] collector and stand-in markers are emitted,
//! to be swapped back in after the host parse so the fragment contents are
//! never re-tokenized.

use std::hash::{BuildHasher, Hasher, RandomState};

use super::{ExtensionSet, InlineHost};

/// One piece of an inline scan: untouched source text or a rendered
/// extension fragment.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InlineSegment<'a> {
    Text(&'a str),
    Html(String),
}

/// Scan `text` for inline extension constructs.
///
/// At each candidate position (the earliest probe hint across all inline
/// extensions) every extension's recognizer is offered the remaining text
/// in registration order; the first success is rendered and the cursor
/// advances past the token's `raw`. A position where every recognizer
/// declines is plain text. Probes only skip ahead — a probe that
/// over-reports costs time, never correctness.
pub(crate) fn scan_inline<'a>(
    set: &ExtensionSet,
    text: &'a str,
    host: &dyn InlineHost,
) -> Vec<InlineSegment<'a>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let Some(hint) = set
            .inline()
            .iter()
            .filter_map(|ext| ext.probe(&text[pos..]))
            .min()
        else {
            break;
        };
        let candidate = pos + hint;
        let rest = &text[candidate..];

        let mut consumed = 0;
        for ext in set.inline() {
            if let Some(token) = ext.recognize(rest) {
                // Empty raw would stall the cursor; treat it as a miss.
                if token.raw.is_empty() {
                    continue;
                }
                debug_assert!(rest.starts_with(token.raw), "raw must prefix the input");

                if plain_start < candidate {
                    segments.push(InlineSegment::Text(&text[plain_start..candidate]));
                }
                segments.push(InlineSegment::Html(ext.render(&token, host)));
                consumed = token.raw.len();
                break;
            }
        }

        if consumed > 0 {
            pos = candidate + consumed;
            plain_start = pos;
        } else {
            // Nothing matched at the candidate; step past it and rescan.
            let step = rest.chars().next().map_or(1, char::len_utf8);
            pos = candidate + step;
        }
    }

    if plain_start < text.len() {
        segments.push(InlineSegment::Text(&text[plain_start..]));
    }
    segments
}

/// Rendered inline fragments collected during preprocessing.
///
/// Each stashed fragment is represented in the preprocessed markdown by a
/// `{{PASTEVIEW:<nonce>:<index>}}` marker that passes through the host
/// parser as ordinary text; [`apply`](Self::apply) swaps the markers for
/// the fragments in a single pass over the rendered HTML. The nonce is
/// drawn fresh per collector, so marker-shaped text typed by the user never
/// matches a stashed fragment.
#[derive(Debug)]
pub(crate) struct Fragments {
    nonce: u64,
    items: Vec<String>,
}

const MARKER_OPEN: &str = "{{PASTEVIEW:";
const MARKER_CLOSE: &str = "}}";

impl Fragments {
    pub(crate) fn new() -> Self {
        Self {
            nonce: RandomState::new().build_hasher().finish(),
            items: Vec::new(),
        }
    }

    /// Stash a fragment and return its stand-in marker.
    fn stash(&mut self, html: String) -> String {
        let marker = format!(
            "{MARKER_OPEN}{:016x}:{}{MARKER_CLOSE}",
            self.nonce,
            self.items.len()
        );
        self.items.push(html);
        marker
    }

    /// Swap all markers in `html` for their stashed fragments.
    pub(crate) fn apply(self, html: &mut String) {
        if self.items.is_empty() {
            return;
        }

        let mut out = String::with_capacity(html.len() + self.items.iter().map(String::len).sum::<usize>());
        let mut rest = html.as_str();
        while let Some(i) = rest.find(MARKER_OPEN) {
            out.push_str(&rest[..i]);
            let after = &rest[i + MARKER_OPEN.len()..];
            let replaced = after.find(MARKER_CLOSE).and_then(|end| {
                let (nonce, index) = after[..end].split_once(':')?;
                if u64::from_str_radix(nonce, 16).ok()? != self.nonce {
                    return None;
                }
                let fragment = self.items.get(index.parse::<usize>().ok()?)?;
                out.push_str(fragment);
                Some(&after[end + MARKER_CLOSE.len()..])
            });
            match replaced {
                Some(tail) => rest = tail,
                None => {
                    // Marker-shaped user content; copy and move on.
                    out.push_str(MARKER_OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        *html = out;
    }
}

/// Preprocess a whole document: block extensions at line starts, inline
/// extensions within the remaining lines, code fences left alone.
pub(crate) fn preprocess(
    set: &ExtensionSet,
    input: &str,
    host: &dyn InlineHost,
    fragments: &mut Fragments,
) -> String {
    let mut out = String::with_capacity(input.len());
    let mut fence = FenceState::default();
    // Earliest plausible start per block extension, advanced lazily; a
    // recognizer is only consulted at line starts its probe reported.
    let mut hints: Vec<Option<usize>> = set.block().iter().map(|ext| ext.probe(input)).collect();
    let mut pos = 0;

    'lines: while pos < input.len() {
        let rest = &input[pos..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        let line = &rest[..line_len];

        let fence_marker = fence.update(line);
        if fence.in_fence() || fence_marker {
            out.push_str(line);
        } else {
            for (ext, hint) in set.block().iter().zip(&mut hints) {
                let plausible = match *hint {
                    Some(h) if h < pos => {
                        *hint = ext.probe(rest).map(|offset| pos + offset);
                        *hint == Some(pos)
                    }
                    Some(h) => h == pos,
                    None => false,
                };
                if !plausible {
                    continue;
                }
                if let Some(token) = ext.recognize(rest) {
                    if token.raw.is_empty() {
                        continue;
                    }
                    debug_assert!(rest.starts_with(token.raw), "raw must prefix the input");

                    // Blank-line isolation keeps the host from folding the
                    // raw HTML block into surrounding text.
                    out.push_str(&ext.render(&token, host));
                    out.push_str("\n\n");
                    pos += token.raw.len();
                    // raw never covers the newline of its last line
                    if input[pos..].starts_with('\n') {
                        pos += 1;
                    }
                    continue 'lines;
                }
            }
            push_inline_scan(set, line, host, fragments, &mut out);
        }

        pos += line_len;
        if pos < input.len() {
            out.push('\n');
            pos += 1;
        }
    }

    out
}

/// Preprocess text that will be parsed in inline-only mode (spoiler bodies,
/// admonition titles and bodies). No fence or block handling: the input is
/// running text by construction.
pub(crate) fn preprocess_inline(
    set: &ExtensionSet,
    text: &str,
    host: &dyn InlineHost,
    fragments: &mut Fragments,
) -> String {
    let mut out = String::with_capacity(text.len());
    push_inline_scan(set, text, host, fragments, &mut out);
    out
}

fn push_inline_scan(
    set: &ExtensionSet,
    text: &str,
    host: &dyn InlineHost,
    fragments: &mut Fragments,
    out: &mut String,
) {
    for segment in scan_inline(set, text, host) {
        match segment {
            InlineSegment::Text(s) => out.push_str(s),
            InlineSegment::Html(html) => out.push_str(&fragments.stash(html)),
        }
    }
}

/// Fence state for skipping extension syntax inside fenced code blocks.
///
/// A fence opens with three or more backticks or tildes and closes with a
/// run of the same character at least as long, with nothing but whitespace
/// after it.
#[derive(Debug, Default)]
struct FenceState {
    open: Option<(char, usize)>,
}

impl FenceState {
    fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line; returns whether the line is a fence marker.
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some((ch, len)) => {
                let run = trimmed.chars().take_while(|&c| c == ch).count();
                if run >= len && trimmed[run..].trim().is_empty() {
                    self.open = None;
                    return true;
                }
                false
            }
            None => {
                let Some(first) = trimmed.chars().next() else {
                    return false;
                };
                if first != '`' && first != '~' {
                    return false;
                }
                let run = trimmed.chars().take_while(|&c| c == first).count();
                if run >= 3 {
                    self.open = Some((first, run));
                    return true;
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::super::host::PassthroughHost;
    use super::super::{
        AdmonitionKind, BlockData, BlockExtension, BlockToken, InlineData, InlineExtension,
        InlineToken,
    };
    use super::*;
    use pretty_assertions::assert_eq;

    fn standard() -> ExtensionSet {
        ExtensionSet::standard()
    }

    fn inline_segments<'a>(set: &ExtensionSet, text: &'a str) -> Vec<InlineSegment<'a>> {
        scan_inline(set, text, &PassthroughHost)
    }

    /// Preprocess and immediately substitute fragments, for tests that only
    /// care about the end result.
    fn roundtrip(set: &ExtensionSet, input: &str) -> String {
        let mut fragments = Fragments::new();
        let mut pre = preprocess(set, input, &PassthroughHost, &mut fragments);
        fragments.apply(&mut pre);
        pre
    }

    #[test]
    fn test_plain_text_untouched() {
        let set = standard();
        let segments = inline_segments(&set, "nothing special here");
        assert_eq!(segments, [InlineSegment::Text("nothing special here")]);
    }

    #[test]
    fn test_fragment_between_text() {
        let set = standard();
        let segments = inline_segments(&set, "a ==b== c");
        assert_eq!(
            segments,
            [
                InlineSegment::Text("a "),
                InlineSegment::Html(
                    r#"<span style="background-color: yellow;">b</span>"#.to_owned()
                ),
                InlineSegment::Text(" c"),
            ]
        );
    }

    #[test]
    fn test_failed_candidate_stays_plain() {
        let set = standard();
        // A lone `%` probes as a candidate but never recognizes.
        let segments = inline_segments(&set, "50% of the time");
        assert_eq!(segments, [InlineSegment::Text("50% of the time")]);
    }

    #[test]
    fn test_failed_candidate_then_later_match() {
        let set = standard();
        let segments = inline_segments(&set, "= =red= %red%x%%");
        assert_eq!(
            segments,
            [
                InlineSegment::Text("= =red= "),
                InlineSegment::Html(r#"<span style="color: red;">x</span>"#.to_owned()),
            ]
        );
    }

    #[test]
    fn test_adjacent_constructs() {
        let set = standard();
        let segments = inline_segments(&set, "==a====b==");
        assert_eq!(segments.len(), 2);
        assert!(matches!(&segments[0], InlineSegment::Html(h) if h.contains(">a<")));
        assert!(matches!(&segments[1], InlineSegment::Html(h) if h.contains(">b<")));
    }

    // Overlapping pair used to pin down registration-order precedence.
    struct AtFirst;
    struct AtSecond;

    impl InlineExtension for AtFirst {
        fn name(&self) -> &'static str {
            "at-first"
        }
        fn probe(&self, text: &str) -> Option<usize> {
            text.find("@@")
        }
        fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
            text.starts_with("@@").then(|| InlineToken {
                raw: &text[..2],
                data: InlineData::Highlight { text: "" },
            })
        }
        fn render(&self, _token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
            "<em>first</em>".to_owned()
        }
    }

    impl InlineExtension for AtSecond {
        fn name(&self) -> &'static str {
            "at-second"
        }
        fn probe(&self, text: &str) -> Option<usize> {
            text.find("@@")
        }
        fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
            text.starts_with("@@").then(|| InlineToken {
                raw: &text[..2],
                data: InlineData::Highlight { text: "" },
            })
        }
        fn render(&self, _token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
            "<em>second</em>".to_owned()
        }
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let set = ExtensionSet::new().with_inline(AtFirst).with_inline(AtSecond);
        let segments = inline_segments(&set, "x @@ y");
        assert_eq!(
            segments,
            [
                InlineSegment::Text("x "),
                InlineSegment::Html("<em>first</em>".to_owned()),
                InlineSegment::Text(" y"),
            ]
        );

        let set = ExtensionSet::new().with_inline(AtSecond).with_inline(AtFirst);
        let segments = inline_segments(&set, "x @@ y");
        assert!(matches!(&segments[1], InlineSegment::Html(h) if h == "<em>second</em>"));
    }

    // Probe that always reports position zero; the scan must still be correct.
    struct EagerProbe;

    impl InlineExtension for EagerProbe {
        fn name(&self) -> &'static str {
            "eager"
        }
        fn probe(&self, _text: &str) -> Option<usize> {
            Some(0)
        }
        fn recognize<'a>(&self, text: &'a str) -> Option<InlineToken<'a>> {
            text.starts_with("^^").then(|| InlineToken {
                raw: &text[..2],
                data: InlineData::Highlight { text: "" },
            })
        }
        fn render(&self, _token: &InlineToken<'_>, _host: &dyn InlineHost) -> String {
            "<b>eager</b>".to_owned()
        }
    }

    #[test]
    fn test_overeager_probe_is_harmless() {
        let set = ExtensionSet::new().with_inline(EagerProbe);
        let segments = inline_segments(&set, "ab ^^ cd");
        assert_eq!(
            segments,
            [
                InlineSegment::Text("ab "),
                InlineSegment::Html("<b>eager</b>".to_owned()),
                InlineSegment::Text(" cd"),
            ]
        );
    }

    #[test]
    fn test_multibyte_text_around_candidates() {
        let set = standard();
        let segments = inline_segments(&set, "héllo % wörld ==ok==");
        assert_eq!(
            segments,
            [
                InlineSegment::Text("héllo % wörld "),
                InlineSegment::Html(
                    r#"<span style="background-color: yellow;">ok</span>"#.to_owned()
                ),
            ]
        );
    }

    #[test]
    fn test_fragments_markers_round_trip() {
        let mut fragments = Fragments::new();
        let first = fragments.stash("<b>one</b>".to_owned());
        let second = fragments.stash("<i>two</i>".to_owned());
        let mut html = format!("<p>{first} and {second}</p>");
        fragments.apply(&mut html);
        assert_eq!(html, "<p><b>one</b> and <i>two</i></p>");
    }

    #[test]
    fn test_fragments_leave_coincidental_braces() {
        let mut fragments = Fragments::new();
        let marker = fragments.stash("<b>x</b>".to_owned());
        let mut html = format!("{{{{PASTEVIEW:nope}}}} {marker}");
        fragments.apply(&mut html);
        assert_eq!(html, "{{PASTEVIEW:nope}} <b>x</b>");
    }

    #[test]
    fn test_fragments_ignore_marker_shaped_user_text() {
        let mut fragments = Fragments::new();
        let marker = fragments.stash("<b>x</b>".to_owned());
        // A well-formed index with the wrong nonce is user text, not ours.
        let mut html = format!("{{{{PASTEVIEW:0000000000000000:0}}}} {marker}");
        fragments.apply(&mut html);
        assert_eq!(html, "{{PASTEVIEW:0000000000000000:0}} <b>x</b>");
    }

    #[test]
    fn test_preprocess_replaces_admonition() {
        let set = standard();
        let out = roundtrip(&set, "before\n!!! note\nBody.\n\nafter");
        assert!(out.starts_with("before\n<div class=\"admonition admonition-note\""));
        assert!(out.contains("Body."));
        assert!(out.ends_with("after"));
        // The blank line after the body stayed outside the block.
        assert!(out.contains("</div>\n\n"));
    }

    #[test]
    fn test_preprocess_adjacent_admonitions() {
        let set = standard();
        let out = roundtrip(&set, "!!! note\nLine one.\n!!! info\nLine two.");
        assert_eq!(out.matches("<div class=\"admonition").count(), 2);
        assert!(out.contains("admonition-note"));
        assert!(out.contains("admonition-info"));
        assert!(out.contains("Line one."));
        assert!(out.contains("Line two."));
    }

    #[test]
    fn test_preprocess_skips_fences() {
        let set = standard();
        let input = "```\n!!! note\n==not scanned==\n```\n!!! info\nreal one";
        let out = roundtrip(&set, input);
        assert!(out.contains("```\n!!! note\n==not scanned==\n```"));
        assert_eq!(out.matches("<div class=\"admonition").count(), 1);
        assert!(out.contains("admonition-info"));
    }

    #[test]
    fn test_preprocess_tilde_fence_needs_matching_close() {
        let set = standard();
        let input = "~~~~\n!!! danger\n~~~\nstill fenced\n~~~~\nplain";
        let out = roundtrip(&set, input);
        // The shorter tilde run does not close the fence.
        assert!(!out.contains("<div"));
    }

    #[test]
    fn test_preprocess_mid_line_marker_ignored() {
        let set = standard();
        assert_eq!(
            roundtrip(&set, "see !!! note inline"),
            "see !!! note inline"
        );
    }

    #[test]
    fn test_preprocess_inline_substitutes_in_place() {
        let set = standard();
        let mut fragments = Fragments::new();
        let pre = preprocess_inline(&set, "a ==b== c", &PassthroughHost, &mut fragments);
        assert!(pre.starts_with("a {{PASTEVIEW:"));
        assert!(pre.ends_with(":0}} c"));
        let mut html = pre;
        fragments.apply(&mut html);
        assert_eq!(
            html,
            r#"a <span style="background-color: yellow;">b</span> c"#
        );
    }

    #[test]
    fn test_marker_typed_by_user_survives() {
        let set = standard();
        let out = roundtrip(&set, "type {{PASTEVIEW:0}} here ==hot==");
        assert!(out.contains("{{PASTEVIEW:0}}"));
        assert!(out.contains(r#"<span style="background-color: yellow;">hot</span>"#));
    }

    // Block extension that reports how often its recognizer runs.
    struct SectionCut {
        recognizes: Arc<AtomicUsize>,
    }

    impl BlockExtension for SectionCut {
        fn name(&self) -> &'static str {
            "section-cut"
        }
        fn probe(&self, text: &str) -> Option<usize> {
            text.find("@@@")
        }
        fn recognize<'a>(&self, text: &'a str) -> Option<BlockToken<'a>> {
            self.recognizes.fetch_add(1, Ordering::Relaxed);
            text.starts_with("@@@").then(|| BlockToken {
                raw: &text[..3],
                data: BlockData::Admonition {
                    kind: AdmonitionKind::Note,
                    title: None,
                    body: "",
                },
            })
        }
        fn render(&self, _token: &BlockToken<'_>, _host: &dyn InlineHost) -> String {
            "<hr class=\"cut\">".to_owned()
        }
    }

    #[test]
    fn test_block_scan_recognizes_only_at_probed_lines() {
        let calls = Arc::new(AtomicUsize::new(0));
        let set = ExtensionSet::new().with_block(SectionCut {
            recognizes: Arc::clone(&calls),
        });
        let out = roundtrip(&set, "one\ntwo\nthree\n@@@\nfour");
        assert!(out.contains("<hr class=\"cut\">"));
        assert!(out.ends_with("four"));
        // Lines before the probed offset never reach the recognizer.
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_preprocess_empty_set_is_identity() {
        let set = ExtensionSet::new();
        let input = "!!! note\n==would match otherwise==";
        assert_eq!(roundtrip(&set, input), input);
    }
}
