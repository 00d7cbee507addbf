//! Host parser capability handed to extension renderers.

/// Capability to render a captured substring as inline markdown.
///
/// Renderers that re-parse their inner text (spoiler bodies, admonition
/// titles and bodies) receive this as an explicit argument instead of
/// reaching for a shared parser instance. The production implementation is
/// the renderer's own inline pipeline; tests can substitute a stub.
pub trait InlineHost {
    /// Render `text` as inline markdown and return the HTML fragment.
    ///
    /// Runs the full inline pass, extensions included, so nested constructs
    /// (emphasis inside a spoiler, a highlight inside an admonition title)
    /// work without each extension re-implementing markdown.
    fn render_inline(&self, text: &str) -> String;
}

/// [`InlineHost`] that emits the text unmodified.
///
/// Stand-in for unit tests that exercise a renderer in isolation.
#[cfg(test)]
pub(crate) struct PassthroughHost;

#[cfg(test)]
impl InlineHost for PassthroughHost {
    fn render_inline(&self, text: &str) -> String {
        text.to_owned()
    }
}
