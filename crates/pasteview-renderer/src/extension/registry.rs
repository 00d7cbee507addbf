//! Ordered extension registry.

use super::{Admonition, BlockExtension, ColoredText, Highlight, InlineExtension, Spoiler};

/// Ordered set of registered syntax extensions.
///
/// Registration order is significant: it is the only tie-break when several
/// extensions could start at the same scan position — the first registered
/// one whose recognizer succeeds wins. There is no weight or priority
/// mechanism beyond order.
///
/// The set is immutable once built; [`Renderer`](crate::Renderer) borrows
/// it for every parse call, which keeps parsing re-entrant and free of
/// shared mutable state.
///
/// # Example
///
/// ```
/// use pasteview_renderer::extension::ExtensionSet;
/// use pasteview_renderer::Renderer;
///
/// let renderer = Renderer::new(ExtensionSet::standard());
/// let html = renderer.parse("==hi==");
/// assert!(html.contains("background-color: yellow"));
/// ```
#[derive(Default)]
pub struct ExtensionSet {
    inline: Vec<Box<dyn InlineExtension>>,
    block: Vec<Box<dyn BlockExtension>>,
}

impl ExtensionSet {
    /// Create an empty set. A renderer over an empty set still renders
    /// baseline markdown, just without any custom syntax.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock set: coloredText, highlight and spoiler (inline, in that
    /// order) and admonition (block).
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_inline(ColoredText)
            .with_inline(Highlight)
            .with_inline(Spoiler)
            .with_block(Admonition)
    }

    /// Register an inline extension after those already present.
    #[must_use]
    pub fn with_inline<E: InlineExtension + 'static>(mut self, extension: E) -> Self {
        self.inline.push(Box::new(extension));
        self
    }

    /// Register a block extension after those already present.
    #[must_use]
    pub fn with_block<E: BlockExtension + 'static>(mut self, extension: E) -> Self {
        self.block.push(Box::new(extension));
        self
    }

    /// Inline extensions in registration order.
    pub(crate) fn inline(&self) -> &[Box<dyn InlineExtension>] {
        &self.inline
    }

    /// Block extensions in registration order.
    pub(crate) fn block(&self) -> &[Box<dyn BlockExtension>] {
        &self.block
    }
}
