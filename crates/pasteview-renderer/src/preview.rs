//! Live preview over an editable markdown buffer.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::Renderer;

/// Notice shown in place of the preview when rendering fails.
const RENDER_FAILURE_NOTICE: &str = "<p class=\"render-error\">Error rendering markdown.</p>";

/// What the preview shows for the current buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView<'a> {
    /// Preview disabled: the raw markdown source.
    Raw(&'a str),
    /// Preview enabled: the rendered HTML, or the failure notice.
    Rendered(String),
}

/// Toggleable rendered view of a markdown buffer.
///
/// Holds the source text and an on/off switch. When the switch is on,
/// [`view`](Self::view) renders the buffer through the configured renderer;
/// when off, it hands the raw text back. A failure inside the render never
/// takes the buffer with it; the view degrades to a generic notice and the
/// text stays editable.
pub struct LivePreview {
    renderer: Renderer,
    text: String,
    enabled: bool,
}

impl LivePreview {
    /// Preview over an empty buffer, rendering disabled.
    #[must_use]
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            text: String::new(),
            enabled: false,
        }
    }

    /// Replace the buffer contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The current buffer contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Switch the rendered view on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The view for the current buffer and switch position.
    ///
    /// Rendering runs under [`catch_unwind`] so a panicking extension cannot
    /// tear the preview down; the failure is logged and the notice shown
    /// instead.
    #[must_use]
    pub fn view(&self) -> PreviewView<'_> {
        if !self.enabled {
            return PreviewView::Raw(&self.text);
        }
        match catch_unwind(AssertUnwindSafe(|| self.renderer.parse(&self.text))) {
            Ok(html) => PreviewView::Rendered(html),
            Err(_) => {
                tracing::error!(len = self.text.len(), "markdown render panicked");
                PreviewView::Rendered(RENDER_FAILURE_NOTICE.to_owned())
            }
        }
    }
}
