//! Markdown rendering with pluggable syntax extensions.
//!
//! The crate turns markdown into HTML through [pulldown-cmark], extended
//! with custom constructs that the base grammar does not know: colored
//! text, highlights, spoilers and admonition call-outs. Extensions are
//! ordinary values implementing [`InlineExtension`] or [`BlockExtension`],
//! registered in an [`ExtensionSet`] and dispatched by the [`Renderer`].
//!
//! [`LivePreview`] wraps a renderer around an editable text buffer with a
//! raw/rendered toggle, containing render failures so the buffer always
//! survives.
//!
//! ```
//! use pasteview_renderer::Renderer;
//!
//! let renderer = Renderer::standard();
//! let html = renderer.parse("!!! note\nSee ==this==.");
//! assert!(html.contains("admonition-note"));
//! ```
//!
//! [pulldown-cmark]: https://docs.rs/pulldown-cmark

pub mod extension;
mod preview;
mod renderer;
mod util;

pub use extension::{BlockExtension, ExtensionSet, InlineExtension, InlineHost};
pub use preview::{LivePreview, PreviewView};
pub use renderer::{RenderConfig, Renderer};
pub use util::escape_html;
