//! Pluggable syntax extensions.
//!
//! An extension owns one custom construct end to end: a cheap [`probe`] for
//! where it might start, a [`recognize`] step that either claims an exact
//! prefix of the input or declines, and a `render` step that turns the
//! claimed token into an HTML fragment. Inline extensions
//! ([`InlineExtension`]) match within running text; block extensions
//! ([`BlockExtension`]) match at line starts and may span lines.
//!
//! Extensions are collected in an [`ExtensionSet`], whose registration
//! order is the tie-break when several could match at one position. The
//! stock set covers colored text (`%red%text%%`), highlight (`==text==`),
//! spoilers (`!>text`) and admonition call-outs (`!!! note`).
//!
//! [`probe`]: InlineExtension::probe
//! [`recognize`]: InlineExtension::recognize

mod admonition;
mod block;
mod colored;
mod highlight;
mod host;
mod inline;
mod registry;
pub(crate) mod scanner;
mod spoiler;
mod token;

pub use admonition::Admonition;
pub use block::BlockExtension;
pub use colored::ColoredText;
pub use highlight::Highlight;
pub use host::InlineHost;
pub use inline::InlineExtension;
pub use registry::ExtensionSet;
pub use spoiler::Spoiler;
pub use token::{
    AdmonitionKind, BlockData, BlockToken, InlineData, InlineToken, ParseAdmonitionKindError,
};
