//! Text renderer for the lightweight markdown subset returned by the backend
//!
//! Supported: `#`/`##`/`###` headings, `**bold**`, `*italic*`, `` `code` ``,
//! fenced code blocks, `- ` and `1. ` list items, blank-line paragraphs and
//! single-newline line breaks. Everything else is kept as literal text.
//!
//! Rendering is a pure function of its input and never fails.

pub mod ast;
pub mod html;
pub mod parse;
pub mod text;

pub use ast::{Block, Inline, ListKind, Markup};
pub use parse::parse;

/// Render raw text to escaped HTML. `None` renders to the empty string.
///
/// ```
/// assert_eq!(creativefuse::render("**hi**"), "<p><strong>hi</strong></p>");
/// assert_eq!(creativefuse::render(None), "");
/// ```
pub fn render<'a>(text: impl Into<Option<&'a str>>) -> String {
    parse(text).to_html()
}

impl Markup {
    pub fn to_html(&self) -> String {
        html::to_html(self)
    }

    pub fn to_plain_text(&self) -> String {
        text::to_plain_text(self)
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_html())
    }
}
