//! HTML serialization for [`Markup`]
//!
//! All text, code and attribute values are escaped, so the output can be
//! inserted into a page directly no matter what the backend returned.

use super::ast::{Block, Inline, ListKind, Markup};

pub fn to_html(markup: &Markup) -> String {
    let mut out = String::new();
    for block in &markup.blocks {
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{}>", level));
            write_inlines(out, content);
            out.push_str(&format!("</h{}>", level));
        }
        Block::Paragraph(content) => {
            out.push_str("<p>");
            write_inlines(out, content);
            out.push_str("</p>");
        }
        Block::List { kind, items } => {
            let tag = match kind {
                ListKind::Unordered => "ul",
                ListKind::Ordered => "ol",
            };
            out.push_str(&format!("<{}>", tag));
            for item in items {
                out.push_str("<li>");
                write_inlines(out, item);
                out.push_str("</li>");
            }
            out.push_str(&format!("</{}>", tag));
        }
        Block::CodeBlock { language, code } => {
            match language {
                Some(lang) => {
                    out.push_str("<pre><code class=\"language-");
                    escape_into(out, lang);
                    out.push_str("\">");
                }
                None => out.push_str("<pre><code>"),
            }
            escape_into(out, code);
            out.push_str("</code></pre>");
        }
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => escape_into(out, text),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                write_inlines(out, children);
                out.push_str("</em>");
            }
            Inline::Code(code) => {
                out.push_str("<code>");
                escape_into(out, code);
                out.push_str("</code>");
            }
            Inline::LineBreak => out.push_str("<br/>"),
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn code_block_language_becomes_class() {
        let markup = Markup::new(vec![Block::CodeBlock {
            language: Some("rust".into()),
            code: "a < b".into(),
        }]);
        assert_eq!(
            to_html(&markup),
            "<pre><code class=\"language-rust\">a &lt; b</code></pre>"
        );
    }

    #[test]
    fn ordered_list_uses_ol() {
        let markup = Markup::new(vec![Block::List {
            kind: ListKind::Ordered,
            items: vec![vec![Inline::text("x")]],
        }]);
        assert_eq!(to_html(&markup), "<ol><li>x</li></ol>");
    }
}
