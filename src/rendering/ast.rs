//! Node types for rendered idea text

/// A block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1..=3
    Heading { level: u8, content: Vec<Inline> },

    /// Paragraph; single newlines inside it are `Inline::LineBreak`
    Paragraph(Vec<Inline>),

    /// Run of consecutive list items sharing one marker kind
    List { kind: ListKind, items: Vec<Vec<Inline>> },

    /// Fenced code block. `code` is verbatim.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
}

/// Marker kind of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `- item`
    Unordered,
    /// `1. item`
    Ordered,
}

/// An inline node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    LineBreak,
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    /// Concatenated text content with all markup stripped.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(s) | Inline::Code(s) => s.clone(),
            Inline::Strong(children) | Inline::Emphasis(children) => plain_text(children),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

/// Concatenated text content of a run of inlines.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

/// The structured result of parsing one piece of raw text.
///
/// A `Markup` never outlives the render call that produced it in the
/// form layer; it is kept public so callers can inspect the structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub blocks: Vec<Block>,
}

impl Markup {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Headings in document order as `(level, text)`.
    pub fn headings(&self) -> Vec<(u8, String)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, content } => Some((*level, plain_text(content))),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_nested_emphasis() {
        let inlines = vec![
            Inline::text("a "),
            Inline::Strong(vec![Inline::text("b "), Inline::Emphasis(vec![Inline::text("c")])]),
            Inline::Code("d".into()),
        ];
        assert_eq!(plain_text(&inlines), "a b cd");
    }

    #[test]
    fn headings_lists_only_heading_blocks() {
        let markup = Markup::new(vec![
            Block::Heading { level: 2, content: vec![Inline::text("Plan")] },
            Block::Paragraph(vec![Inline::text("body")]),
        ]);
        assert_eq!(markup.headings(), vec![(2, "Plan".to_string())]);
    }
}
