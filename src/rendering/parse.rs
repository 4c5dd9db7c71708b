//! Line/token parser turning raw idea text into [`Markup`].
//!
//! Parsing runs in three passes:
//!
//! 1. fenced code blocks are cut out of the text first, so no later rule
//!    ever sees their contents;
//! 2. the remaining text is walked line by line into headings, list runs and
//!    paragraphs;
//! 3. each line of text is tokenized for inline code, then bold, then italic.
//!    Inline code tokens are opaque to the emphasis passes.
//!
//! Nothing in here can fail. Unbalanced markers are kept as literal text.

use super::ast::{plain_text, Block, Inline, ListKind, Markup};

const FENCE: &str = "```";

/// Parse raw text into block nodes. `None` is treated as the empty string.
pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> Markup {
    let text = text.into().unwrap_or_default();
    if text.is_empty() {
        return Markup::default();
    }
    let normalized = text.replace("\r\n", "\n");

    let mut builder = BlockBuilder::default();
    for segment in split_fences(&normalized) {
        match segment {
            Segment::Text { text, mid_line } => {
                for (i, line) in text.split('\n').enumerate() {
                    if i == 0 && mid_line {
                        builder.text_line(line);
                    } else {
                        builder.line(line);
                    }
                }
            }
            Segment::Fence { language, code } => builder.code_block(language, code),
        }
    }
    builder.finish()
}

enum Segment<'a> {
    /// `mid_line` is set when the run starts right after a closing fence
    /// on the same line, so its first line is not at a line start.
    Text { text: &'a str, mid_line: bool },
    Fence {
        language: Option<String>,
        code: String,
    },
}

/// Split text into plain runs and fenced code blocks. Fences pair up
/// left to right; a trailing unmatched fence stays in the text.
fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut mid_line = false;
    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };
        if open > 0 {
            segments.push(Segment::Text {
                text: &rest[..open],
                mid_line,
            });
        }
        segments.push(fence_block(&after_open[..close]));
        rest = &after_open[close + FENCE.len()..];
        mid_line = !rest.is_empty() && !rest.starts_with('\n');
    }
    if !rest.is_empty() {
        segments.push(Segment::Text { text: rest, mid_line });
    }
    segments
}

fn fence_block(raw: &str) -> Segment<'static> {
    let (language, body) = match raw.split_once('\n') {
        Some((info, body)) if is_language_tag(info) => (Some(info.to_string()), body),
        Some(("", body)) => (None, body),
        _ => (None, raw),
    };
    let body = body.strip_suffix('\n').unwrap_or(body);
    Segment::Fence {
        language,
        code: body.to_string(),
    }
}

fn is_language_tag(info: &str) -> bool {
    !info.is_empty() && !info.chars().any(|c| c.is_whitespace() || c == '`')
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    paragraph: Vec<Inline>,
    list: Option<(ListKind, Vec<Vec<Inline>>)>,
}

impl BlockBuilder {
    fn line(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.flush();
            return;
        }

        if let Some((level, rest)) = heading(line) {
            self.flush();
            self.blocks.push(Block::Heading {
                level,
                content: parse_inline(rest),
            });
            return;
        }

        if let Some((kind, rest)) = list_item(line) {
            self.flush_paragraph();
            match &mut self.list {
                Some((current, items)) if *current == kind => items.push(parse_inline(rest)),
                _ => {
                    self.flush_list();
                    self.list = Some((kind, vec![parse_inline(rest)]));
                }
            }
            return;
        }

        self.text_line(line);
    }

    /// A line that only ever joins the current paragraph.
    fn text_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.flush_list();
        if !self.paragraph.is_empty() {
            self.paragraph.push(Inline::LineBreak);
        }
        self.paragraph.extend(parse_inline(line));
    }

    fn code_block(&mut self, language: Option<String>, code: String) {
        self.flush();
        self.blocks.push(Block::CodeBlock { language, code });
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let content = std::mem::take(&mut self.paragraph);
            self.blocks.push(Block::Paragraph(content));
        }
    }

    fn flush_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            self.blocks.push(Block::List { kind, items });
        }
    }

    fn finish(mut self) -> Markup {
        self.flush();
        Markup::new(self.blocks)
    }
}

/// `### `, `## ` and `# ` prefixes, longest first.
fn heading(line: &str) -> Option<(u8, &str)> {
    [(3, "### "), (2, "## "), (1, "# ")]
        .into_iter()
        .find_map(|(level, prefix)| line.strip_prefix(prefix).map(|rest| (level, rest)))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(rest) = line.strip_prefix("- ") {
        return Some((ListKind::Unordered, rest));
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .map(|rest| (ListKind::Ordered, rest))
}

/// Tokenize one line of text into inline nodes.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let tokens = vec![Inline::text(text)];
    let tokens = pair_delimiters(tokens, "`", |inner| Inline::Code(plain_text(&inner)));
    let tokens = pair_delimiters(tokens, "**", Inline::Strong);
    italicize(tokens)
}

/// Italic applies at the top level and separately inside each bold span,
/// so an italic marker never pairs across a bold boundary.
fn italicize(tokens: Vec<Inline>) -> Vec<Inline> {
    let tokens = tokens
        .into_iter()
        .map(|token| match token {
            Inline::Strong(children) => Inline::Strong(italicize(children)),
            other => other,
        })
        .collect();
    pair_delimiters(tokens, "*", Inline::Emphasis)
}

enum Piece {
    Node(Inline),
    Delim,
}

/// Pair `delim` markers found in `Text` tokens, shortest span first, and
/// wrap whatever sits between a pair with `wrap`. Other tokens are never
/// searched. An empty pair and a trailing unmatched marker stay literal.
fn pair_delimiters(tokens: Vec<Inline>, delim: &str, wrap: fn(Vec<Inline>) -> Inline) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut open: Option<Vec<Inline>> = None;

    for piece in explode(tokens, delim) {
        match (piece, open.take()) {
            (Piece::Delim, None) => open = Some(Vec::new()),
            (Piece::Delim, Some(inner)) if inner.is_empty() => out.push(Inline::text(delim.repeat(2))),
            (Piece::Delim, Some(inner)) => out.push(wrap(merge_text(inner))),
            (Piece::Node(node), Some(mut inner)) => {
                inner.push(node);
                open = Some(inner);
            }
            (Piece::Node(node), None) => out.push(node),
        }
    }
    if let Some(inner) = open {
        out.push(Inline::text(delim));
        out.extend(inner);
    }

    merge_text(out)
}

fn explode(tokens: Vec<Inline>, delim: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for token in tokens {
        match token {
            Inline::Text(text) => {
                let mut rest = text.as_str();
                while let Some(at) = rest.find(delim) {
                    if at > 0 {
                        pieces.push(Piece::Node(Inline::text(&rest[..at])));
                    }
                    // A run of a one-character marker (`**` left over from
                    // bold, ``` from an unmatched fence) is literal.
                    let run = if delim.len() == 1 {
                        rest[at..].len() - rest[at..].trim_start_matches(delim).len()
                    } else {
                        delim.len()
                    };
                    if run == delim.len() {
                        pieces.push(Piece::Delim);
                    } else {
                        pieces.push(Piece::Node(Inline::text(&rest[at..at + run])));
                    }
                    rest = &rest[at + run..];
                }
                if !rest.is_empty() {
                    pieces.push(Piece::Node(Inline::text(rest)));
                }
            }
            other => pieces.push(Piece::Node(other)),
        }
    }
    pieces
}

fn merge_text(tokens: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match (out.last_mut(), token) {
            (Some(Inline::Text(prev)), Inline::Text(next)) => prev.push_str(&next),
            (_, token) => out.push(token),
        }
    }
    out
}
