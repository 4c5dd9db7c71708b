//! Plain terminal text for [`Markup`], used by the CLI

use super::ast::{plain_text, Block, ListKind, Markup};

pub fn to_plain_text(markup: &Markup) -> String {
    let rendered: Vec<String> = markup.blocks.iter().map(block_text).collect();
    rendered.join("\n\n")
}

fn block_text(block: &Block) -> String {
    match block {
        Block::Heading { level, content } => {
            let text = plain_text(content);
            let rule = match level {
                1 => Some('='),
                2 => Some('-'),
                _ => None,
            };
            match rule {
                Some(c) => {
                    let underline: String = std::iter::repeat(c).take(text.chars().count()).collect();
                    format!("{}\n{}", text, underline)
                }
                None => text,
            }
        }
        Block::Paragraph(content) => plain_text(content),
        Block::List { kind, items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| match kind {
                ListKind::Unordered => format!("  • {}", plain_text(item)),
                ListKind::Ordered => format!("  {}. {}", i + 1, plain_text(item)),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock { code, .. } => code
            .lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
