//! Markdown rendering of the document model.
//!
//! One `match` over [`Node`]: adding a kind is a compile error here until it
//! gets a rendering rule. Output is a pure function of the tree.

use crate::document::{Document, Node};

/// Render a whole document, one line per top-level block.
pub fn render_document(doc: &Document) -> String {
    doc.blocks
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single node and its descendants.
pub fn render(node: &Node) -> String {
    match node {
        Node::PlainText { value } => value.clone(),
        Node::Strong { inner } => format!("**{}**", render_all(inner)),
        Node::Emphasis { inner } => format!("*{}*", render_all(inner)),
        Node::Strike { inner } => format!("~~{}~~", render_all(inner)),
        Node::Monospace { inner } => format!("`{}`", render_all(inner)),
        Node::Link { href, inner } => format!("[{}]({})", render_all(inner), href),
        Node::Heading { level, inner } => {
            let level = usize::from((*level).clamp(1, 6));
            format!("{} {}", "#".repeat(level), render_all(inner))
        }
        Node::Image { src, alt } => format!("![{alt}]({src})"),
        // TODO: pick a longer fence when `text` itself contains ``` (changes output).
        Node::CodeBlock { text } => format!("```\n{text}\n```"),
        Node::UnorderedList { items } => items
            .iter()
            .map(|item| format!("* {}", render_all(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::OrderedList { items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, render_all(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Paragraph { inner } => render_all(inner),
    }
}

fn render_all(nodes: &[Node]) -> String {
    nodes.iter().map(render).collect()
}
