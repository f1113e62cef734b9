//! Semantic tree builder: [`GenericNode`] → [`Document`].
//!
//! Classification is one total function over the tag name. Every tag without
//! a dedicated kind becomes a [`Node::Paragraph`] around its mapped children,
//! so malformed or unexpected markup in one post can never abort a batch.

use crate::document::{Document, Node};
use crate::pipeline::markup::{GenericNode, NodeKind};

/// `class` value Gutenberg puts on `<pre>` wrapping a `<code>` element.
pub const CODE_BLOCK_CLASS: &str = "wp-block-code";

/// `class` value Gutenberg puts on `<pre>` holding bare preformatted text.
pub const PREFORMATTED_CLASS: &str = "wp-block-preformatted";

/// Build a document from a parsed body. `None` yields an empty document.
pub fn build(root: Option<&GenericNode>) -> Document {
    match root {
        Some(root) => Document {
            blocks: map_children(root),
        },
        None => Document::default(),
    }
}

/// Map the text and element children of `node`, skipping everything else.
pub fn map_children(node: &GenericNode) -> Vec<Node> {
    node.children
        .iter()
        .filter(|c| matches!(c.kind, NodeKind::Text | NodeKind::Element))
        .map(map_node)
        .collect()
}

fn map_node(node: &GenericNode) -> Node {
    if node.kind == NodeKind::Text {
        return Node::text(node.text.as_str());
    }

    let tag = node.tag.to_ascii_lowercase();
    match tag.as_str() {
        "a" => Node::Link {
            href: node.attr("href").unwrap_or_default().to_string(),
            inner: map_children(node),
        },
        "strong" | "b" => Node::Strong {
            inner: map_children(node),
        },
        "em" | "i" => Node::Emphasis {
            inner: map_children(node),
        },
        "s" => Node::Strike {
            inner: map_children(node),
        },
        "code" => Node::Monospace {
            inner: map_children(node),
        },
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Node::Heading {
            level: heading_level(&tag),
            inner: map_children(node),
        },
        "img" => Node::Image {
            src: node.attr("src").unwrap_or_default().to_string(),
            alt: node.attr("alt").unwrap_or_default().to_string(),
        },
        "ol" => Node::OrderedList {
            items: list_items(node),
        },
        "ul" => Node::UnorderedList {
            items: list_items(node),
        },
        "pre" => Node::CodeBlock {
            text: preformatted_text(node),
        },
        _ => Node::Paragraph {
            inner: map_children(node),
        },
    }
}

/// Heading level from an `h<n>` tag. Anything that is not a digit run in
/// 1..=6 falls back to 1.
pub fn heading_level(tag: &str) -> u8 {
    tag.get(1..)
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
        .unwrap_or(1)
}

/// One item per text or element child, holding that child's mapped
/// children. A text child has none, so it yields an empty item.
fn list_items(list: &GenericNode) -> Vec<Vec<Node>> {
    list.children
        .iter()
        .filter(|c| matches!(c.kind, NodeKind::Text | NodeKind::Element))
        .map(map_children)
        .collect()
}

/// Raw text of a `<pre>` block, recognised only through its Gutenberg class.
fn preformatted_text(pre: &GenericNode) -> String {
    for (key, value) in &pre.attributes {
        if key != "class" {
            continue;
        }
        if value == CODE_BLOCK_CLASS {
            if let Some(text) = pre
                .children
                .first()
                .and_then(|code| code.children.first())
            {
                return text.text.clone();
            }
        }
        if value == PREFORMATTED_CLASS {
            if let Some(contents) = pre.children.first() {
                return contents.text.clone();
            }
        }
    }
    String::new()
}
