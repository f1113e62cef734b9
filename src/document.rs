//! The typed document model sitting between HTML and Markdown.
//!
//! [`crate::pipeline::build`] is the only producer and
//! [`crate::pipeline::render`] the only consumer. Every node owns its
//! children; nothing is shared and nothing is mutated after the builder
//! returns.

use serde::Serialize;

/// One semantic node of a converted post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    PlainText { value: String },
    Strong { inner: Vec<Node> },
    Emphasis { inner: Vec<Node> },
    Strike { inner: Vec<Node> },
    Monospace { inner: Vec<Node> },
    /// `href` is empty when the source anchor had none.
    Link { href: String, inner: Vec<Node> },
    /// `level` is always within 1..=6.
    Heading { level: u8, inner: Vec<Node> },
    Image { src: String, alt: String },
    /// Raw, unrendered text.
    CodeBlock { text: String },
    OrderedList { items: Vec<Vec<Node>> },
    UnorderedList { items: Vec<Vec<Node>> },
    /// Fallback container for any tag without a dedicated kind.
    Paragraph { inner: Vec<Node> },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::PlainText {
            value: value.into(),
        }
    }
}

/// Root of a converted body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Node>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
