//! Generic markup tree: the untyped output of the HTML and XML parsers.
//!
//! `html5ever` and `xml5ever` both build a [`markup5ever_rcdom::RcDom`],
//! which is reference-counted and therefore `!Send`. Conversion tasks run on
//! a multi-threaded runtime, so the DOM is copied into an owned
//! [`GenericNode`] tree immediately after parsing and dropped before any
//! `.await`.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Category of a [`GenericNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Element,
    /// Document roots, comments, doctypes, processing instructions.
    Other,
}

/// An owned, parser-independent markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericNode {
    pub kind: NodeKind,
    /// Element name, `prefix:local` when the source name was prefixed.
    /// Empty for text and other nodes.
    pub tag: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// Only populated for [`NodeKind::Text`].
    pub text: String,
    pub children: Vec<GenericNode>,
}

impl GenericNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            tag: String::new(),
            attributes: Vec::new(),
            text: value.into(),
            children: Vec::new(),
        }
    }

    pub fn element(tag: impl Into<String>, children: Vec<GenericNode>) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.into(),
            attributes: Vec::new(),
            text: String::new(),
            children,
        }
    }

    pub fn other(children: Vec<GenericNode>) -> Self {
        Self {
            kind: NodeKind::Other,
            tag: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            children,
        }
    }

    /// Builder-style attribute append.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Value of the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.kind == NodeKind::Element && self.tag.eq_ignore_ascii_case(tag)
    }

    /// Concatenated text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.kind {
            NodeKind::Text => out.push_str(&self.text),
            _ => self.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element named `tag` (self included).
    pub fn find_element(&self, tag: &str) -> Option<&GenericNode> {
        if self.is_element(tag) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_element(tag))
    }

    /// Copy an RcDom subtree into an owned tree.
    ///
    /// An element nested [`MAX_DEPTH`] levels below `handle` is replaced by a
    /// single text node holding its text content, so every later recursive
    /// pass (build, render, drop) stays within a bounded stack.
    pub fn from_rcdom(handle: &Handle) -> Self {
        Self::copy_rcdom(handle, 0)
    }

    fn copy_rcdom(handle: &Handle, depth: usize) -> Self {
        match &handle.data {
            NodeData::Text { contents } => GenericNode::text(contents.borrow().to_string()),
            NodeData::Element { .. } if depth >= MAX_DEPTH => {
                GenericNode::text(rcdom_text_content(handle))
            }
            NodeData::Element { name, attrs, .. } => GenericNode {
                kind: NodeKind::Element,
                tag: qualified_name(name),
                attributes: attrs
                    .borrow()
                    .iter()
                    .map(|a| (qualified_name(&a.name), a.value.to_string()))
                    .collect(),
                text: String::new(),
                children: rcdom_children(handle, depth),
            },
            NodeData::Document => GenericNode::other(rcdom_children(handle, depth)),
            NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => GenericNode::other(Vec::new()),
        }
    }
}

/// Deepest element nesting kept as structure.
pub const MAX_DEPTH: usize = 256;

fn rcdom_children(handle: &Handle, depth: usize) -> Vec<GenericNode> {
    handle
        .children
        .borrow()
        .iter()
        .map(|child| GenericNode::copy_rcdom(child, depth + 1))
        .collect()
}

/// Text of every descendant text node in document order. Iterative: the
/// subtree can be arbitrarily deep.
fn rcdom_text_content(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack: Vec<Handle> = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Text { contents } = &node.data {
            out.push_str(&contents.borrow());
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    out
}

fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", &**prefix, &*name.local),
        None => name.local.to_string(),
    }
}

/// Parse an HTML post body into a generic tree rooted at the document node.
///
/// html5ever is a full HTML5 parser: it never fails, and it always wraps
/// fragments in `html`/`head`/`body`.
pub fn parse_html(html: &str) -> GenericNode {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    GenericNode::from_rcdom(&dom.document)
}
