//! Input document tree.
//!
//! Produced by a parser (see [`crate::parser`]) and read-only to the
//! renderer. Block-level nodes live in [`Node`], inline spans in [`Inline`].

use serde::{Deserialize, Serialize};

/// Root of a parsed markdown document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Heading { level: u8, children: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List(ListNode),
    Quote(Vec<Node>),
    CodeBlock(CodeBlockNode),
    Table(TableNode),
    ThematicBreak,
    /// Raw HTML block. The platform has no equivalent.
    Html(String),
    /// A node kind the parser recognized but this crate does not model.
    Unsupported { kind: String },
}

impl Node {
    /// Short name of the node kind, used in log output.
    pub fn kind(&self) -> &str {
        match self {
            Node::Heading { .. } => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::List(_) => "list",
            Node::Quote(_) => "quote",
            Node::CodeBlock(_) => "code_block",
            Node::Table(_) => "table",
            Node::ThematicBreak => "thematic_break",
            Node::Html(_) => "html",
            Node::Unsupported { kind } => kind,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph(vec![Inline::text(text)])
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            children: vec![Inline::text(text)],
        }
    }
}

/// A list, ordered or not, with its declared start number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNode {
    pub ordered: bool,
    /// Declared start number. Always 1 for unordered lists.
    pub start: u64,
    pub items: Vec<ListItem>,
}

impl ListNode {
    pub fn bulleted(items: Vec<ListItem>) -> Self {
        Self {
            ordered: false,
            start: 1,
            items,
        }
    }

    pub fn numbered(start: u64, items: Vec<ListItem>) -> Self {
        Self {
            ordered: true,
            start: start.max(1),
            items,
        }
    }
}

/// One item of a list. Its children are block nodes, so items may hold
/// paragraphs, code, quotes and nested lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

impl ListItem {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// An item holding a single paragraph of plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Node::paragraph(text)])
    }
}

/// Fenced or indented code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlockNode {
    pub language: Option<String>,
    pub literal: String,
}

/// A table: header row followed by body rows. Each cell is inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableNode {
    pub alignments: Vec<ColumnAlignment>,
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Column alignment declared in a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Inline span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    Strikethrough(Vec<Inline>),
    Link { url: String, children: Vec<Inline> },
    Image { url: String, alt: String },
    LineBreak,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        Inline::Link {
            url: url.into(),
            children: vec![Inline::text(text)],
        }
    }
}
