//! Output blocks.
//!
//! Values here are built once by the renderer and never mutated afterwards.
//! Serialization to the platform's JSON schema lives in [`super::wire`].

use super::document::ColumnAlignment;

/// A top-level unit of a chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Header { title: String },
    Section { markup_text: String, expand: bool },
    Divider,
    RichText { elements: Vec<RichTextElement> },
    Table(TableBlock),
}

impl Block {
    /// The platform's `type` tag for this block.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Header { .. } => "header",
            Block::Section { .. } => "section",
            Block::Divider => "divider",
            Block::RichText { .. } => "rich_text",
            Block::Table(_) => "table",
        }
    }
}

/// A table block. Construct through [`crate::TableBuilder`], which enforces
/// the row, width and identifier limits.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub(crate) rows: Vec<Vec<TableCell>>,
    pub(crate) identifier: Option<String>,
    pub(crate) column_settings: Vec<ColumnSetting>,
}

impl TableBlock {
    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn column_settings(&self) -> &[ColumnSetting] {
        &self.column_settings
    }
}

/// A table cell holding raw (unstyled) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
}

/// Per-column display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSetting {
    pub align: ColumnAlignment,
}

/// A nested unit inside a rich-text block.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextElement {
    Section(Vec<StyledRun>),
    List(RichTextList),
    Quote(Vec<StyledRun>),
    Preformatted {
        text: String,
        language: Option<String>,
    },
}

/// A list inside a rich-text block.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextList {
    pub ordered: bool,
    /// Nesting level, 0 for a top-level list.
    pub depth: usize,
    /// Number the first item carries (1 unless the source declared otherwise).
    pub offset: u64,
    pub items: Vec<Vec<RichTextElement>>,
}

/// A contiguous span of text with one set of style flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strike: bool,
    pub link_url: Option<String>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Whether two runs carry the same styling and link target.
    pub fn same_style(&self, other: &StyledRun) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.code == other.code
            && self.strike == other.strike
            && self.link_url == other.link_url
    }

    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.code || self.strike
    }
}
