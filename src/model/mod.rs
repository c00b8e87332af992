//! Domain model: the input document tree and the output blocks.

mod block;
pub mod document;
mod wire;

pub use block::{
    Block, ColumnSetting, RichTextElement, RichTextList, StyledRun, TableBlock, TableCell,
};
pub use document::{
    CodeBlockNode, ColumnAlignment, Document, Inline, ListItem, ListNode, Node, TableNode,
};
