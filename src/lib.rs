// src/lib.rs
//! md2blocks library: converts markdown into chat-platform message blocks.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Conversion**: `markdown_to_blocks`, `markdown_to_block_objects`, `blocks_to_json`
//! - **Error handling**: `AppError`, `ConstraintViolation`
//! - **Configuration**: `RenderOptions`
//! - **Domain model**: `Document`, `Node`, `Inline`, `Block`, etc.
//! - **Formatting**: `render_document`, `BlockKitRenderer`, `TableBuilder`
//!
//! ```
//! use md2blocks::{markdown_to_blocks, RenderOptions};
//!
//! let blocks = markdown_to_blocks("**bold** and _italic_", &RenderOptions::default()).unwrap();
//! assert_eq!(blocks[0]["text"]["text"], "*bold* and _italic_");
//! ```

pub mod config;
mod constants;
mod error;
pub mod formatting;
pub mod model;
pub mod parser;
pub mod pipeline;

// --- Error Handling ---
pub use crate::error::{AppError, ConstraintViolation, Result};

// --- Configuration ---
pub use crate::config::RenderOptions;

// --- Domain Model ---
pub use crate::model::{
    Block, CodeBlockNode, ColumnAlignment, ColumnSetting, Document, Inline, ListItem, ListNode,
    Node, RichTextElement, RichTextList, StyledRun, TableBlock, TableCell, TableNode,
};

// --- Parsing ---
pub use crate::parser::{parse_markdown, CommonMarkParser};

// --- Formatting ---
pub use crate::formatting::{render_document, BlockKitRenderer, NodeRenderer, TableBuilder};

// --- Pipeline Traits ---
pub use crate::pipeline::{BlockComposer, DocumentParser};

use serde_json::Value;

/// Converts markdown into typed blocks.
///
/// Empty or whitespace-only input yields an empty list. Fails only when a
/// table exceeds the platform's row, column or identifier limits.
pub fn markdown_to_block_objects(text: &str, options: &RenderOptions) -> Result<Vec<Block>> {
    let blocks = pipeline::convert(
        &CommonMarkParser::default(),
        &BlockKitRenderer::new(options),
        text,
    )?;
    log::debug!("Converted markdown into {} blocks", blocks.len());
    Ok(blocks)
}

/// Converts markdown into the platform's JSON block objects.
pub fn markdown_to_blocks(text: &str, options: &RenderOptions) -> Result<Vec<Value>> {
    let blocks = markdown_to_block_objects(text, options)?;
    blocks_to_json(&blocks)
}

/// Serializes typed blocks into their JSON wire form.
pub fn blocks_to_json(blocks: &[Block]) -> Result<Vec<Value>> {
    blocks
        .iter()
        .map(|block| serde_json::to_value(block).map_err(AppError::from))
        .collect()
}
