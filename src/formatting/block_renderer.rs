// src/formatting/block_renderer.rs
//! Block rendering engine: converts a document tree into message blocks.
//!
//! Each top-level node maps to at most one block, in document order. The
//! traversal is a fold over the document's children; no state survives
//! between calls.

use super::constraints::{enforce_markup, enforce_title};
use super::inline::{to_markup, to_plain_text};
use super::rich_text::assemble;
use super::table_builder::TableBuilder;
use crate::config::RenderOptions;
use crate::constants::BLOCKS_PER_NODE_ESTIMATE;
use crate::error::AppError;
use crate::model::{Block, Document, Inline, Node, TableNode};

// --- Core Types ---

/// Something that renders document nodes into blocks.
pub trait NodeRenderer {
    /// Renders one node. `Ok(None)` means the node produces no block.
    fn render_node(&self, node: &Node) -> Result<Option<Block>, AppError>;

    /// Renders nodes in order, skipping those that produce no block.
    fn render_nodes(&self, nodes: &[Node]) -> Result<Vec<Block>, AppError> {
        nodes.iter().try_fold(
            Vec::with_capacity(nodes.len() * BLOCKS_PER_NODE_ESTIMATE),
            |mut blocks, node| {
                if let Some(block) = self.render_node(node)? {
                    blocks.push(block);
                }
                Ok(blocks)
            },
        )
    }
}

/// Renders nodes into the platform's block kinds.
#[derive(Debug, Clone, Copy)]
pub struct BlockKitRenderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> BlockKitRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Headers carry no markup, so styling is discarded.
    fn render_heading(&self, children: &[Inline]) -> Block {
        let title = to_plain_text(children).trim().to_string();
        Block::Header {
            title: enforce_title(title),
        }
    }

    fn render_paragraph(&self, children: &[Inline]) -> Block {
        let markup = to_markup(children).trim().to_string();
        Block::Section {
            markup_text: enforce_markup(markup),
            expand: self.options.expand_sections,
        }
    }

    fn render_table(&self, table: &TableNode) -> Result<Block, AppError> {
        let table = TableBuilder::from_node(table).build().map_err(|violation| {
            log::debug!(
                "Rejecting table ({}): {}",
                violation.limit_name(),
                violation
            );
            violation
        })?;
        Ok(Block::Table(table))
    }

    fn render_rich_text(&self, node: &Node) -> Option<Block> {
        assemble(node).map(|element| Block::RichText {
            elements: vec![element],
        })
    }
}

impl NodeRenderer for BlockKitRenderer<'_> {
    fn render_node(&self, node: &Node) -> Result<Option<Block>, AppError> {
        let block = match node {
            Node::Heading { children, .. } => Some(self.render_heading(children)),
            Node::Paragraph(children) => Some(self.render_paragraph(children)),
            Node::ThematicBreak => Some(Block::Divider),
            Node::Table(table) => Some(self.render_table(table)?),
            Node::List(_) | Node::Quote(_) | Node::CodeBlock(_) => self.render_rich_text(node),
            Node::Html(_) | Node::Unsupported { .. } => None,
        };

        match &block {
            Some(block) => log::debug!("Rendered {} as {} block", node.kind(), block.type_name()),
            None => log::debug!("Skipping unsupported {} node", node.kind()),
        }
        Ok(block)
    }
}

// --- Public API ---

/// Renders a document's top-level nodes into blocks.
///
/// Fails only when a table violates a hard platform limit.
pub fn render_document(document: &Document, options: &RenderOptions) -> Result<Vec<Block>, AppError> {
    log::debug!(
        "Rendering {} top-level nodes (expand sections: {})",
        document.children.len(),
        options.expand_sections
    );
    BlockKitRenderer::new(options).render_nodes(&document.children)
}
