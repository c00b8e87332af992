// src/pipeline.rs
//! Pipeline capability traits for the two stages of markdown-to-blocks conversion.
//!
//! Parsing and composing are separate so each stage can be swapped or tested
//! on its own.

use crate::error::AppError;
use crate::formatting::{BlockKitRenderer, NodeRenderer};
use crate::model::{Block, Document};

/// Turns markdown text into a document tree. Parsing never fails; malformed
/// markdown still yields a tree.
pub trait DocumentParser {
    fn parse(&self, text: &str) -> Document;
}

/// Turns a document tree into message blocks.
pub trait BlockComposer {
    fn compose(&self, document: &Document) -> Result<Vec<Block>, AppError>;
}

impl BlockComposer for BlockKitRenderer<'_> {
    fn compose(&self, document: &Document) -> Result<Vec<Block>, AppError> {
        self.render_nodes(&document.children)
    }
}

/// Runs both stages over `text`.
pub fn convert<P, C>(parser: &P, composer: &C, text: &str) -> Result<Vec<Block>, AppError>
where
    P: DocumentParser + ?Sized,
    C: BlockComposer + ?Sized,
{
    let document = parser.parse(text);
    composer.compose(&document)
}
