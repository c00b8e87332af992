// src/formatting/mod.rs
//! Renders document trees into message blocks.

pub mod block_renderer;
pub mod constraints;
pub mod inline;
pub mod rich_text;
pub mod table_builder;

pub use block_renderer::{render_document, BlockKitRenderer, NodeRenderer};
pub use rich_text::assemble;
pub use table_builder::{build_table, TableBuilder};
