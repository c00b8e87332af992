// src/formatting/table_builder.rs
//! Table building logic.
//!
//! Keeps construction and validation of table blocks separate from the
//! renderer, so callers can also build tables from their own data.

use super::constraints::{check_identifier, check_row_count, check_row_width};
use super::inline::to_plain_text;
use crate::constants::EMPTY_CELL_TEXT;
use crate::error::ConstraintViolation;
use crate::model::{ColumnAlignment, ColumnSetting, TableBlock, TableCell, TableNode};

// --- Table Builder ---

/// Builder for table blocks.
///
/// Rows are taken as-is: the header row, when there is one, is simply the
/// first row. [`build`](Self::build) rejects tables the platform cannot
/// accept rather than trimming them.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rows: Vec<Vec<String>>,
    alignments: Vec<ColumnAlignment>,
    identifier: Option<String>,
}

impl TableBuilder {
    /// Creates a builder over rows of cell text.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Creates a builder from a parsed table: header row first, then body rows.
    ///
    /// Cells carry plain text because table cells do not render markup.
    pub fn from_node(table: &TableNode) -> Self {
        let rows = std::iter::once(&table.header)
            .chain(table.rows.iter())
            .map(|row| row.iter().map(|cell| to_plain_text(cell)).collect())
            .collect();

        Self {
            rows,
            alignments: table.alignments.clone(),
            identifier: None,
        }
    }

    /// Sets the block identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets per-column alignment.
    pub fn with_alignments(mut self, alignments: Vec<ColumnAlignment>) -> Self {
        self.alignments = alignments;
        self
    }

    /// Builds the table, enforcing row count, row width and identifier length.
    pub fn build(self) -> Result<TableBlock, ConstraintViolation> {
        check_row_count(self.rows.len())?;
        if let Some(identifier) = &self.identifier {
            check_identifier(identifier)?;
        }
        for (index, row) in self.rows.iter().enumerate() {
            check_row_width(index, row.len())?;
        }

        let column_settings = self.build_column_settings();
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(build_cell).collect())
            .collect::<Vec<Vec<TableCell>>>();

        log::debug!(
            "Built table with {} rows (identifier: {:?})",
            rows.len(),
            self.identifier
        );

        Ok(TableBlock {
            rows,
            identifier: self.identifier,
            column_settings,
        })
    }

    /// Column settings are only kept when some column declares an alignment.
    fn build_column_settings(&self) -> Vec<ColumnSetting> {
        if self
            .alignments
            .iter()
            .all(|align| *align == ColumnAlignment::None)
        {
            return Vec::new();
        }
        self.alignments
            .iter()
            .map(|align| ColumnSetting { align: *align })
            .collect()
    }
}

fn build_cell(text: String) -> TableCell {
    let trimmed = text.trim();
    let text = if trimmed.is_empty() {
        EMPTY_CELL_TEXT.to_string()
    } else if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_string()
    };
    TableCell { text }
}

/// Builds a table block from a parsed table node with an optional identifier.
pub fn build_table(
    table: &TableNode,
    identifier: Option<&str>,
) -> Result<TableBlock, ConstraintViolation> {
    let builder = TableBuilder::from_node(table);
    match identifier {
        Some(identifier) => builder.with_identifier(identifier).build(),
        None => builder.build(),
    }
}
