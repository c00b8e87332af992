// src/error.rs
//! Error types for block conversion.
//!
//! Only hard platform limits surface as errors. Over-long text is truncated
//! and unknown nodes are skipped, so neither appears here.

use thiserror::Error;

/// A platform limit that cannot be satisfied by truncation.
///
/// Raised at the point a table block is built. A table that violates one of
/// these cannot be posted at all, so the caller decides whether to drop it or
/// abort the whole message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("Table cannot have more than {max} rows (got {count})")]
    TooManyRows { count: usize, max: usize },

    #[error("Row {row} cannot have more than {max} columns (got {count})")]
    RowTooWide { row: usize, count: usize, max: usize },

    #[error("block_id cannot be longer than {max} characters (got {length})")]
    IdentifierTooLong { length: usize, max: usize },
}

impl ConstraintViolation {
    /// The name of the limit that was exceeded, as used in log output.
    pub fn limit_name(&self) -> &'static str {
        match self {
            Self::TooManyRows { .. } => "table_rows",
            Self::RowTooWide { .. } => "table_row_width",
            Self::IdentifierTooLong { .. } => "block_id_length",
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Constraint violation: {0}")]
    Constraint(#[from] ConstraintViolation),

    #[error("Failed to serialize blocks: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// The constraint that caused this error, if any.
    pub fn as_constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
