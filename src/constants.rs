// src/constants.rs
//! Platform constants that define the boundaries of a valid message.
//!
//! Each constant is named for the platform concept it constrains. Reading
//! them tells you what the chat platform will accept: how long a header
//! may be, how large a table may grow, how deep a list may indent.

// ---------------------------------------------------------------------------
// Text limits (violations are truncated)
// ---------------------------------------------------------------------------

/// Maximum characters in a header block's plain-text title.
pub const HEADER_MAX_CHARS: usize = 150;

/// Maximum characters in a section block's markup text, and in the text of a
/// single rich-text element.
pub const SECTION_MAX_CHARS: usize = 3000;

/// Marker appended to truncated text. Counted inside the limit.
pub const ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Table limits (violations are rejected)
// ---------------------------------------------------------------------------

/// Maximum rows in a table block, header row included.
pub const TABLE_MAX_ROWS: usize = 100;

/// Maximum cells in any single table row.
pub const TABLE_MAX_COLUMNS: usize = 20;

/// Maximum characters in a block identifier.
pub const BLOCK_ID_MAX_CHARS: usize = 255;

/// Text used for a table cell with no content. The platform rejects empty text.
pub const EMPTY_CELL_TEXT: &str = " ";

/// Text used for a rich-text section or quote with no content, for the same reason.
pub const EMPTY_RUN_TEXT: &str = " ";

/// Zero-width space placed around a literal `*`, `_`, `~` or `` ` `` in user
/// text so the platform cannot pair it into styling.
pub const STYLE_GUARD: char = '\u{200B}';

// ---------------------------------------------------------------------------
// Rich-text limits
// ---------------------------------------------------------------------------

/// Deepest list indent the platform renders distinctly.
///
/// Deeper nesting in the source collapses onto this level.
pub const LIST_MAX_INDENT: usize = 8;

// ---------------------------------------------------------------------------
// Parser limits
// ---------------------------------------------------------------------------

/// Deepest quote/list nesting kept in the document tree. Deeper containers
/// are not opened; their content joins the container at this depth.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Deepest nesting of inline styling spans kept in the document tree.
pub const MAX_INLINE_DEPTH: usize = 32;

// ---------------------------------------------------------------------------
// Capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated output blocks per top-level node, used to pre-allocate.
pub const BLOCKS_PER_NODE_ESTIMATE: usize = 1;

/// Estimated characters per inline span when building markup strings.
pub const CHARS_PER_SPAN_ESTIMATE: usize = 16;
