//! JSON wire representation of output blocks.
//!
//! The structs here mirror the platform's block schema and borrow from the
//! block values they encode. `Block` implements `Serialize` by converting to
//! a [`WireBlock`] first.

use super::block::{Block, RichTextElement, RichTextList, StyledRun, TableBlock};
use super::document::ColumnAlignment;
use crate::constants::EMPTY_RUN_TEXT;
use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock<'a> {
    Header {
        text: WireText<'a>,
    },
    Section {
        text: WireText<'a>,
        #[serde(skip_serializing_if = "is_false")]
        expand: bool,
    },
    Divider {},
    RichText {
        elements: Vec<WireRichElement<'a>>,
    },
    Table {
        rows: Vec<Vec<WireText<'a>>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column_settings: Option<Vec<Option<WireColumnSetting>>>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireText<'a> {
    PlainText { text: &'a str },
    Mrkdwn { text: &'a str },
    RawText { text: &'a str },
}

#[derive(Debug, Serialize)]
struct WireColumnSetting {
    align: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireRichElement<'a> {
    RichTextSection {
        elements: Vec<WireInline<'a>>,
    },
    RichTextList {
        style: &'static str,
        indent: usize,
        #[serde(skip_serializing_if = "is_zero")]
        offset: u64,
        elements: Vec<WireRichElement<'a>>,
    },
    RichTextQuote {
        elements: Vec<WireInline<'a>>,
    },
    RichTextPreformatted {
        elements: Vec<WireInline<'a>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<&'a str>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireInline<'a> {
    Text {
        text: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<WireStyle>,
    },
    Link {
        url: &'a str,
        text: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<WireStyle>,
    },
}

#[derive(Debug, Serialize)]
struct WireStyle {
    #[serde(skip_serializing_if = "is_false")]
    bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    strike: bool,
    #[serde(skip_serializing_if = "is_false")]
    code: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

// --- Conversions ---

impl<'a> From<&'a Block> for WireBlock<'a> {
    fn from(block: &'a Block) -> Self {
        match block {
            Block::Header { title } => WireBlock::Header {
                text: WireText::PlainText { text: title },
            },
            Block::Section {
                markup_text,
                expand,
            } => WireBlock::Section {
                text: WireText::Mrkdwn { text: markup_text },
                expand: *expand,
            },
            Block::Divider => WireBlock::Divider {},
            Block::RichText { elements } => {
                let mut out = Vec::with_capacity(elements.len());
                encode_elements(elements, &mut out);
                WireBlock::RichText { elements: out }
            }
            Block::Table(table) => encode_table(table),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireBlock::from(self).serialize(serializer)
    }
}

fn encode_table(table: &TableBlock) -> WireBlock<'_> {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| WireText::RawText { text: &cell.text })
                .collect()
        })
        .collect();

    let has_alignment = table
        .column_settings
        .iter()
        .any(|setting| setting.align != ColumnAlignment::None);
    let column_settings = has_alignment.then(|| {
        table
            .column_settings
            .iter()
            .map(|setting| alignment_name(setting.align).map(|align| WireColumnSetting { align }))
            .collect()
    });

    WireBlock::Table {
        rows,
        block_id: table.identifier.as_deref(),
        column_settings,
    }
}

fn alignment_name(align: ColumnAlignment) -> Option<&'static str> {
    match align {
        ColumnAlignment::None => None,
        ColumnAlignment::Left => Some("left"),
        ColumnAlignment::Center => Some("center"),
        ColumnAlignment::Right => Some("right"),
    }
}

fn encode_elements<'a>(elements: &'a [RichTextElement], out: &mut Vec<WireRichElement<'a>>) {
    for element in elements {
        match element {
            RichTextElement::Section(runs) => out.push(WireRichElement::RichTextSection {
                elements: non_empty(encode_runs(runs)),
            }),
            RichTextElement::Quote(runs) => out.push(WireRichElement::RichTextQuote {
                elements: non_empty(encode_runs(runs)),
            }),
            RichTextElement::Preformatted { text, language } => {
                out.push(WireRichElement::RichTextPreformatted {
                    elements: vec![WireInline::Text { text, style: None }],
                    language: language.as_deref(),
                })
            }
            RichTextElement::List(list) => encode_list(list, out),
        }
    }
}

/// Flattens a nested list into sibling `rich_text_list` elements.
///
/// The platform only accepts sections inside a list, so each item becomes one
/// section. Anything else an item holds (a nested list, code, a quote) closes
/// the current chunk, is emitted after it, and the list resumes in a new chunk
/// whose offset continues the numbering.
fn encode_list<'a>(list: &'a RichTextList, out: &mut Vec<WireRichElement<'a>>) {
    let mut chunk: Vec<WireRichElement<'a>> = Vec::new();
    let mut chunk_start = 0usize;

    for (index, item) in list.items.iter().enumerate() {
        let mut section: Vec<WireInline<'a>> = Vec::new();
        let mut interrupting: Vec<&'a RichTextElement> = Vec::new();

        for child in item {
            match child {
                RichTextElement::Section(runs) if interrupting.is_empty() => {
                    if !section.is_empty() {
                        section.push(WireInline::Text {
                            text: "\n",
                            style: None,
                        });
                    }
                    section.extend(encode_runs(runs));
                }
                other => interrupting.push(other),
            }
        }

        // An item that opens with a nested list or code has no section of
        // its own; its content follows the chunk instead.
        if !section.is_empty() || interrupting.is_empty() {
            chunk.push(WireRichElement::RichTextSection {
                elements: non_empty(section),
            });
        }

        if !interrupting.is_empty() {
            flush_list_chunk(list, &mut chunk, chunk_start, out);
            for element in interrupting {
                encode_elements(std::slice::from_ref(element), out);
            }
            chunk_start = index + 1;
        }
    }

    flush_list_chunk(list, &mut chunk, chunk_start, out);
}

fn flush_list_chunk<'a>(
    list: &RichTextList,
    chunk: &mut Vec<WireRichElement<'a>>,
    chunk_start: usize,
    out: &mut Vec<WireRichElement<'a>>,
) {
    if chunk.is_empty() {
        return;
    }
    let (style, offset) = if list.ordered {
        ("ordered", list.offset.saturating_sub(1) + chunk_start as u64)
    } else {
        ("bullet", 0)
    };
    out.push(WireRichElement::RichTextList {
        style,
        indent: list.depth,
        offset,
        elements: std::mem::take(chunk),
    });
}

/// The platform rejects a section or quote with no elements.
fn non_empty(mut elements: Vec<WireInline<'_>>) -> Vec<WireInline<'_>> {
    if elements.is_empty() {
        elements.push(WireInline::Text {
            text: EMPTY_RUN_TEXT,
            style: None,
        });
    }
    elements
}

fn encode_runs(runs: &[StyledRun]) -> Vec<WireInline<'_>> {
    runs.iter()
        .map(|run| {
            let style = run.has_styling().then(|| WireStyle {
                bold: run.bold,
                italic: run.italic,
                strike: run.strike,
                code: run.code,
            });
            match &run.link_url {
                Some(url) => WireInline::Link {
                    url,
                    text: &run.text,
                    style,
                },
                None => WireInline::Text {
                    text: &run.text,
                    style,
                },
            }
        })
        .collect()
}
