// src/formatting/constraints.rs
//! Platform limits and what to do when content exceeds them.
//!
//! Text limits are soft: content is cut at a character boundary and the
//! ellipsis marker is appended within the limit. Table limits are hard: the
//! caller gets a [`ConstraintViolation`] naming the limit and the count.

use crate::constants::{
    BLOCK_ID_MAX_CHARS, ELLIPSIS, HEADER_MAX_CHARS, LIST_MAX_INDENT, SECTION_MAX_CHARS,
    TABLE_MAX_COLUMNS, TABLE_MAX_ROWS,
};
use crate::error::ConstraintViolation;
use crate::model::StyledRun;

/// Truncates a header title to the header limit.
pub fn enforce_title(title: String) -> String {
    truncate_with_ellipsis(title, HEADER_MAX_CHARS)
}

/// Truncates section or rich-text text to the section limit.
pub fn enforce_text(text: String) -> String {
    truncate_with_ellipsis(text, SECTION_MAX_CHARS)
}

/// Truncates section markup to the section limit without leaving a link or
/// entity open.
pub fn enforce_markup(markup: String) -> String {
    truncate_markup(markup, SECTION_MAX_CHARS)
}

/// Like [`truncate_with_ellipsis`], but the cut backs up to before a `<` with
/// no closing `>` or an `&` with no closing `;`.
pub fn truncate_markup(markup: String, limit: usize) -> String {
    let length = markup.chars().count();
    if length <= limit {
        return markup;
    }

    let keep = limit.saturating_sub(ELLIPSIS.chars().count());
    let mut cut = markup
        .char_indices()
        .nth(keep)
        .map(|(index, _)| index)
        .unwrap_or(markup.len());

    if let Some(open) = markup[..cut].rfind('<') {
        if !markup[open..cut].contains('>') {
            cut = open;
        }
    }
    if let Some(amp) = markup[..cut].rfind('&') {
        if !markup[amp..cut].contains(';') {
            cut = amp;
        }
    }

    log::debug!("Truncating markup of {} chars to {}", length, limit);
    let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
    truncated.push_str(&markup[..cut]);
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Truncates `text` to at most `limit` characters, ending in the ellipsis
/// marker when anything was cut. Text within the limit is returned unchanged.
pub fn truncate_with_ellipsis(text: String, limit: usize) -> String {
    let length = text.chars().count();
    if length <= limit {
        return text;
    }

    let keep = limit.saturating_sub(ELLIPSIS.chars().count());
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(index, _)| index)
        .unwrap_or(text.len());

    log::debug!("Truncating text of {} chars to {}", length, limit);
    let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
    truncated.push_str(&text[..cut]);
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Truncates a sequence of styled runs so their combined text fits the
/// section limit. The ellipsis joins the style of the last run kept.
pub fn enforce_runs(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    let total: usize = runs.iter().map(|run| run.text.chars().count()).sum();
    if total <= SECTION_MAX_CHARS {
        return runs;
    }

    let mut budget = SECTION_MAX_CHARS - ELLIPSIS.chars().count();
    let mut kept = Vec::with_capacity(runs.len());
    for mut run in runs {
        if budget == 0 {
            break;
        }
        let length = run.text.chars().count();
        if length > budget {
            let cut = run
                .text
                .char_indices()
                .nth(budget)
                .map(|(index, _)| index)
                .unwrap_or(run.text.len());
            run.text.truncate(cut);
            budget = 0;
        } else {
            budget -= length;
        }
        kept.push(run);
    }

    match kept.last_mut() {
        Some(last) => last.text.push_str(ELLIPSIS),
        None => kept.push(StyledRun::plain(ELLIPSIS)),
    }
    log::debug!("Truncated rich text of {} chars", total);
    kept
}

/// Rejects a table with more rows than the platform accepts.
pub fn check_row_count(count: usize) -> Result<(), ConstraintViolation> {
    if count > TABLE_MAX_ROWS {
        return Err(ConstraintViolation::TooManyRows {
            count,
            max: TABLE_MAX_ROWS,
        });
    }
    Ok(())
}

/// Rejects a table row with more cells than the platform accepts.
pub fn check_row_width(row: usize, count: usize) -> Result<(), ConstraintViolation> {
    if count > TABLE_MAX_COLUMNS {
        return Err(ConstraintViolation::RowTooWide {
            row,
            count,
            max: TABLE_MAX_COLUMNS,
        });
    }
    Ok(())
}

/// Rejects a block identifier longer than the platform accepts.
pub fn check_identifier(identifier: &str) -> Result<(), ConstraintViolation> {
    let length = identifier.chars().count();
    if length > BLOCK_ID_MAX_CHARS {
        return Err(ConstraintViolation::IdentifierTooLong {
            length,
            max: BLOCK_ID_MAX_CHARS,
        });
    }
    Ok(())
}

/// Clamps a list nesting depth to the deepest indent the platform renders.
pub fn clamp_list_depth(depth: usize) -> usize {
    depth.min(LIST_MAX_INDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        let text = "Hello *world*".to_string();
        assert_eq!(enforce_text(text.clone()), text);

        let exact = "a".repeat(SECTION_MAX_CHARS);
        assert_eq!(enforce_text(exact.clone()), exact);
    }

    #[test]
    fn test_long_title_is_cut_with_ellipsis() {
        let title = enforce_title("A".repeat(200));
        assert_eq!(title.chars().count(), HEADER_MAX_CHARS);
        assert!(title.ends_with("..."));
        assert!(title.starts_with(&"A".repeat(147)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(200);
        let truncated = truncate_with_ellipsis(text, HEADER_MAX_CHARS);
        assert_eq!(truncated.chars().count(), HEADER_MAX_CHARS);
        assert_eq!(truncated.chars().filter(|c| *c == 'é').count(), 147);
    }

    #[test]
    fn test_markup_cut_never_splits_a_link() {
        let markup = format!("{} <https://example.com|link text>", "a".repeat(2990));
        let truncated = enforce_markup(markup);
        assert_eq!(truncated, format!("{} ...", "a".repeat(2990)));
        assert!(!truncated.contains('<'));
    }

    #[test]
    fn test_markup_cut_never_splits_an_entity() {
        let markup = format!("{} &amp; tail", "a".repeat(2995));
        let truncated = enforce_markup(markup);
        assert_eq!(truncated, format!("{} ...", "a".repeat(2995)));
    }

    #[test]
    fn test_markup_cut_keeps_closed_links_and_entities() {
        let markup = format!("<https://a.example|a> &lt; {}", "b".repeat(3000));
        let truncated = enforce_markup(markup);
        assert_eq!(truncated.chars().count(), SECTION_MAX_CHARS);
        assert!(truncated.starts_with("<https://a.example|a> &lt; b"));
        assert!(truncated.ends_with("b..."));
    }

    #[test]
    fn test_runs_are_cut_across_boundaries() {
        let runs = vec![
            StyledRun::plain("a".repeat(2000)),
            StyledRun {
                text: "b".repeat(2000),
                bold: true,
                ..Default::default()
            },
            StyledRun::plain("c".repeat(10)),
        ];

        let kept = enforce_runs(runs);
        assert_eq!(kept.len(), 2);
        let total: usize = kept.iter().map(|run| run.text.chars().count()).sum();
        assert_eq!(total, SECTION_MAX_CHARS);
        assert!(kept[1].bold);
        assert!(kept[1].text.ends_with("..."));
    }

    #[test]
    fn test_table_limits() {
        assert!(check_row_count(100).is_ok());
        assert_eq!(
            check_row_count(101),
            Err(ConstraintViolation::TooManyRows {
                count: 101,
                max: 100
            })
        );
        assert!(check_row_width(0, 20).is_ok());
        assert_eq!(
            check_row_width(7, 21),
            Err(ConstraintViolation::RowTooWide {
                row: 7,
                count: 21,
                max: 20
            })
        );
        assert!(check_identifier(&"x".repeat(255)).is_ok());
        assert!(check_identifier(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_list_depth_clamps() {
        assert_eq!(clamp_list_depth(0), 0);
        assert_eq!(clamp_list_depth(LIST_MAX_INDENT), LIST_MAX_INDENT);
        assert_eq!(clamp_list_depth(LIST_MAX_INDENT + 5), LIST_MAX_INDENT);
    }
}
