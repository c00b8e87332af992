//! Styled-run rendering for rich-text elements.

use super::to_plain_text;
use crate::model::{Inline, StyledRun};

/// Walks the span tree accumulating style flags onto each text leaf.
///
/// Adjacent runs with identical styling are merged, and empty runs are
/// dropped.
pub fn to_runs(spans: &[Inline]) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    collect_runs(spans, &StyledRun::default(), &mut runs);
    runs
}

fn collect_runs(spans: &[Inline], style: &StyledRun, runs: &mut Vec<StyledRun>) {
    for span in spans {
        match span {
            Inline::Text(text) => push_run(runs, style, text),
            Inline::Strong(children) => {
                let bold = StyledRun {
                    bold: true,
                    ..style.clone()
                };
                collect_runs(children, &bold, runs);
            }
            Inline::Emphasis(children) => {
                let italic = StyledRun {
                    italic: true,
                    ..style.clone()
                };
                collect_runs(children, &italic, runs);
            }
            Inline::Strikethrough(children) => {
                let strike = StyledRun {
                    strike: true,
                    ..style.clone()
                };
                collect_runs(children, &strike, runs);
            }
            Inline::Code(literal) => {
                let code = StyledRun {
                    code: true,
                    ..style.clone()
                };
                push_run(runs, &code, literal);
            }
            Inline::Link { url, children } => {
                let linked = StyledRun {
                    link_url: Some(url.clone()),
                    ..style.clone()
                };
                if to_plain_text(children).is_empty() {
                    push_run(runs, &linked, url);
                } else {
                    collect_runs(children, &linked, runs);
                }
            }
            Inline::Image { url, alt } => {
                let linked = StyledRun {
                    link_url: Some(url.clone()),
                    ..style.clone()
                };
                let text = if alt.is_empty() { url } else { alt };
                push_run(runs, &linked, text);
            }
            Inline::LineBreak => push_run(runs, style, "\n"),
        }
    }
}

fn push_run(runs: &mut Vec<StyledRun>, style: &StyledRun, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut() {
        if last.same_style(style) {
            last.text.push_str(text);
            return;
        }
    }
    runs.push(StyledRun {
        text: text.to_string(),
        ..style.clone()
    });
}
