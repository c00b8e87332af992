// src/formatting/inline/mod.rs
//! Converts inline spans into the platform's text forms.
//!
//! Three renderings of the same span tree:
//! - [`to_markup`]: the platform's lightweight markup, for section blocks
//! - [`to_runs`]: styled runs, for rich-text elements
//! - [`to_plain_text`]: styling discarded, for headers and table cells

mod markup;
mod runs;

pub use markup::{escape_markup, to_markup};
pub use runs::to_runs;

use crate::model::Inline;

/// Flattens spans to their text content, discarding all styling.
///
/// Links keep their visible text (or the URL when they have none), images
/// keep their alt text, and line breaks become spaces.
pub fn to_plain_text(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        write_plain(span, &mut out);
    }
    out
}

fn write_plain(span: &Inline, out: &mut String) {
    match span {
        Inline::Text(text) | Inline::Code(text) => out.push_str(text),
        Inline::Strong(children) | Inline::Emphasis(children) | Inline::Strikethrough(children) => {
            for child in children {
                write_plain(child, out);
            }
        }
        Inline::Link { url, children } => {
            let text = to_plain_text(children);
            if text.is_empty() {
                out.push_str(url);
            } else {
                out.push_str(&text);
            }
        }
        Inline::Image { alt, .. } => out.push_str(alt),
        Inline::LineBreak => out.push(' '),
    }
}
