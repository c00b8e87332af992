//! Markup rendering for section text.

use super::to_plain_text;
use crate::constants::{CHARS_PER_SPAN_ESTIMATE, STYLE_GUARD};
use crate::model::Inline;

/// Renders spans as platform markup: `*bold*`, `_italic_`, `` `code` ``,
/// `~strike~`, `<url|text>`. Images degrade to links.
///
/// Literal text is escaped so it cannot open a link or mention, and its
/// styling characters are guarded so they cannot pair into styling.
pub fn to_markup(spans: &[Inline]) -> String {
    let mut out = String::with_capacity(spans.len() * CHARS_PER_SPAN_ESTIMATE);
    for span in spans {
        write_markup(span, &mut out);
    }
    out
}

/// Escapes literal text for platform markup.
///
/// `&`, `<` and `>` become entities. `*`, `_`, `~` and `` ` `` are wrapped in
/// zero-width spaces, since the platform has no escape for them.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_literal(&mut out, text);
    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '*' | '_' | '~' | '`' => {
                out.push(STYLE_GUARD);
                out.push(c);
                out.push(STYLE_GUARD);
            }
            _ => push_escaped_char(out, c),
        }
    }
}

/// Entity-escapes only; used inside code spans and link targets, where
/// styling characters are inert.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        push_escaped_char(out, c);
    }
}

fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}

fn write_markup(span: &Inline, out: &mut String) {
    match span {
        Inline::Text(text) => push_literal(out, text),
        Inline::Strong(children) => wrap(out, '*', children),
        Inline::Emphasis(children) => wrap(out, '_', children),
        Inline::Strikethrough(children) => wrap(out, '~', children),
        Inline::Code(literal) => {
            if !literal.is_empty() {
                out.push('`');
                push_escaped(out, literal);
                out.push('`');
            }
        }
        Inline::Link { url, children } => {
            let text = to_markup(children);
            if text.is_empty() || to_plain_text(children) == *url {
                write_link(out, url, None);
            } else {
                write_link(out, url, Some(&text));
            }
        }
        Inline::Image { url, alt } => {
            if alt.is_empty() {
                write_link(out, url, None);
            } else {
                write_link(out, url, Some(&escape_markup(alt)));
            }
        }
        Inline::LineBreak => out.push('\n'),
    }
}

/// Wraps rendered children in a style marker. Empty content emits nothing.
fn wrap(out: &mut String, marker: char, children: &[Inline]) {
    let inner = to_markup(children);
    if inner.is_empty() {
        return;
    }
    out.push(marker);
    out.push_str(&inner);
    out.push(marker);
}

fn write_link(out: &mut String, url: &str, text: Option<&str>) {
    out.push('<');
    push_escaped(out, url);
    if let Some(text) = text {
        out.push('|');
        out.push_str(text);
    }
    out.push('>');
}
