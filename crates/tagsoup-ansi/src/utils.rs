//! Markup-aware text utilities.
//!
//! Rendered lines carry inline delimiters for a downstream styling layer:
//! `<u>` and `<b>` open underline and bold, `</>` closes the innermost
//! style, `<>` stands for a literal `<`, and any other `<name>` opens a
//! highlight style. This module measures, strips and styles such lines.

use crate::codes::{BOLD_ON, RESET, REVERSE_ON, UNDERLINE_ON};
use crate::sanitize::sanitize_for_terminal;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

/// Regex pattern for all ANSI escape sequences including OSC.
/// Matches:
/// - CSI sequences: \x1b[...letter
/// - OSC sequences: \x1b]...;\
/// - Simple escapes: \x1b)
pub const ANSIESCAPE: &str = r"\x1b(?:\[[0-9;?]*[a-zA-Z]|\][0-9]*;;.*?\\|\))";

/// Compiled regex for ANSIESCAPE pattern.
static ANSIESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ANSIESCAPE).unwrap());

/// A piece of a marked-up line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text (`<>` already turned into `<`)
    Text(&'a str),
    /// `<name>`
    Open(&'a str),
    /// `</>`
    Close,
}

fn is_style_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Split a marked-up line into text and delimiter segments.
///
/// A `<` that does not start a well-formed delimiter is kept as text.
///
/// # Example
///
/// ```
/// use tagsoup_ansi::utils::{segments, Segment};
/// assert_eq!(
///     segments("a<u>b</>c<>"),
///     vec![
///         Segment::Text("a"),
///         Segment::Open("u"),
///         Segment::Text("b"),
///         Segment::Close,
///         Segment::Text("c"),
///         Segment::Text("<"),
///     ]
/// );
/// ```
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        if lt > 0 {
            result.push(Segment::Text(&rest[..lt]));
        }
        let literal = &rest[lt..lt + 1];
        let after = &rest[lt + 1..];
        match after.find('>') {
            Some(0) => {
                result.push(Segment::Text(literal));
                rest = &after[1..];
            }
            Some(gt) if &after[..gt] == "/" => {
                result.push(Segment::Close);
                rest = &after[gt + 1..];
            }
            Some(gt) if is_style_name(&after[..gt]) => {
                result.push(Segment::Open(&after[..gt]));
                rest = &after[gt + 1..];
            }
            _ => {
                result.push(Segment::Text(literal));
                rest = after;
            }
        }
    }

    if !rest.is_empty() {
        result.push(Segment::Text(rest));
    }
    result
}

/// Display width of a marked-up line in terminal columns.
///
/// Delimiters take no space, `<>` takes one column, and everything else
/// is measured with Unicode display widths (CJK is double-width).
///
/// # Example
///
/// ```
/// use tagsoup_ansi::utils::markup_width;
/// assert_eq!(markup_width("Hello <u>world</>[1]."), 15);
/// assert_eq!(markup_width("a <> b"), 5);
/// assert_eq!(markup_width("你好"), 4);
/// ```
pub fn markup_width(text: &str) -> usize {
    segments(text)
        .iter()
        .map(|segment| match segment {
            Segment::Text(t) => t.width(),
            Segment::Open(_) | Segment::Close => 0,
        })
        .sum()
}

/// Remove all delimiters, leaving the plain text.
///
/// # Example
///
/// ```
/// use tagsoup_ansi::utils::strip_markup;
/// assert_eq!(strip_markup("<b>x</> <> y"), "x < y");
/// ```
pub fn strip_markup(text: &str) -> String {
    segments(text)
        .iter()
        .filter_map(|segment| match segment {
            Segment::Text(t) => Some(*t),
            _ => None,
        })
        .collect()
}

/// Translate delimiters into ANSI escape sequences.
///
/// Text is sanitized on the way so that documents cannot smuggle their
/// own escape sequences into the terminal. Styles still open at the end
/// of the line are reset.
///
/// # Example
///
/// ```
/// use tagsoup_ansi::utils::stylize;
/// assert_eq!(stylize("<b>hi</>"), "\x1b[1mhi\x1b[0m");
/// ```
pub fn stylize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut open = 0usize;

    for segment in segments(text) {
        match segment {
            Segment::Text(t) => result.push_str(&sanitize_for_terminal(t)),
            Segment::Open(name) => {
                open += 1;
                result.push_str(match name {
                    "u" => UNDERLINE_ON,
                    "b" => BOLD_ON,
                    _ => REVERSE_ON,
                });
            }
            Segment::Close => {
                open = open.saturating_sub(1);
                result.push_str(RESET);
            }
        }
    }

    if open > 0 {
        result.push_str(RESET);
    }
    result
}

/// Remove all ANSI escape sequences from text.
///
/// # Example
///
/// ```
/// use tagsoup_ansi::utils::visible;
/// let text = "\x1b[1mBold\x1b[0m text";
/// assert_eq!(visible(text), "Bold text");
/// ```
pub fn visible(text: &str) -> String {
    ANSIESCAPE_RE.replace_all(text, "").to_string()
}

/// Display width of text that may contain ANSI escape sequences.
pub fn visible_length(text: &str) -> usize {
    visible(text).width()
}
