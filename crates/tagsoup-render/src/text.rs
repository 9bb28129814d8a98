//! Text tokenizing and greedy word wrapping.
//!
//! Character data reaches the renderer as one string per text event. In
//! flowing mode it is split into words and single-space separators and
//! packed greedily into lines; in preformatted and iTunes mode explicit
//! newlines are kept.

use tagsoup_ansi::utils::markup_width;
use tagsoup_core::RenderState;

fn is_break_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// A piece of text split at line terminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// A `\n` in the input
    Newline,
    /// A run of text containing neither `\n` nor `\r`
    Segment(&'a str),
}

/// Escape literal `<` so it survives the inline markup layer as `<>`.
///
/// # Example
///
/// ```
/// use tagsoup_render::text::quote_markup;
/// assert_eq!(quote_markup("a < b"), "a <> b");
/// ```
pub fn quote_markup(text: &str) -> String {
    text.replace('<', "<>")
}

/// Split text into words, collapsing every whitespace run into one `" "`
/// token.
///
/// # Example
///
/// ```
/// use tagsoup_render::text::tokenize_spaced;
/// assert_eq!(tokenize_spaced(" a \n\tb"), vec![" ", "a", " ", "b"]);
/// ```
pub fn tokenize_spaced(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        let end = if is_break_space(first) {
            tokens.push(" ");
            rest.find(|c: char| !is_break_space(c)).unwrap_or(rest.len())
        } else {
            let end = rest.find(is_break_space).unwrap_or(rest.len());
            tokens.push(&rest[..end]);
            end
        };
        rest = &rest[end..];
    }

    tokens
}

/// Split text at line terminators.
///
/// Every `\n` becomes a [`LineToken::Newline`]; a `\r` only separates
/// segments.
pub fn tokenize_nl(text: &str) -> Vec<LineToken<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (pos, c) in text.char_indices() {
        if c == '\n' || c == '\r' {
            if pos > start {
                tokens.push(LineToken::Segment(&text[start..pos]));
            }
            if c == '\n' {
                tokens.push(LineToken::Newline);
            }
            start = pos + 1;
        }
    }

    if start < text.len() {
        tokens.push(LineToken::Segment(&text[start..]));
    }
    tokens
}

/// Delimiters that open an emphasis run.
const OPENING_MARKERS: [&str; 2] = ["<u>", "<b>"];

/// Detach the opening delimiters at the end of `line`.
///
/// Blanks mixed in with them stay on the line; the delimiters are returned
/// in order so they can start the next line instead.
fn take_trailing_openers(line: &mut String) -> String {
    let mut tail_start = line.len();
    loop {
        let head = &line[..tail_start];
        if let Some(marker) = OPENING_MARKERS.iter().find(|m| head.ends_with(**m)) {
            tail_start -= marker.len();
        } else if head.ends_with(' ') {
            tail_start -= 1;
        } else {
            break;
        }
    }

    let tail = line.split_off(tail_start);
    let mut openers = String::new();
    let mut rest = tail.as_str();
    while !rest.is_empty() {
        if let Some(marker) = OPENING_MARKERS.iter().find(|m| rest.starts_with(**m)) {
            openers.push_str(marker);
            rest = &rest[marker.len()..];
        } else {
            line.push(' ');
            rest = &rest[1..];
        }
    }
    openers
}

/// Append tokens to the current line, breaking lines greedily.
///
/// A token is moved to a fresh line when the line plus the token would
/// reach `width` columns. Opening delimiters waiting at the end of the
/// line move with it. A space token landing right after such a break
/// is dropped. A single token wider than `width` still goes on a line of
/// its own.
pub fn append_wrapped(state: &mut RenderState, tokens: &[&str], width: usize) {
    let mut line_width = markup_width(&state.current_line);
    let mut after_break = false;

    for token in tokens {
        let token_width = markup_width(token);
        if line_width + token_width >= width {
            let openers = take_trailing_openers(&mut state.current_line);
            state.flush_nonblank();
            state.prepare_newline();
            state.current_line.push_str(&openers);
            line_width = state.indent_padding();
            after_break = true;
        }

        if after_break && *token == " " {
            after_break = false;
            continue;
        }
        after_break = false;

        state.current_line.push_str(token);
        line_width += token_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_spaced_collapses_runs() {
        assert_eq!(tokenize_spaced("a  b"), vec!["a", " ", "b"]);
        assert_eq!(tokenize_spaced("a\r\n b "), vec!["a", " ", "b", " "]);
    }

    #[test]
    fn test_tokenize_spaced_empty() {
        assert!(tokenize_spaced("").is_empty());
        assert_eq!(tokenize_spaced("   "), vec![" "]);
    }

    #[test]
    fn test_tokenize_spaced_keeps_non_break_space() {
        assert_eq!(tokenize_spaced("a\u{a0}b"), vec!["a\u{a0}b"]);
    }

    #[test]
    fn test_tokenize_nl() {
        assert_eq!(
            tokenize_nl("a\n\nb\r\nc"),
            vec![
                LineToken::Segment("a"),
                LineToken::Newline,
                LineToken::Newline,
                LineToken::Segment("b"),
                LineToken::Newline,
                LineToken::Segment("c"),
            ]
        );
        assert!(tokenize_nl("").is_empty());
    }

    #[test]
    fn test_quote_markup() {
        assert_eq!(quote_markup("<<x"), "<><>x");
        assert_eq!(quote_markup("plain"), "plain");
    }

    #[test]
    fn test_append_wrapped_breaks_before_width() {
        let mut state = RenderState::new();
        append_wrapped(&mut state, &tokenize_spaced("aaa bbb ccc"), 8);
        assert_eq!(state.output_lines, vec!["aaa bbb"]);
        assert_eq!(state.current_line, "ccc");
    }

    #[test]
    fn test_append_wrapped_long_token_alone() {
        let mut state = RenderState::new();
        append_wrapped(&mut state, &tokenize_spaced("abcdefghij x"), 5);
        assert_eq!(state.output_lines, vec!["abcdefghij"]);
        assert_eq!(state.current_line, "x");
    }

    #[test]
    fn test_append_wrapped_respects_indent() {
        let mut state = RenderState::new();
        state.indent(1);
        state.prepare_newline();
        append_wrapped(&mut state, &tokenize_spaced("one two"), 7);
        assert_eq!(state.output_lines, vec!["  one "]);
        assert_eq!(state.current_line, "  two");
    }

    #[test]
    fn test_append_wrapped_carries_opening_marker() {
        let mut state = RenderState::new();
        append_wrapped(&mut state, &tokenize_spaced("aaaa bbbb "), 12);
        state.current_line.push_str("<u>");
        append_wrapped(&mut state, &["cc"], 12);
        assert_eq!(state.output_lines, vec!["aaaa bbbb "]);
        assert_eq!(state.current_line, "<u>cc");
    }

    #[test]
    fn test_append_wrapped_marker_only_line_not_flushed() {
        let mut state = RenderState::new();
        state.current_line.push_str("<b>");
        append_wrapped(&mut state, &["abcdefghij"], 5);
        assert!(state.output_lines.is_empty());
        assert_eq!(state.current_line, "<b>abcdefghij");
    }

    #[test]
    fn test_take_trailing_openers_keeps_blanks_and_closers() {
        let mut line = String::from("  x</> <b> <u>");
        assert_eq!(take_trailing_openers(&mut line), "<b><u>");
        assert_eq!(line, "  x</>  ");

        let mut line = String::from("x<>b>");
        assert_eq!(take_trailing_openers(&mut line), "");
        assert_eq!(line, "x<>b>");
    }

    #[test]
    fn test_append_wrapped_ignores_markup_width() {
        let mut state = RenderState::new();
        state.current_line.push_str("<u>ab</>");
        append_wrapped(&mut state, &["c"], 4);
        assert!(state.output_lines.is_empty());
        assert_eq!(state.current_line, "<u>ab</>c");
    }
}
