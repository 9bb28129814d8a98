//! Render state for one document.
//!
//! The [`RenderState`] struct holds everything the HTML renderer mutates
//! while it walks the event stream: the line under construction, the
//! finished lines, indentation and list context, text modes and the link
//! table. One instance lives for exactly one render call.

use crate::enums::LinkKind;
use crate::types::{LinkEntry, Rendered};

/// Columns of padding per indent level.
pub const INDENT_WIDTH: usize = 2;

/// Emphasis delimiters the renderer writes into lines. They take no
/// columns on screen.
pub const EMPHASIS_MARKERS: [&str; 3] = ["<u>", "<b>", "</>"];

/// Whether a line holds nothing but blanks, line terminators and
/// emphasis delimiters.
///
/// # Example
///
/// ```
/// use tagsoup_core::state::is_blank;
/// assert!(is_blank("    "));
/// assert!(is_blank("\t\r\n"));
/// assert!(is_blank("  <b></>"));
/// assert!(!is_blank("  * "));
/// assert!(!is_blank("<>"));
/// ```
pub fn is_blank(line: &str) -> bool {
    let mut rest = line;
    while !rest.is_empty() {
        if let Some(marker) = EMPHASIS_MARKERS.iter().find(|m| rest.starts_with(**m)) {
            rest = &rest[marker.len()..];
        } else if rest.starts_with([' ', '\t', '\n', '\r']) {
            rest = &rest[1..];
        } else {
            return false;
        }
    }
    true
}

/// Mutable working set of the renderer.
///
/// # Example
///
/// ```
/// use tagsoup_core::RenderState;
///
/// let mut state = RenderState::new();
/// state.indent(1);
/// state.prepare_newline();
/// assert_eq!(state.current_line, "  ");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // === Lines ===
    /// Line under construction
    pub current_line: String,
    /// Finished lines, in order
    pub output_lines: Vec<String>,

    // === Layout context ===
    /// Current indent level; each level pads [`INDENT_WIDTH`] columns
    pub indent_level: usize,
    /// Inside `<ol>` or `<ul>`
    pub inside_list: bool,
    /// The current list is ordered
    pub is_ordered: bool,
    /// Inside an `<li>` that has not been closed yet
    pub inside_list_item: bool,
    /// Next number for an ordered list item
    pub ordered_counter: usize,

    // === Text modes ===
    /// Inside `<pre>`
    pub preformatted: bool,
    /// Set by `<ituneshack>`; never cleared within a document
    pub itunes_hack: bool,

    // === Links ===
    /// 1-based index of the link opened by the last unclosed anchor
    pub active_link_index: Option<usize>,
    /// Deduplicated link table
    pub links: Vec<LinkEntry>,
}

impl RenderState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            ordered_counter: 1,
            ..Self::default()
        }
    }

    /// Padding for a fresh line at the current indent level.
    pub fn indent_padding(&self) -> usize {
        self.indent_level * INDENT_WIDTH
    }

    /// Raise the indent level.
    pub fn indent(&mut self, levels: usize) {
        self.indent_level += levels;
    }

    /// Lower the indent level, flooring at zero.
    pub fn dedent(&mut self, levels: usize) {
        self.indent_level = self.indent_level.saturating_sub(levels);
    }

    /// Replace the current line with indentation padding only.
    pub fn prepare_newline(&mut self) {
        self.current_line.clear();
        let padding = self.indent_padding();
        self.current_line.extend(std::iter::repeat(' ').take(padding));
    }

    /// Whether the current line holds visible content.
    pub fn line_is_nonempty(&self) -> bool {
        !is_blank(&self.current_line)
    }

    /// Push the current line even if it is blank.
    pub fn push_line(&mut self) {
        self.output_lines.push(self.current_line.clone());
    }

    /// Push the current line if it holds visible content.
    pub fn flush_nonblank(&mut self) {
        if self.line_is_nonempty() {
            self.push_line();
        }
    }

    /// Push an empty separator line.
    pub fn push_blank(&mut self) {
        self.output_lines.push(String::new());
    }

    /// Register a link and return its 1-based index.
    ///
    /// A URL already in the table keeps its first index and kind.
    ///
    /// # Example
    ///
    /// ```
    /// use tagsoup_core::{LinkKind, RenderState};
    ///
    /// let mut state = RenderState::new();
    /// assert_eq!(state.add_link("http://a/", LinkKind::Href), 1);
    /// assert_eq!(state.add_link("http://b/", LinkKind::Image), 2);
    /// assert_eq!(state.add_link("http://a/", LinkKind::Image), 1);
    /// assert_eq!(state.links.len(), 2);
    /// ```
    pub fn add_link(&mut self, url: &str, kind: LinkKind) -> usize {
        if let Some(pos) = self.links.iter().position(|link| link.url == url) {
            return pos + 1;
        }
        self.links.push(LinkEntry::new(url, kind));
        self.links.len()
    }

    /// Consume the state into its output.
    pub fn into_rendered(self) -> Rendered {
        Rendered {
            lines: self.output_lines,
            links: self.links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = RenderState::new();
        assert_eq!(state.indent_level, 0);
        assert_eq!(state.ordered_counter, 1);
        assert!(state.current_line.is_empty());
        assert!(state.output_lines.is_empty());
        assert!(state.active_link_index.is_none());
        assert!(!state.preformatted);
        assert!(!state.itunes_hack);
    }

    #[test]
    fn test_dedent_floors_at_zero() {
        let mut state = RenderState::new();
        state.indent(2);
        state.dedent(4);
        assert_eq!(state.indent_level, 0);
        state.dedent(1);
        assert_eq!(state.indent_level, 0);
    }

    #[test]
    fn test_prepare_newline_pads_two_per_level() {
        let mut state = RenderState::new();
        state.current_line.push_str("leftover");
        state.indent(3);
        state.prepare_newline();
        assert_eq!(state.current_line, "      ");
    }

    #[test]
    fn test_flush_nonblank_skips_padding() {
        let mut state = RenderState::new();
        state.indent(1);
        state.prepare_newline();
        state.flush_nonblank();
        assert!(state.output_lines.is_empty());

        state.current_line.push_str("text");
        state.flush_nonblank();
        assert_eq!(state.output_lines, vec!["  text"]);
    }

    #[test]
    fn test_flush_nonblank_skips_marker_only_line() {
        let mut state = RenderState::new();
        state.current_line.push_str("<b></>");
        state.flush_nonblank();
        assert!(state.output_lines.is_empty());
        assert!(!state.line_is_nonempty());

        state.current_line.push_str("x");
        state.flush_nonblank();
        assert_eq!(state.output_lines, vec!["<b></>x"]);
    }

    #[test]
    fn test_push_line_keeps_blank() {
        let mut state = RenderState::new();
        state.push_line();
        state.push_blank();
        assert_eq!(state.output_lines, vec!["", ""]);
    }

    #[test]
    fn test_link_dedup_ignores_kind() {
        let mut state = RenderState::new();
        assert_eq!(state.add_link("http://e.com/x", LinkKind::Href), 1);
        assert_eq!(state.add_link("http://e.com/x", LinkKind::Embed), 1);
        assert_eq!(state.links[0].kind, LinkKind::Href);
    }

    #[test]
    fn test_into_rendered() {
        let mut state = RenderState::new();
        state.current_line.push_str("hello");
        state.push_line();
        state.add_link("http://e.com/", LinkKind::Href);
        let rendered = state.into_rendered();
        assert_eq!(rendered.lines, vec!["hello"]);
        assert_eq!(rendered.links.len(), 1);
    }
}
