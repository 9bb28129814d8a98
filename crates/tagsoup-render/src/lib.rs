//! Tagsoup Render
//!
//! This crate turns an HTML fragment into a list of word-wrapped text lines
//! plus a numbered table of the links, images and embeds it references.
//!
//! # Features
//!
//! - **Greedy word wrap** - Measured with markup-aware display widths
//! - **Block layout** - Paragraphs, headings, block quotes and rules
//! - **Lists** - Ordered, unordered and definition lists with indentation
//! - **Link table** - Deduplicated, numbered and resolved against a base URL
//! - **List payloads** - Serialized line lists with regex highlighting
//!
//! Rendered lines carry `<u>`, `<b>` and `</>` delimiters for emphasis
//! (dropped in raw mode) and `<>` for a literal `<`; see
//! [`tagsoup_ansi::utils`] for turning them into terminal output.
//!
//! # Example
//!
//! ```
//! use tagsoup_render::HtmlRenderer;
//!
//! let renderer = HtmlRenderer::new(80);
//! let rendered = renderer.render(
//!     "<h1>Title</h1><p>Hello <a href='/x'>world</a>.</p>",
//!     "http://e.com/",
//! );
//!
//! assert_eq!(rendered.lines[0], "Title");
//! assert_eq!(rendered.lines[1], "-----");
//! assert_eq!(rendered.lines[3], "Hello <u>world</>[1].");
//! assert_eq!(rendered.links[0].url, "http://e.com/x");
//! ```

pub mod list;
pub mod resolve;
pub mod text;

pub use list::{LineHighlighter, ListFormatter, RegexHighlighter};
pub use resolve::{AbsoluteUrlResolver, UrlResolver};
pub use text::{append_wrapped, quote_markup, tokenize_nl, tokenize_spaced, LineToken};

use log::{debug, warn};
use std::fmt;
use tagsoup_ansi::utils::markup_width;
use tagsoup_core::{
    Attributes, Labels, LinkKind, Localize, MarkupEvent, RenderState, Rendered, TagKind,
};
use tagsoup_parser::TagSoupParser;

/// Flash embeds are the only `<embed>` type that gets a placeholder.
const FLASH_MIME_TYPE: &str = "application/x-shockwave-flash";

/// Indent levels added by a list item.
const LIST_ITEM_INDENT: usize = 2;

/// Indent levels added by a definition description.
const DEFINITION_INDENT: usize = 4;

/// Look up an attribute, logging when it is missing.
fn required_attribute<'a>(attributes: &'a Attributes, name: &str, tag: &str) -> Option<&'a str> {
    match attributes.get(name) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("render: <{}> ignored: {}", tag, err);
            None
        }
    }
}

/// HTML-to-text renderer.
///
/// The renderer itself is immutable; every [`render`](Self::render) call
/// works on a fresh [`RenderState`], so one renderer can serve any number
/// of documents.
pub struct HtmlRenderer {
    /// Target line width in columns, at least 1
    width: usize,
    /// Suppress emphasis delimiters
    raw: bool,
    /// Link target resolution
    resolver: Box<dyn UrlResolver + Send + Sync>,
    /// Label lookup
    labels: Box<dyn Localize + Send + Sync>,
}

impl fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("width", &self.width)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

impl HtmlRenderer {
    /// Create a renderer with the default resolver and labels.
    ///
    /// A width of 0 is clamped to 1.
    pub fn new(width: usize) -> Self {
        let width = if width == 0 {
            warn!("render: output width 0 clamped to 1");
            1
        } else {
            width
        };

        Self {
            width,
            raw: false,
            resolver: Box::new(AbsoluteUrlResolver),
            labels: Box::new(Labels::default()),
        }
    }

    /// Enable or disable raw mode.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Use a custom URL resolver.
    pub fn with_resolver(mut self, resolver: impl UrlResolver + Send + Sync + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Use custom labels.
    pub fn with_labels(mut self, labels: impl Localize + Send + Sync + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    /// Get the output width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether raw mode is on.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Render a document.
    ///
    /// Relative link targets are resolved against `base_url`. Rendering
    /// never fails: malformed markup degrades to whatever could be read
    /// before the damage.
    pub fn render(&self, source: &str, base_url: &str) -> Rendered {
        let mut state = RenderState::new();

        for event in TagSoupParser::new(source) {
            match event {
                MarkupEvent::StartTag { name, attributes } => {
                    self.start_tag(&mut state, &name, &attributes, base_url)
                }
                MarkupEvent::EndTag { name } => self.end_tag(&mut state, &name),
                MarkupEvent::Text { content } => self.text(&mut state, &content),
                MarkupEvent::EndOfDocument => break,
            }
        }

        self.finish(&mut state);
        state.into_rendered()
    }

    /// Append an emphasis delimiter unless in raw mode.
    fn emphasis(&self, state: &mut RenderState, delimiter: &str) {
        if !self.raw {
            state.current_line.push_str(delimiter);
        }
    }

    /// Append a link reference as one unbreakable token.
    fn placeholder(&self, state: &mut RenderState, text: &str) {
        append_wrapped(state, &[text], self.width);
    }

    /// Resolve and register a link target.
    fn register_link(
        &self,
        state: &mut RenderState,
        base_url: &str,
        href: &str,
        kind: LinkKind,
    ) -> usize {
        let url = self.resolver.resolve(base_url, href);
        let index = state.add_link(&url, kind);
        debug!("render: {} [{}] -> {}", kind, index, url);
        index
    }

    fn start_tag(&self, state: &mut RenderState, name: &str, attributes: &Attributes, base_url: &str) {
        match TagKind::from_name(name) {
            TagKind::Anchor => {
                if let Some(href) =
                    required_attribute(attributes, "href", name).filter(|v| !v.is_empty())
                {
                    let index = self.register_link(state, base_url, href, LinkKind::Href);
                    state.active_link_index = Some(index);
                    self.emphasis(state, "<u>");
                }
            }
            TagKind::Strong => self.emphasis(state, "<b>"),
            TagKind::Underline => self.emphasis(state, "<u>"),
            TagKind::Embed => {
                let is_flash = required_attribute(attributes, "type", name)
                    .is_some_and(|mime| mime == FLASH_MIME_TYPE);
                if !is_flash {
                    return;
                }
                if let Some(src) =
                    required_attribute(attributes, "src", name).filter(|v| !v.is_empty())
                {
                    let index = self.register_link(state, base_url, src, LinkKind::Embed);
                    let prefix = quote_markup(&self.labels.localize("embedded flash:"));
                    self.placeholder(state, &format!("[{} {}]", prefix, index));
                }
            }
            TagKind::LineBreak => {
                state.push_line();
                state.prepare_newline();
            }
            TagKind::Preformatted => {
                state.preformatted = true;
                state.flush_nonblank();
                state.prepare_newline();
            }
            TagKind::ItunesHack => state.itunes_hack = true,
            TagKind::Image => {
                if let Some(src) =
                    required_attribute(attributes, "src", name).filter(|v| !v.is_empty())
                {
                    let index = self.register_link(state, base_url, src, LinkKind::Image);
                    let label = quote_markup(&self.labels.localize("image"));
                    self.placeholder(state, &format!("[{}: {}]", label, index));
                }
            }
            TagKind::Blockquote => {
                state.indent(1);
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::Heading(_) | TagKind::Paragraph => {
                state.flush_nonblank();
                let padding = state.indent_padding();
                if state
                    .output_lines
                    .last()
                    .is_some_and(|line| markup_width(line) > padding)
                {
                    state.push_blank();
                }
                state.prepare_newline();
            }
            kind @ (TagKind::OrderedList | TagKind::UnorderedList) => {
                state.inside_list = true;
                state.is_ordered = kind == TagKind::OrderedList;
                if state.is_ordered {
                    state.ordered_counter = 1;
                }
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::ListItem => {
                if state.inside_list_item {
                    state.dedent(LIST_ITEM_INDENT);
                    state.flush_nonblank();
                    state.prepare_newline();
                }
                state.inside_list_item = true;
                state.flush_nonblank();
                state.prepare_newline();
                state.indent(LIST_ITEM_INDENT);
                if state.is_ordered {
                    let marker = format!("{:>2}.", state.ordered_counter);
                    state.current_line.push_str(&marker);
                    state.ordered_counter += 1;
                } else {
                    state.current_line.push_str("  * ");
                }
            }
            TagKind::DefinitionTerm => {
                state.flush_nonblank();
                state.prepare_newline();
            }
            TagKind::DefinitionDescription => {
                state.indent(DEFINITION_INDENT);
                state.flush_nonblank();
                state.prepare_newline();
            }
            TagKind::Superscript => state.current_line.push('^'),
            TagKind::Subscript => state.current_line.push('['),
            TagKind::HorizontalRule => {
                state.flush_nonblank();
                state.prepare_newline();
                let rule = format!(" {} ", "-".repeat(self.width.saturating_sub(2)));
                state.output_lines.push(rule);
                state.prepare_newline();
            }
            TagKind::DefinitionList | TagKind::Unknown => {}
        }
    }

    fn end_tag(&self, state: &mut RenderState, name: &str) {
        match TagKind::from_name(name) {
            TagKind::Blockquote => {
                state.dedent(1);
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::OrderedList | TagKind::UnorderedList => {
                state.inside_list = false;
                if state.inside_list_item {
                    state.inside_list_item = false;
                    state.dedent(LIST_ITEM_INDENT);
                    state.flush_nonblank();
                    state.prepare_newline();
                }
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::DefinitionTerm => {
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::DefinitionDescription => {
                state.dedent(DEFINITION_INDENT);
                state.flush_nonblank();
                state.push_blank();
                state.prepare_newline();
            }
            TagKind::ListItem => {
                state.dedent(LIST_ITEM_INDENT);
                state.inside_list_item = false;
                state.flush_nonblank();
                state.prepare_newline();
            }
            TagKind::Heading(1) => {
                if state.line_is_nonempty() {
                    state.push_line();
                    let underline = "-".repeat(markup_width(&state.current_line));
                    state.prepare_newline();
                    state.output_lines.push(underline);
                }
                state.prepare_newline();
            }
            TagKind::Heading(_) | TagKind::Paragraph => {
                state.flush_nonblank();
                state.prepare_newline();
            }
            TagKind::Preformatted => {
                state.flush_nonblank();
                state.prepare_newline();
                state.preformatted = false;
            }
            TagKind::Anchor => {
                if let Some(index) = state.active_link_index.take() {
                    self.emphasis(state, "</>");
                    self.placeholder(state, &format!("[{}]", index));
                }
            }
            TagKind::Underline | TagKind::Strong => self.emphasis(state, "</>"),
            TagKind::Subscript => state.current_line.push(']'),
            TagKind::Embed
            | TagKind::LineBreak
            | TagKind::ItunesHack
            | TagKind::Image
            | TagKind::DefinitionList
            | TagKind::Superscript
            | TagKind::HorizontalRule
            | TagKind::Unknown => {}
        }
    }

    fn text(&self, state: &mut RenderState, content: &str) {
        let quoted = quote_markup(content);

        if state.itunes_hack || state.preformatted {
            let wrap = state.itunes_hack;
            for token in tokenize_nl(&quoted) {
                match token {
                    LineToken::Newline => {
                        state.push_line();
                        state.prepare_newline();
                    }
                    LineToken::Segment(segment) if wrap => {
                        append_wrapped(state, &tokenize_spaced(segment), self.width);
                    }
                    LineToken::Segment(segment) => state.current_line.push_str(segment),
                }
            }
            return;
        }

        let mut tokens = tokenize_spaced(quoted.trim_start_matches('\n'));
        if !state.line_is_nonempty() && tokens.first() == Some(&" ") {
            tokens.remove(0);
        }
        append_wrapped(state, &tokens, self.width);
    }

    /// Flush the last line and append the link list.
    fn finish(&self, state: &mut RenderState) {
        state.flush_nonblank();

        if state.links.is_empty() {
            return;
        }

        state.push_blank();
        state
            .output_lines
            .push(quote_markup(&self.labels.localize("Links: ")));
        for (i, link) in state.links.iter().enumerate() {
            let label = quote_markup(&self.labels.localize(link.kind.label_key()));
            state.output_lines.push(format!(
                "[{}]: {} ({})",
                i + 1,
                quote_markup(&link.url),
                label
            ));
        }
    }
}

/// Render a document with the default resolver and labels.
///
/// # Example
///
/// ```
/// let rendered = tagsoup_render::render("<ul><li>a</li><li>b</li></ul>", 80, false, "");
/// assert_eq!(rendered.lines, vec!["", "  * a", "  * b", ""]);
/// assert!(rendered.links.is_empty());
/// ```
pub fn render(source: &str, width: usize, raw: bool, base_url: &str) -> Rendered {
    HtmlRenderer::new(width).raw(raw).render(source, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str, width: usize) -> Vec<String> {
        render(source, width, false, "").lines
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let rendered = render(
            "<h1>Title</h1><p>Hello <a href=\"/x\">world</a>.</p>",
            80,
            false,
            "http://e.com/",
        );
        assert_eq!(
            rendered.lines,
            vec![
                "Title",
                "-----",
                "",
                "Hello <u>world</>[1].",
                "",
                "Links: ",
                "[1]: http://e.com/x (link)",
            ]
        );
        assert_eq!(rendered.links.len(), 1);
        assert_eq!(rendered.links[0].kind, LinkKind::Href);
    }

    #[test]
    fn test_render_raw_mode() {
        let source = "<p>a <b>b</b> and <a href='http://x/'>c</a></p>";
        assert_eq!(render(source, 80, false, "").lines[0], "a <b>b</> and <u>c</>[1]");
        assert_eq!(render(source, 80, true, "").lines[0], "a b and c[1]");
    }

    #[test]
    fn test_render_unordered_list() {
        assert_eq!(
            lines("<ul><li>a</li><li>b</li></ul>", 80),
            vec!["", "  * a", "  * b", ""]
        );
    }

    #[test]
    fn test_render_ordered_list() {
        assert_eq!(
            lines("<ol><li>one</li><li>two</li></ol>", 80),
            vec!["", " 1.one", " 2.two", ""]
        );
    }

    #[test]
    fn test_render_list_item_without_close() {
        assert_eq!(
            lines("<ol><li>one<li>two</ol>", 80),
            vec!["", " 1.one", " 2.two", ""]
        );
    }

    #[test]
    fn test_render_blockquote_indent() {
        assert_eq!(
            lines("<blockquote>quoted</blockquote>after", 80),
            vec!["", "  quoted", "", "after"]
        );
    }

    #[test]
    fn test_render_definition_list() {
        assert_eq!(
            lines("<dl><dt>term</dt><dd>meaning</dd></dl>", 80),
            vec!["term", "", "        meaning", ""]
        );
    }

    #[test]
    fn test_render_line_break_keeps_blank_lines() {
        assert_eq!(lines("a<br><br>b", 80), vec!["a", "", "b"]);
    }

    #[test]
    fn test_render_horizontal_rule() {
        assert_eq!(lines("<hr>", 10), vec![" -------- "]);
        assert_eq!(lines("<hr>", 1), vec!["  "]);
    }

    #[test]
    fn test_render_preformatted() {
        assert_eq!(
            lines("<pre>  a  b\n c</pre>", 80),
            vec!["  a  b", " c"]
        );
    }

    #[test]
    fn test_render_itunes_hack_keeps_newlines() {
        assert_eq!(lines("<ituneshack>one\ntwo  three", 80), vec!["one", "two three"]);
    }

    #[test]
    fn test_render_image_and_embed() {
        let rendered = render(
            "<img src=\"a.png\"><embed type=\"application/x-shockwave-flash\" src=\"m.swf\">",
            80,
            false,
            "http://e.com/",
        );
        assert_eq!(rendered.lines[0], "[image: 1][embedded flash: 2]");
        assert_eq!(rendered.lines[3], "[1]: http://e.com/a.png (image)");
        assert_eq!(rendered.lines[4], "[2]: http://e.com/m.swf (embedded flash)");
    }

    #[test]
    fn test_render_embed_other_type_ignored() {
        let rendered = render("<embed type=\"video/mp4\" src=\"m.mp4\">", 80, false, "");
        assert!(rendered.lines.is_empty());
        assert!(rendered.links.is_empty());
    }

    #[test]
    fn test_render_anchor_without_href() {
        let rendered = render("<a name=\"top\">here</a>", 80, false, "");
        assert_eq!(rendered.lines, vec!["here"]);
        assert!(rendered.links.is_empty());
    }

    #[test]
    fn test_render_duplicate_links_share_index() {
        let rendered = render(
            "<a href='http://x/'>a</a> and <a href='http://x/'>b</a>",
            80,
            true,
            "",
        );
        assert_eq!(rendered.lines[0], "a[1] and b[1]");
        assert_eq!(rendered.links.len(), 1);
    }

    #[test]
    fn test_render_marker_never_stands_alone() {
        assert_eq!(lines("<b>abcdefghij</b>", 5), vec!["<b>abcdefghij</>"]);
        assert_eq!(render("<b>abcdefghij</b>", 5, true, "").lines, vec!["abcdefghij"]);

        assert_eq!(lines("<p><b> </b></p>after", 80), vec!["after"]);
        assert_eq!(render("<p><b> </b></p>after", 80, true, "").lines, vec!["after"]);
    }

    #[test]
    fn test_render_opening_marker_follows_wrapped_word() {
        let rendered = lines("<p>aaaa bbbb <a href='http://x/'>cc</a></p>", 12);
        assert_eq!(rendered[0], "aaaa bbbb ");
        assert_eq!(rendered[1], "<u>cc</>[1]");
    }

    #[test]
    fn test_render_placeholders_wrap() {
        let rendered = render(
            "<p>aaaa bbbb <a href='http://x/'>cc</a><img src='http://y/'></p>",
            12,
            false,
            "",
        );
        let body = &rendered.lines[..rendered.lines.len() - 4];
        assert_eq!(body, ["aaaa bbbb ", "<u>cc</>[1]", "[image: 2]"]);
        for line in body {
            assert!(markup_width(line) < 12, "line too wide: {:?}", line);
        }
    }

    #[test]
    fn test_render_labels_are_quoted() {
        let labels = Labels {
            image: "<pic>".to_string(),
            links_header: "<Links>".to_string(),
            ..Labels::default()
        };
        let rendered = HtmlRenderer::new(80)
            .with_labels(labels)
            .render("<img src='http://e/p'>", "");
        assert_eq!(
            rendered.lines,
            vec!["[<>pic>: 1]", "", "<>Links>", "[1]: http://e/p (<>pic>)"]
        );
    }

    #[test]
    fn test_render_quotes_literal_lt() {
        assert_eq!(lines("1 &lt; 2", 80), vec!["1 <> 2"]);
    }

    #[test]
    fn test_render_sub_and_sup() {
        assert_eq!(lines("x<sup>2</sup> H<sub>2</sub>O", 80), vec!["x^2 H[2]O"]);
    }

    #[test]
    fn test_render_wraps_at_width() {
        assert_eq!(
            lines("<p>aaa bbb ccc</p>", 8),
            vec!["aaa bbb", "ccc"]
        );
    }

    #[test]
    fn test_render_zero_width_clamped() {
        let renderer = HtmlRenderer::new(0);
        assert_eq!(renderer.width(), 1);
        let rendered = renderer.render("ab cd", "");
        assert_eq!(rendered.lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_render_truncated_tag_stops() {
        assert_eq!(lines("<p>before</p><a href=\"x", 80), vec!["before"]);
    }

    #[test]
    fn test_custom_resolver_and_labels() {
        let labels = Labels {
            links_header: "Verweise: ".to_string(),
            link: "Verweis".to_string(),
            ..Labels::default()
        };
        let renderer = HtmlRenderer::new(80)
            .with_resolver(|_: &str, href: &str| format!("res:{}", href))
            .with_labels(labels);
        let rendered = renderer.render("<a href='q'>t</a>", "");
        assert_eq!(rendered.lines[2], "Verweise: ");
        assert_eq!(rendered.lines[3], "[1]: res:q (Verweis)");
    }

    #[test]
    fn test_renderer_debug() {
        let renderer = HtmlRenderer::new(40).raw(true);
        assert!(renderer.is_raw());
        assert!(format!("{:?}", renderer).contains("width: 40"));
    }
}
