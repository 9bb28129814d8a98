//! List widget payloads.
//!
//! A [`ListFormatter`] collects display lines, each optionally tagged
//! with a numeric id, and serializes them into the textual list
//! description consumed by a terminal UI layer:
//!
//! ```text
//! {list{listitem text:'first'}{listitem[7] text:'second'}}
//! ```
//!
//! Lines may be passed through a [`LineHighlighter`] on the way, which
//! wraps matches in `<style>...</>` delimiters.

use crate::text::quote_markup;
use regex::Regex;
use tagsoup_ansi::utils::{segments, Segment};
use tagsoup_config::HighlightRule;
use tagsoup_core::{Result, TagsoupError};

/// Adds style delimiters to a display line.
pub trait LineHighlighter {
    /// Highlight `line` in place for the given display location.
    fn highlight(&self, line: &mut String, location: &str);
}

/// Highlight rule with its pattern compiled.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: HighlightRule,
    regex: Regex,
}

/// Highlighter driven by regular expressions.
///
/// # Example
///
/// ```
/// use tagsoup_render::{LineHighlighter, RegexHighlighter};
///
/// let mut highlighter = RegexHighlighter::new();
/// highlighter.add_rule("article", "rust", "hl").unwrap();
///
/// let mut line = String::from("I like rust");
/// highlighter.highlight(&mut line, "article");
/// assert_eq!(line, "I like <hl>rust</>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegexHighlighter {
    rules: Vec<CompiledRule>,
}

impl RegexHighlighter {
    /// Create a highlighter without rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the configured highlight rules.
    pub fn from_rules(rules: &[HighlightRule]) -> Result<Self> {
        let mut highlighter = Self::new();
        for rule in rules {
            highlighter.add_rule(&rule.location, &rule.pattern, &rule.style)?;
        }
        Ok(highlighter)
    }

    /// Add a rule. `location` may be `"all"` to match every location.
    pub fn add_rule(&mut self, location: &str, pattern: &str, style: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|e| {
            TagsoupError::Config(format!("Invalid highlight pattern '{}': {}", pattern, e))
        })?;
        self.rules.push(CompiledRule {
            rule: HighlightRule::new(location, pattern, style),
            regex,
        });
        Ok(())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Wrap every non-empty match of `regex` in the text segments of `line`.
/// Existing delimiters are kept and never matched against.
fn highlight_rule(line: &str, regex: &Regex, style: &str) -> String {
    let mut result = String::with_capacity(line.len());

    for segment in segments(line) {
        match segment {
            Segment::Text(text) => {
                let mut last = 0;
                for m in regex.find_iter(text).filter(|m| !m.is_empty()) {
                    result.push_str(&quote_markup(&text[last..m.start()]));
                    result.push('<');
                    result.push_str(style);
                    result.push('>');
                    result.push_str(&quote_markup(m.as_str()));
                    result.push_str("</>");
                    last = m.end();
                }
                result.push_str(&quote_markup(&text[last..]));
            }
            Segment::Open(name) => {
                result.push('<');
                result.push_str(name);
                result.push('>');
            }
            Segment::Close => result.push_str("</>"),
        }
    }

    result
}

impl LineHighlighter for RegexHighlighter {
    fn highlight(&self, line: &mut String, location: &str) {
        for compiled in &self.rules {
            if compiled.rule.applies_to(location) {
                *line = highlight_rule(line, &compiled.regex, &compiled.rule.style);
            }
        }
    }
}

/// Quote a value for the list description: single-quoted, with each `'`
/// written as `'"'"'`.
fn quote_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

/// Accumulates lines and serializes them into a list description.
///
/// # Example
///
/// ```
/// use tagsoup_render::ListFormatter;
///
/// let mut list = ListFormatter::new();
/// list.add_line("abcdef", Some(3), 4);
/// assert_eq!(
///     list.format_list(None, "article"),
///     "{list{listitem[3] text:'abcd'}{listitem[3] text:'ef'}}"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListFormatter {
    lines: Vec<(String, Option<u32>)>,
    /// Location and payload of the last `format_list` call
    cache: Option<(String, String)>,
}

impl ListFormatter {
    /// Create an empty formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, split into chunks of at most `width` characters.
    ///
    /// A `width` of 0 means no limit. Empty text still adds one empty
    /// line.
    pub fn add_line(&mut self, text: &str, id: Option<u32>, width: usize) {
        self.cache = None;

        if width == 0 || text.is_empty() {
            self.lines.push((text.to_string(), id));
            return;
        }

        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(width) {
            self.lines.push((chunk.iter().collect(), id));
        }
    }

    /// Add several untagged lines.
    pub fn add_lines<S: AsRef<str>>(&mut self, lines: &[S], width: usize) {
        for line in lines {
            self.add_line(line.as_ref(), None, width);
        }
    }

    /// The lines added so far, after chunking.
    pub fn lines(&self) -> impl Iterator<Item = (&str, Option<u32>)> {
        self.lines.iter().map(|(text, id)| (text.as_str(), *id))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines were added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.cache = None;
    }

    /// Serialize the lines, highlighting them for `location` if a
    /// highlighter is given.
    ///
    /// The result is reused for the same location until the next
    /// [`add_line`](Self::add_line).
    pub fn format_list(
        &mut self,
        highlighter: Option<&dyn LineHighlighter>,
        location: &str,
    ) -> &str {
        let stale = !matches!(&self.cache, Some((cached, _)) if cached == location);
        if stale {
            let payload = self.build(highlighter, location);
            self.cache = Some((location.to_string(), payload));
        }
        self.cache.as_ref().map_or("", |(_, payload)| payload.as_str())
    }

    fn build(&self, highlighter: Option<&dyn LineHighlighter>, location: &str) -> String {
        let mut payload = String::from("{list");
        for (text, id) in &self.lines {
            let mut text = text.clone();
            if let Some(highlighter) = highlighter {
                highlighter.highlight(&mut text, location);
            }
            match id {
                Some(id) => payload.push_str(&format!("{{listitem[{}] text:", id)),
                None => payload.push_str("{listitem text:"),
            }
            payload.push_str(&quote_value(&text));
            payload.push('}');
        }
        payload.push('}');
        payload
    }
}
