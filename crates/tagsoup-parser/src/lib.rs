//! Tagsoup Parser
//!
//! A lenient pull parser for HTML as it appears in the wild: unclosed
//! tags, unquoted attributes, stray ampersands and the like. It accepts
//! anything that even remotely looks like markup and never reports an
//! error to its caller.
//!
//! # Overview
//!
//! The parser is a forward-only cursor over a complete document. Each
//! call to [`TagSoupParser::next_event`] yields a start tag, an end tag,
//! a run of text, or [`MarkupEvent::EndOfDocument`]. Text and attribute
//! values are entity-decoded with [`decode_entities`].
//!
//! # Example
//!
//! ```
//! use tagsoup_parser::{MarkupEvent, TagSoupParser};
//!
//! let mut parser = TagSoupParser::new("<P class=intro>Hello &amp; welcome</p>");
//!
//! for event in &mut parser {
//!     match event {
//!         MarkupEvent::StartTag { name, attributes } => {
//!             assert_eq!(name, "p");
//!             assert_eq!(attributes.get("class"), Ok("intro"));
//!         }
//!         MarkupEvent::Text { content } => assert_eq!(content, "Hello & welcome"),
//!         MarkupEvent::EndTag { name } => assert_eq!(name, "p"),
//!         MarkupEvent::EndOfDocument => unreachable!(),
//!     }
//! }
//! ```

pub mod entities;

pub use entities::{decode_entities, decode_entity};
pub use tagsoup_core::{Attributes, MarkupEvent, ParseError};

use log::{debug, trace};

/// Whitespace as understood by C's `isspace`.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Where the cursor stands between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Nothing read yet
    StartDocument,
    /// Just after a start or end tag
    AfterTag,
    /// Just after text; the `<` that ended it is already consumed
    AfterText,
    /// Input exhausted or a tag was left open
    EndDocument,
}

/// Tag soup pull parser over an in-memory document.
#[derive(Debug, Clone)]
pub struct TagSoupParser<'a> {
    input: &'a str,
    pos: usize,
    state: ParserState,
}

impl<'a> TagSoupParser<'a> {
    /// Create a parser positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: ParserState::StartDocument,
        }
    }

    /// Pull the next event.
    ///
    /// Once [`MarkupEvent::EndOfDocument`] has been returned, every
    /// further call returns it again.
    pub fn next_event(&mut self) -> MarkupEvent {
        let input = self.input;
        let event = match self.state {
            ParserState::EndDocument => MarkupEvent::EndOfDocument,
            ParserState::AfterText => self.handle_tag(),
            ParserState::StartDocument | ParserState::AfterTag => {
                let ws_start = self.pos;
                self.skip_whitespace();
                match input[self.pos..].chars().next() {
                    None => MarkupEvent::EndOfDocument,
                    Some('<') => {
                        self.pos += 1;
                        self.handle_tag()
                    }
                    Some(_) => {
                        let ws = if self.state == ParserState::StartDocument {
                            ""
                        } else {
                            &input[ws_start..self.pos]
                        };
                        self.handle_text(ws)
                    }
                }
            }
        };

        if event == MarkupEvent::EndOfDocument {
            self.state = ParserState::EndDocument;
        }
        event
    }

    fn skip_whitespace(&mut self) {
        let input = self.input;
        let rest = &input[self.pos..];
        self.pos += rest.len() - rest.trim_start_matches(is_space).len();
    }

    /// Read character data up to the next `<`, which is consumed.
    fn handle_text(&mut self, leading_ws: &str) -> MarkupEvent {
        let input = self.input;
        let rest = &input[self.pos..];
        let (raw, consumed) = match rest.find('<') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        self.state = ParserState::AfterText;

        let mut content = String::with_capacity(leading_ws.len() + raw.len());
        content.push_str(leading_ws);
        content.push_str(raw);
        MarkupEvent::Text {
            content: decode_entities(&content),
        }
    }

    /// Read the tag body up to the closing `>`, which is consumed.
    fn read_tag(&mut self) -> Result<&'a str, ParseError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let end = rest.find('>').ok_or(ParseError::UnterminatedTag)?;
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    fn handle_tag(&mut self) -> MarkupEvent {
        match self.read_tag() {
            Ok(body) => {
                self.state = ParserState::AfterTag;
                parse_tag(body)
            }
            Err(err) => {
                debug!("handle_tag: {}, ending document", err);
                self.pos = self.input.len();
                MarkupEvent::EndOfDocument
            }
        }
    }
}

impl Iterator for TagSoupParser<'_> {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<MarkupEvent> {
        match self.next_event() {
            MarkupEvent::EndOfDocument => None,
            event => Some(event),
        }
    }
}

/// Find the end of an attribute token at the start of `s`.
///
/// A token runs to the next whitespace, except that a quoted value after
/// `=` runs to its matching closing quote.
fn attribute_token_end(s: &str) -> usize {
    let Some(stop) = s.find(|c: char| c == '=' || is_space(c)) else {
        return s.len();
    };
    if !s[stop..].starts_with('=') {
        return stop;
    }

    let value_start = stop + 1;
    let value = &s[value_start..];
    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => match value[1..].find(quote) {
            Some(close) => value_start + 1 + close + 1,
            None => s.len(),
        },
        _ => value.find(is_space).map_or(s.len(), |end| value_start + end),
    }
}

/// Split a tag body into its name token and attribute tokens.
fn tokenize_tag(body: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = body.trim_start_matches(is_space);

    while !rest.is_empty() {
        let end = if tokens.is_empty() {
            rest.find(is_space).unwrap_or(rest.len())
        } else {
            attribute_token_end(rest)
        };
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start_matches(is_space);
    }

    tokens
}

/// Strip one surrounding pair of matching quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.get(1..value.len() - 1).unwrap_or("");
        }
    }
    value
}

fn add_attribute(attributes: &mut Attributes, token: &str) {
    if token.is_empty() {
        return;
    }
    let (name, value) = token.split_once('=').unwrap_or((token, token));
    trace!("add_attribute: '{}' = '{}'", name, value);
    attributes.push(name, decode_entities(unquote(value)));
}

/// Turn a raw tag body (without `<` and `>`) into an event.
fn parse_tag(body: &str) -> MarkupEvent {
    debug!("parse_tag: parsing '{}'", body);
    let tokens = tokenize_tag(body);
    let mut name = tokens.first().copied().unwrap_or("");

    // `<br/>`: the self-closing marker sticks to a lone name token
    if tokens.len() == 1 && name.len() > 1 {
        name = name.strip_suffix('/').unwrap_or(name);
    }

    if let Some(end_name) = name.strip_prefix('/') {
        return MarkupEvent::EndTag {
            name: end_name.to_ascii_lowercase(),
        };
    }

    let mut attributes = Attributes::new();
    let last = tokens.len().saturating_sub(1);
    for (i, &token) in tokens.iter().enumerate().skip(1) {
        // Self-closing marker on the final token: `<img src=a.png/>`
        let token = if i == last {
            token.strip_suffix('/').unwrap_or(token)
        } else {
            token
        };
        add_attribute(&mut attributes, token);
    }

    MarkupEvent::StartTag {
        name: name.to_ascii_lowercase(),
        attributes,
    }
}
