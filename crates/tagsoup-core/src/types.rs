//! Core types for tagsoup

use crate::enums::LinkKind;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// Attribute list of a start tag, in source order.
///
/// Duplicate names are kept; lookup returns the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Look up an attribute value by exact name.
    ///
    /// # Example
    ///
    /// ```
    /// use tagsoup_core::{Attributes, ParseError};
    /// let mut attrs = Attributes::new();
    /// attrs.push("href", "/a");
    /// attrs.push("href", "/b");
    /// assert_eq!(attrs.get("href"), Ok("/a"));
    /// assert_eq!(attrs.get("src"), Err(ParseError::AttributeNotFound("src".into())));
    /// ```
    pub fn get(&self, name: &str) -> Result<&str, ParseError> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| ParseError::AttributeNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(name, value)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Events produced by the tag soup pull parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An opening tag with its lower-cased name
    StartTag { name: String, attributes: Attributes },
    /// A closing tag with its lower-cased name (without the slash)
    EndTag { name: String },
    /// Entity-decoded character data
    Text { content: String },
    /// No more events
    EndOfDocument,
}

/// One entry of the link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Absolute, censored URL
    pub url: String,
    /// Which tag registered it first
    pub kind: LinkKind,
}

impl LinkEntry {
    pub fn new(url: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// Output of a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Rendered lines, including the trailing link list
    pub lines: Vec<String>,
    /// Deduplicated link table; entry `i` is cited as `[i + 1]`
    pub links: Vec<LinkEntry>,
}
