//! Core enums for tag classification and link bookkeeping.
//!
//! These enums are the closed vocabulary the renderer dispatches on:
//! every tag name maps to exactly one [`TagKind`], and every registered
//! link carries a [`LinkKind`].

use serde::{Deserialize, Serialize};

/// Semantically meaningful tags understood by the renderer.
///
/// Anything not in the fixed dictionary classifies as [`TagKind::Unknown`],
/// which renders as a no-op while its children still render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    /// `<a>`
    Anchor,
    /// `<b>` and `<strong>`
    Strong,
    /// `<u>`
    Underline,
    /// `<embed>`
    Embed,
    /// `<br>`
    LineBreak,
    /// `<pre>`
    Preformatted,
    /// `<ituneshack>`, a pseudo tag injected in front of iTunes feed bodies
    ItunesHack,
    /// `<img>`
    Image,
    /// `<blockquote>`
    Blockquote,
    /// `<p>`
    Paragraph,
    /// `<h1>` through `<h4>`
    Heading(u8),
    /// `<ol>`
    OrderedList,
    /// `<ul>`
    UnorderedList,
    /// `<li>`
    ListItem,
    /// `<dt>`
    DefinitionTerm,
    /// `<dd>`
    DefinitionDescription,
    /// `<dl>`
    DefinitionList,
    /// `<sup>`
    Superscript,
    /// `<sub>`
    Subscript,
    /// `<hr>`
    HorizontalRule,
    /// Any other tag
    Unknown,
}

impl TagKind {
    /// Classify a tag name. The name is expected to be lower-cased already.
    ///
    /// # Example
    ///
    /// ```
    /// use tagsoup_core::TagKind;
    /// assert_eq!(TagKind::from_name("h2"), TagKind::Heading(2));
    /// assert_eq!(TagKind::from_name("strong"), TagKind::Strong);
    /// assert_eq!(TagKind::from_name("table"), TagKind::Unknown);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "a" => TagKind::Anchor,
            "b" | "strong" => TagKind::Strong,
            "u" => TagKind::Underline,
            "embed" => TagKind::Embed,
            "br" => TagKind::LineBreak,
            "pre" => TagKind::Preformatted,
            "ituneshack" => TagKind::ItunesHack,
            "img" => TagKind::Image,
            "blockquote" => TagKind::Blockquote,
            "p" => TagKind::Paragraph,
            "h1" => TagKind::Heading(1),
            "h2" => TagKind::Heading(2),
            "h3" => TagKind::Heading(3),
            "h4" => TagKind::Heading(4),
            "ol" => TagKind::OrderedList,
            "ul" => TagKind::UnorderedList,
            "li" => TagKind::ListItem,
            "dt" => TagKind::DefinitionTerm,
            "dd" => TagKind::DefinitionDescription,
            "dl" => TagKind::DefinitionList,
            "sup" => TagKind::Superscript,
            "sub" => TagKind::Subscript,
            "hr" => TagKind::HorizontalRule,
            _ => TagKind::Unknown,
        }
    }
}

/// What kind of reference produced a link table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// `<a href=...>`
    Href,
    /// `<img src=...>`
    Image,
    /// `<embed src=...>` with a flash type
    Embed,
}

impl LinkKind {
    /// Localization key for this kind's label in the link list.
    pub fn label_key(&self) -> &'static str {
        match self {
            LinkKind::Href => "link",
            LinkKind::Image => "image",
            LinkKind::Embed => "embedded flash",
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_key())
    }
}
