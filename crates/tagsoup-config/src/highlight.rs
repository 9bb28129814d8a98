//! Highlight rules for the list formatter.

use serde::{Deserialize, Serialize};

/// One `[[highlight]]` entry: lines shown at `location` get every match
/// of `pattern` wrapped in a `style` delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HighlightRule {
    /// Display context the rule applies to, or `"all"`
    #[serde(default = "default_location")]
    pub location: String,

    /// Regular expression to highlight
    pub pattern: String,

    /// Delimiter name wrapped around matches
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_location() -> String {
    "article".to_string()
}

fn default_style() -> String {
    "hl".to_string()
}

impl HighlightRule {
    pub fn new(location: &str, pattern: &str, style: &str) -> Self {
        Self {
            location: location.to_string(),
            pattern: pattern.to_string(),
            style: style.to_string(),
        }
    }

    /// Whether this rule applies at `location`.
    pub fn applies_to(&self, location: &str) -> bool {
        self.location == "all" || self.location == location
    }
}
