//! Render settings.
//!
//! This module contains the `RenderConfig` struct which holds the
//! layout options handed to the HTML renderer and list formatter.

use serde::{Deserialize, Serialize};

/// Render settings from the `[render]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderConfig {
    /// Output width in columns.
    /// Default: 0 (detect from the terminal)
    #[serde(default)]
    pub width: usize,

    /// Suppress the emphasis delimiters in rendered lines.
    /// Default: false
    #[serde(default)]
    pub raw: bool,

    /// Width at which the list formatter splits long lines.
    /// Default: 0 (no limit)
    #[serde(default)]
    pub list_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 0,
            raw: false,
            list_width: 0,
        }
    }
}

impl RenderConfig {
    /// Merge another RenderConfig into this one.
    ///
    /// Only fields of `other` that differ from the defaults are copied,
    /// since TOML does not distinguish "not set" from "set to default".
    pub fn merge(&mut self, other: &RenderConfig) {
        let defaults = RenderConfig::default();

        if other.width != defaults.width {
            self.width = other.width;
        }
        if other.raw != defaults.raw {
            self.raw = other.raw;
        }
        if other.list_width != defaults.list_width {
            self.list_width = other.list_width;
        }
    }
}
