//! Tagsoup Config
//!
//! This crate handles configuration loading and management
//! for tagsoup, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/tagsoup/config.toml`
//! - macOS: `~/Library/Application Support/tagsoup/config.toml`
//! - Windows: `%APPDATA%\tagsoup\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use tagsoup_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod highlight;
mod render;

pub use highlight::HighlightRule;
pub use render::RenderConfig;
pub use tagsoup_core::Labels;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tagsoup_core::{Result, TagsoupError};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[render]
Width     = 0
Raw       = false
ListWidth = 0

[labels]
Link                = "link"
Image               = "image"
EmbeddedFlash       = "embedded flash"
EmbeddedFlashPrefix = "embedded flash:"
Unknown             = "unknown (bug)"
LinksHeader         = "Links: "
"#;

/// Main configuration structure.
///
/// Contains all configuration sections for tagsoup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Layout options
    #[serde(default)]
    pub render: RenderConfig,

    /// Localized labels
    #[serde(default)]
    pub labels: Labels,

    /// Highlight rules for list output
    #[serde(default)]
    pub highlight: Vec<HighlightRule>,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use tagsoup_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[render]"));
    /// assert!(toml.contains("[labels]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tagsoup")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tagsoup_config::Config;
    /// use std::path::Path;
    /// let config = Config::load_from(Path::new("./config.toml")).unwrap();
    /// ```
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| TagsoupError::Config(format!("Parse error in {}: {}", path.display(), e)))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` names an existing file, load and merge it,
    ///    otherwise parse it as inline TOML and merge that
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tagsoup_config::Config;
    ///
    /// // Load with inline TOML override
    /// let config = Config::load_with_override(Some("[render]\nRaw = true")).unwrap();
    /// assert!(config.render.raw);
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.merge(&Self::parse_override(override_str)?);
        }

        Ok(config)
    }

    /// Parse an override given either as a file path or as inline TOML.
    pub fn parse_override(override_str: &str) -> Result<Self> {
        let override_path = Path::new(override_str);

        let override_toml = if override_path.exists() {
            std::fs::read_to_string(override_path)?
        } else {
            override_str.to_string()
        };

        toml::from_str(&override_toml)
            .map_err(|e| TagsoupError::Config(format!("Override parse error: {}", e)))
    }

    /// Merge another config into this one.
    ///
    /// Render options from `other` take precedence, labels too unless
    /// `other` leaves them all at their defaults; highlight rules are
    /// appended.
    ///
    /// # Example
    ///
    /// ```
    /// use tagsoup_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config: Config = toml::from_str(r#"
    ///     [render]
    ///     Width = 60
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert_eq!(base.render.width, 60);
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.render.merge(&other.render);
        if other.labels != Labels::default() {
            self.labels = other.labels.clone();
        }
        self.highlight.extend(other.highlight.iter().cloned());
    }
}
