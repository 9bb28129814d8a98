//! User-facing labels emitted by the renderer.

use serde::{Deserialize, Serialize};

/// Lookup of the handful of translatable strings the renderer emits.
///
/// Keys are the English strings themselves: `"link"`, `"image"`,
/// `"embedded flash"`, `"unknown (bug)"`, `"Links: "` and
/// `"embedded flash:"`. Unknown keys should come back unchanged.
pub trait Localize {
    fn localize(&self, key: &str) -> String;
}

/// Label table, overridable from the `[labels]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Labels {
    #[serde(default = "default_link")]
    pub link: String,

    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_embedded_flash")]
    pub embedded_flash: String,

    /// Placeholder prefix, as in `[embedded flash: 3]`
    #[serde(default = "default_embedded_flash_prefix")]
    pub embedded_flash_prefix: String,

    #[serde(default = "default_unknown")]
    pub unknown: String,

    /// Header line in front of the link list
    #[serde(default = "default_links_header")]
    pub links_header: String,
}

fn default_link() -> String {
    "link".to_string()
}

fn default_image() -> String {
    "image".to_string()
}

fn default_embedded_flash() -> String {
    "embedded flash".to_string()
}

fn default_embedded_flash_prefix() -> String {
    "embedded flash:".to_string()
}

fn default_unknown() -> String {
    "unknown (bug)".to_string()
}

fn default_links_header() -> String {
    "Links: ".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            link: default_link(),
            image: default_image(),
            embedded_flash: default_embedded_flash(),
            embedded_flash_prefix: default_embedded_flash_prefix(),
            unknown: default_unknown(),
            links_header: default_links_header(),
        }
    }
}

impl Localize for Labels {
    fn localize(&self, key: &str) -> String {
        match key {
            "link" => self.link.clone(),
            "image" => self.image.clone(),
            "embedded flash" => self.embedded_flash.clone(),
            "embedded flash:" => self.embedded_flash_prefix.clone(),
            "unknown (bug)" => self.unknown.clone(),
            "Links: " => self.links_header.clone(),
            other => other.to_string(),
        }
    }
}
