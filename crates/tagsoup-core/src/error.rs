//! Error types for tagsoup

use thiserror::Error;

/// Errors raised while pulling events out of a tag soup.
///
/// None of these escape a render call: a missing attribute means
/// "absent" and an unterminated tag ends the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The requested attribute is not present on the current tag
    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    /// End of input was reached inside a `<...>` span
    #[error("EOF found while reading tag")]
    UnterminatedTag,
}

/// Main error type for tagsoup operations
#[derive(Error, Debug)]
pub enum TagsoupError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error during markup processing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type alias for tagsoup operations
pub type Result<T> = std::result::Result<T, TagsoupError>;
