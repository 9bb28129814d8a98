//! ANSI escape code constants.
//!
//! Only the SGR sequences the markup delimiters translate to.

/// Reset all attributes (colors and formatting).
pub const RESET: &str = "\x1b[0m";

/// Bold on.
pub const BOLD_ON: &str = "\x1b[1m";

/// Underline on.
pub const UNDERLINE_ON: &str = "\x1b[4m";

/// Reverse video on.
pub const REVERSE_ON: &str = "\x1b[7m";
