//! Terminal output sanitization.
//!
//! Rendered text comes straight from untrusted documents, so control
//! characters are removed before styled output reaches a terminal.

/// Sanitize a string for safe terminal output.
///
/// Removes control characters except newline and tab.
///
/// # Example
/// ```
/// use tagsoup_ansi::sanitize::sanitize_for_terminal;
///
/// let safe = sanitize_for_terminal("Hello\x1b[31mWorld");
/// assert_eq!(safe, "Hello[31mWorld"); // ESC removed
/// ```
pub fn sanitize_for_terminal(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
