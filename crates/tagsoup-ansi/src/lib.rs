//! Tagsoup ANSI
//!
//! This crate turns the inline delimiters of rendered tagsoup lines into
//! terminal output.
//!
//! # Overview
//!
//! - [`codes`] - ANSI escape code constants
//! - [`utils`] - Markup segmentation, display width, stripping and styling
//! - [`sanitize`] - Security utilities for safe terminal output
//!
//! # Example
//!
//! ```
//! use tagsoup_ansi::utils;
//!
//! let line = "Hello <u>world</>[1].";
//! assert_eq!(utils::markup_width(line), 15);
//! assert_eq!(utils::strip_markup(line), "Hello world[1].");
//! assert_eq!(utils::visible(&utils::stylize(line)), "Hello world[1].");
//! ```

pub mod codes;
pub mod sanitize;
pub mod utils;

pub use codes::*;
pub use sanitize::*;
pub use utils::*;
