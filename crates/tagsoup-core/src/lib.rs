//! Tagsoup Core
//!
//! This crate provides core types, render state, and error definitions
//! for the tagsoup HTML-to-text renderer.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`RenderState`] - The renderer's mutable working set for one document
//! - [`TagKind`], [`LinkKind`] - Tag classification and link kinds
//! - [`MarkupEvent`], [`Attributes`] - Parser events
//! - [`LinkEntry`], [`Rendered`] - Render output
//! - [`Localize`], [`Labels`] - User-facing label lookup
//! - [`TagsoupError`], [`ParseError`] - Error types

pub mod enums;
pub mod error;
pub mod labels;
pub mod state;
pub mod types;

pub use enums::{LinkKind, TagKind};
pub use error::{ParseError, Result, TagsoupError};
pub use labels::{Labels, Localize};
pub use state::RenderState;
pub use types::{Attributes, LinkEntry, MarkupEvent, Rendered};
