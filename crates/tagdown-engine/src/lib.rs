//! # tagdown-engine
//!
//! The processing side of the tagged-markup pipeline: linting authored
//! content against the format's reference implementation, and projecting
//! its renderable trees to normalized plain text for full-text indexing.
//!
//! Three pieces, all synchronous and stateless per call:
//!
//! - [`document::DocumentView`] - the editor-facing view: full text plus a
//!   line-indexed position table.
//! - [`lint::lint`] - parse, derive validation variables from frontmatter,
//!   validate, and project findings onto byte-offset
//!   [`lint::Diagnostic`]s.
//! - [`render::render_plain_text`] - flatten a renderable tree into one
//!   normalized string.
//!
//! The reference implementation itself (parse/validate/transform) stays
//! external, behind the [`format::FormatEngine`] trait. The editor grammar
//! lives in the sibling `tagdown-syntax` crate; the two do not depend on
//! each other.

pub mod document;
pub mod format;
pub mod lint;
pub mod render;

// Re-export key types for easier usage
pub use document::{DocumentError, DocumentView, LineSpan};
pub use format::{
    ErrorDetail, ErrorLevel, FormatAst, FormatEngine, LinePosition, Location, RenderableNode,
    TagNode, ValidationConfig, ValidationError, Variables,
};
pub use lint::{lint, Diagnostic, Severity};
pub use render::render_plain_text;
