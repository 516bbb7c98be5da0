//! # tagdown-syntax
//!
//! A lossless syntax tree for tagged markup - Markdown-compatible prose with
//! embedded `{% ... %}` directive tags - using [Rowan] + [Logos], following
//! the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture
//!
//! The parsing pipeline has three stages:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree is a lossless CST: every byte of the source appears in exactly
//! one token, so `tree.text()` always round-trips the input - including for
//! half-finished edits and garbage. That property is what makes the tree
//! usable as an editor's parse state.
//!
//! ## Two grammars, one tree
//!
//! Directive tags contain a second language (tag name, attributes,
//! `$variable` interpolation). The outer grammar finds the delimiters and
//! hands everything between them to a [`tagexpr::TagExpressionGrammar`],
//! which emits its nodes into the same event stream - mixed parsing without
//! merging the two rule sets. The delegate is a constant, swappable
//! dependency of the [`language::Language`].
//!
//! ## Recovery policy
//!
//! A `{%` with no closing `%}` (anywhere in the document for block tags, on
//! the same line for inline tags) is **not** a tag and **not** an error: the
//! rules decline and the text parses as ordinary prose. Editors see stable
//! paragraphs while the user is mid-keystroke.
//!
//! ## Quick Start
//!
//! ```
//! use tagdown_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("{% callout kind=\"note\" %}\n");
//!
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let tag = tree.children().next().unwrap();
//! assert_eq!(tag.kind(), SyntaxKind::TAG);
//! assert_eq!(tree.text().to_string(), "{% callout kind=\"note\" %}\n");
//! ```

pub mod completion;
pub mod highlight;
pub mod keymap;
pub mod language;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;
pub mod tagexpr;

pub use highlight::HighlightTag;
pub use keymap::KeyBinding;
pub use language::{
    build_language, default_extension, BlockRule, CodeLanguage, CodeLanguageResolver, Extension,
    InlineRule, Language, LanguageOptions, LanguageSupport,
};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TagdownLang};
pub use tagexpr::{TagExpressionGrammar, TagExprGrammar, TAG_EXPRESSION};

/// Parse source text with the stock language.
pub fn parse(source: &str) -> SyntaxNode {
    Language::default_language().parse(source)
}
