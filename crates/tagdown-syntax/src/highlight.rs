//! Highlight categories and the default re-tagging table.
//!
//! Host editors map these standard categories onto their own theme tokens.
//! The default table re-tags the base grammar's node kinds (blockquote, ATX
//! headings 1-6, emphasis, strong, link/image) onto standard categories so
//! the directive-tag styles compose with them instead of shadowing them.

use crate::syntax_kind::SyntaxKind;

/// Standard highlighting categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightTag {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Emphasis,
    Strong,
    Quote,
    Link,
    Monospace,
    Keyword,
    AttributeName,
    String,
    Number,
    VariableName,
    /// The `{%` / `%}` delimiters themselves.
    ProcessingInstruction,
}

/// The default `SyntaxKind -> HighlightTag` table applied by the default
/// extension.
pub fn default_styles() -> Vec<(SyntaxKind, HighlightTag)> {
    vec![
        (SyntaxKind::BLOCK_QUOTE, HighlightTag::Quote),
        (SyntaxKind::HEADING1, HighlightTag::Heading1),
        (SyntaxKind::HEADING2, HighlightTag::Heading2),
        (SyntaxKind::HEADING3, HighlightTag::Heading3),
        (SyntaxKind::HEADING4, HighlightTag::Heading4),
        (SyntaxKind::HEADING5, HighlightTag::Heading5),
        (SyntaxKind::HEADING6, HighlightTag::Heading6),
        (SyntaxKind::EMPHASIS, HighlightTag::Emphasis),
        (SyntaxKind::STRONG, HighlightTag::Strong),
        (SyntaxKind::LINK, HighlightTag::Link),
        (SyntaxKind::IMAGE, HighlightTag::Link),
        (SyntaxKind::AUTOLINK, HighlightTag::Link),
        (SyntaxKind::CODE_SPAN, HighlightTag::Monospace),
        (SyntaxKind::FENCED_CODE, HighlightTag::Monospace),
        (SyntaxKind::TAG_OPEN, HighlightTag::ProcessingInstruction),
        (SyntaxKind::TAG_CLOSE, HighlightTag::ProcessingInstruction),
        (SyntaxKind::TAG_NAME, HighlightTag::Keyword),
        (SyntaxKind::ATTRIBUTE, HighlightTag::AttributeName),
        (SyntaxKind::STRING_VALUE, HighlightTag::String),
        (SyntaxKind::NUMBER_VALUE, HighlightTag::Number),
        (SyntaxKind::VARIABLE, HighlightTag::VariableName),
    ]
}
