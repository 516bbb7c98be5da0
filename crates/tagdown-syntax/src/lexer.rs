//! Logos-based tokenizer for the tagged-markup format.
//!
//! The most important property of this lexer is that **every byte in the input
//! appears in exactly one token** - nothing is skipped or discarded, which is
//! what makes lossless round-tripping of the tree possible.
//!
//! Tokens are minimal and context-free. The lexer doesn't know whether `*`
//! starts a list, emphasis, or a thematic break, and it doesn't know whether
//! `=` sits inside a directive tag - those are parser decisions. The only
//! multi-character specials are the directive delimiters `{%` and `%}`, which
//! are lexed as single tokens so both grammars agree on where a tag starts
//! and ends.
//!
//! The tag-expression specials (`=`, `$`, `"`, `/`, `:`) are lexed
//! unconditionally. Outside a directive tag the outer grammar consumes them
//! as plain content; inside one the tag-expression grammar gives them
//! structure.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `{%` directive-tag opener
    #[token("{%")]
    TagOpen,

    /// `%}` directive-tag closer
    #[token("%}")]
    TagClose,

    /// `#` for headings
    #[token("#")]
    Hash,

    /// `>` for blockquotes
    #[token(">")]
    Gt,

    /// `-` for lists, thematic breaks, setext underlines
    #[token("-")]
    Dash,

    /// `*` for lists, emphasis, thematic breaks
    #[token("*")]
    Star,

    /// `+` for lists
    #[token("+")]
    Plus,

    /// `_` for emphasis
    #[token("_")]
    Underscore,

    /// Single backtick
    #[token("`")]
    Backtick,

    /// Tilde for fenced code
    #[token("~")]
    Tilde,

    /// `[` for links
    #[token("[")]
    LBracket,

    /// `]` for links
    #[token("]")]
    RBracket,

    /// `(` for link URLs
    #[token("(")]
    LParen,

    /// `)` for link URLs
    #[token(")")]
    RParen,

    /// `|` for tables
    #[token("|")]
    Pipe,

    /// `!` for images
    #[token("!")]
    Exclaim,

    /// `<` for autolinks
    #[token("<")]
    Lt,

    /// `:` for table alignment
    #[token(":")]
    Colon,

    /// `=` for attribute values
    #[token("=")]
    Equals,

    /// `$` for variables
    #[token("$")]
    Dollar,

    /// `"` for string values
    #[token("\"")]
    Quote,

    /// `/` for closing tags
    #[token("/")]
    Slash,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^ \t\r\n#>*+_`~\[\]()|!<:{%}=$"/-]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::TagOpen => SyntaxKind::TAG_OPEN,
            TokenKind::TagClose => SyntaxKind::TAG_CLOSE,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Exclaim => SyntaxKind::EXCLAIM,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Equals => SyntaxKind::EQUALS,
            TokenKind::Dollar => SyntaxKind::DOLLAR,
            TokenKind::Quote => SyntaxKind::QUOTE,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
/// Bytes no rule matches (a lone `{`, a stray `%`) degrade to `TEXT`.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}
