//! SyntaxKind enum for all tokens and nodes in the tagged-markup CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree. The directive
//! delimiters `{%` / `%}` and the tag-expression specials (`=`, `$`, `"`, `/`)
//! are first-class tokens so the tag-expression grammar can parse the same
//! lossless token stream the outer grammar produces.

/// All syntax kinds for the tagged-markup CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser
/// output). The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `#` for ATX headings
    HASH,
    /// `>` character for blockquotes and autolink close
    GT,
    /// `-` character for lists, thematic breaks, and setext underlines
    DASH,
    /// `*` character for lists, emphasis, and thematic breaks
    STAR,
    /// `+` character for lists
    PLUS,
    /// `_` for emphasis
    UNDERSCORE,
    /// Single backtick for code spans and fences
    BACKTICK,
    /// `~` character for fenced code
    TILDE,
    /// `[` for links and images
    LBRACKET,
    /// `]` for links and images
    RBRACKET,
    /// `(` for link URLs
    LPAREN,
    /// `)` for link URLs
    RPAREN,
    /// `|` for table cell separators
    PIPE,
    /// `!` for images
    EXCLAIM,
    /// `<` for autolink open
    LT,
    /// `:` for table delimiter alignment markers
    COLON,
    /// `{%` directive-tag opening delimiter
    TAG_OPEN,
    /// `%}` directive-tag closing delimiter
    TAG_CLOSE,
    /// `=` between an attribute name and its value
    EQUALS,
    /// `$` introducing a variable reference
    DOLLAR,
    /// `"` delimiting string attribute values
    QUOTE,
    /// `/` marking a closing tag (`{% /name %}`)
    SLASH,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Paragraph block
    PARAGRAPH,
    /// ATX heading, level 1 (`# ...`)
    HEADING1,
    /// ATX heading, level 2
    HEADING2,
    /// ATX heading, level 3
    HEADING3,
    /// ATX heading, level 4
    HEADING4,
    /// ATX heading, level 5
    HEADING5,
    /// ATX heading, level 6
    HEADING6,
    /// Setext heading (`===` / `---` underline); disabled in the default language
    SETEXT_HEADING,
    /// Blockquote container (`> ...`)
    BLOCK_QUOTE,
    /// Individual list item
    LIST_ITEM,
    /// Thematic break (`---`, `***`, etc.)
    THEMATIC_BREAK,
    /// Fenced code block
    FENCED_CODE,
    /// Indented code block; disabled in the default language
    INDENTED_CODE,
    /// Pipe table
    TABLE,
    /// A header or body row in a table
    TABLE_ROW,
    /// The `|---|---|` alignment row in a table
    TABLE_DELIMITER,
    /// Inline content that degraded out of a richer construct
    INLINE,
    /// Inline code span
    CODE_SPAN,
    /// Emphasis `*text*`
    EMPHASIS,
    /// Strong emphasis `**text**`
    STRONG,
    /// Standard link `[text](url)`
    LINK,
    /// Image `![alt](url)`
    IMAGE,
    /// Autolink `<url>`
    AUTOLINK,
    /// Block-level directive tag `{% ... %}`, possibly spanning lines
    TAG,
    /// Inline directive tag, confined to a single line
    INLINE_TAG,
    /// The name inside a directive tag
    TAG_NAME,
    /// A `name=value` pair inside a directive tag
    ATTRIBUTE,
    /// A double-quoted attribute value
    STRING_VALUE,
    /// A numeric attribute value
    NUMBER_VALUE,
    /// A `$variable` reference
    VARIABLE,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true for the two directive-tag node kinds whose interior is
    /// handed to the tag-expression grammar.
    pub fn is_directive(self) -> bool {
        matches!(self, Self::TAG | Self::INLINE_TAG)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagdownLang {}

impl rowan::Language for TagdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<TagdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<TagdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<TagdownLang>;
