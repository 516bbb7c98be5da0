//! Language construction: the pluggable grammar and its factory.
//!
//! [`build_language`] is the public entry point: it takes a
//! [`LanguageOptions`] and returns a [`LanguageSupport`] bundling the
//! configured [`Language`] with its editor-facing extras (keymap, HTML tag
//! completion, embedded code-language resolution).
//!
//! A [`Language`] is the base grammar plus an ordered set of applied
//! [`Extension`]s. The built-in default extension - directive tags, tables,
//! the removal of indented code and setext headings, and the highlight
//! re-tags - is always applied first, so caller extensions can override or
//! remove core behavior but never accidentally lose it.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::completion;
use crate::highlight::{self, HighlightTag};
use crate::keymap::{self, KeyBinding};
use crate::lexer::lex;
use crate::parser::grammar::{block, tag};
use crate::parser::Parser;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::tagexpr::{TagExpressionGrammar, TAG_EXPRESSION};

/// A named, pluggable block-level rule.
///
/// `apply` either parses a complete block (returning `true`) or declines by
/// returning `false` with the parser untouched. `interrupts` is consulted on
/// paragraph continuation lines; returning `true` ends the paragraph so
/// `apply` gets a shot at the next block position.
#[derive(Clone, Copy)]
pub struct BlockRule {
    pub name: &'static str,
    pub apply: fn(&mut Parser<'_, '_, '_>) -> bool,
    pub interrupts: fn(&Parser<'_, '_, '_>) -> bool,
}

/// A named, pluggable inline-level rule. Same decline protocol as
/// [`BlockRule::apply`].
#[derive(Clone, Copy)]
pub struct InlineRule {
    pub name: &'static str,
    pub apply: fn(&mut Parser<'_, '_, '_>) -> bool,
}

/// A bundle of grammar changes: rules to add, rule names to remove, and
/// highlight re-tags. Removal applies to anything registered earlier,
/// including the built-in `IndentedCode` and `SetextHeading` constructs.
#[derive(Clone, Default)]
pub struct Extension {
    pub block_rules: Vec<BlockRule>,
    pub inline_rules: Vec<InlineRule>,
    pub remove: Vec<&'static str>,
    pub styles: Vec<(SyntaxKind, HighlightTag)>,
}

/// An embedded language resolved from a code fence info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLanguage {
    pub name: String,
}

/// Maps a fence info string (`rust`, `js`, ...) to an embedded language.
pub type CodeLanguageResolver = Arc<dyn Fn(&str) -> Option<CodeLanguage> + Send + Sync>;

/// Configuration for [`build_language`]. All fields are optional and
/// independent; `Default` gives the stock language.
#[derive(Clone, Default)]
pub struct LanguageOptions {
    /// Resolver for embedded code-fence languages.
    pub code_languages: Option<CodeLanguageResolver>,
    /// Include the default editing keymap. Defaults to true.
    pub keymap: Option<bool>,
    /// Extra grammar extensions, applied after the defaults in order.
    pub extensions: Vec<Extension>,
    /// Substitute base grammar. Defaults to [`Language::commonmark`].
    pub base: Option<Language>,
    /// Include HTML tag completion. Defaults to true.
    pub complete_html_tags: Option<bool>,
    /// Substitute tag-expression grammar for directive interiors.
    pub delegate: Option<&'static dyn TagExpressionGrammar>,
}

/// The tagged-markup grammar: base constructs, applied extensions, and the
/// tag-expression delegate.
#[derive(Clone)]
pub struct Language {
    block_rules: Vec<BlockRule>,
    inline_rules: Vec<InlineRule>,
    removed: HashSet<&'static str>,
    styles: BTreeMap<SyntaxKind, HighlightTag>,
    delegate: &'static dyn TagExpressionGrammar,
}

impl Language {
    /// The bare CommonMark-compatible base grammar: no directive tags, no
    /// tables, indented code and setext headings still active, no styles.
    pub fn commonmark() -> Self {
        Self {
            block_rules: Vec::new(),
            inline_rules: Vec::new(),
            removed: HashSet::new(),
            styles: BTreeMap::new(),
            delegate: &TAG_EXPRESSION,
        }
    }

    /// The stock language: the base grammar with the default extension
    /// applied.
    pub fn default_language() -> Self {
        let mut lang = Self::commonmark();
        lang.apply(default_extension());
        lang
    }

    /// Apply an extension: process removals, then register its rules and
    /// styles.
    pub fn apply(&mut self, ext: Extension) {
        for name in ext.remove {
            self.removed.insert(name);
            self.block_rules.retain(|r| r.name != name);
            self.inline_rules.retain(|r| r.name != name);
        }
        self.block_rules.extend(ext.block_rules);
        self.inline_rules.extend(ext.inline_rules);
        self.styles.extend(ext.styles);
    }

    /// Whether a named construct (built-in or rule) is still active.
    pub fn enabled(&self, name: &str) -> bool {
        !self.removed.contains(name)
    }

    /// Active pluggable block rules, in registration order.
    pub fn block_rules(&self) -> &[BlockRule] {
        &self.block_rules
    }

    /// Active pluggable inline rules, in registration order.
    pub fn inline_rules(&self) -> &[InlineRule] {
        &self.inline_rules
    }

    /// The tag-expression grammar for directive interiors.
    pub fn delegate(&self) -> &'static dyn TagExpressionGrammar {
        self.delegate
    }

    /// Replace the tag-expression grammar.
    pub fn with_delegate(mut self, delegate: &'static dyn TagExpressionGrammar) -> Self {
        self.delegate = delegate;
        self
    }

    /// The highlight category a node kind was re-tagged onto, if any.
    pub fn style_of(&self, kind: SyntaxKind) -> Option<HighlightTag> {
        self.styles.get(&kind).copied()
    }

    /// Parse a document with this language.
    pub fn parse(&self, source: &str) -> SyntaxNode {
        let tokens = lex(source);
        Parser::new(&tokens, self).parse()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::default_language()
    }
}

/// The always-applied defaults: directive tags (block + inline), pipe
/// tables, removal of the two base constructs this format does not accept,
/// and the highlight re-tags.
pub fn default_extension() -> Extension {
    Extension {
        block_rules: vec![
            BlockRule {
                name: "Tag",
                apply: tag::tag_block,
                interrupts: tag::tag_interrupts,
            },
            BlockRule {
                name: "Table",
                apply: block::table,
                interrupts: block::table_interrupts,
            },
        ],
        inline_rules: vec![InlineRule {
            name: "InlineTag",
            apply: tag::inline_tag,
        }],
        remove: vec!["IndentedCode", "SetextHeading"],
        styles: highlight::default_styles(),
    }
}

/// A configured language plus its editor-facing support data.
pub struct LanguageSupport {
    pub language: Language,
    keymap: Vec<KeyBinding>,
    html_tags: &'static [&'static str],
    code_languages: Option<CodeLanguageResolver>,
}

impl LanguageSupport {
    /// Parse a document with the configured language.
    pub fn parse(&self, source: &str) -> SyntaxNode {
        self.language.parse(source)
    }

    /// The editing keymap; empty when opted out.
    pub fn keymap(&self) -> &[KeyBinding] {
        &self.keymap
    }

    /// HTML tag names completing the given prefix; empty when opted out.
    pub fn html_tag_completions(&self, prefix: &str) -> Vec<&'static str> {
        completion::filter_tags(self.html_tags, prefix)
    }

    /// Resolve the embedded language of a fenced code block from its info
    /// string, using the configured resolver.
    pub fn code_language_of(&self, fence: &SyntaxNode) -> Option<CodeLanguage> {
        let resolver = self.code_languages.as_ref()?;
        if fence.kind() != SyntaxKind::FENCED_CODE {
            return None;
        }

        // The info string is what follows the opening fence run on its line.
        let mut info = String::new();
        for element in fence.children_with_tokens() {
            let Some(token) = element.into_token() else {
                continue;
            };
            match token.kind() {
                SyntaxKind::BACKTICK | SyntaxKind::TILDE => continue,
                SyntaxKind::NEWLINE => break,
                _ => info.push_str(token.text()),
            }
        }

        let info = info.trim();
        if info.is_empty() {
            return None;
        }
        resolver(info)
    }
}

/// Build the pluggable language definition from the given options.
///
/// The default extension is always applied first; caller extensions follow
/// in order, so they can override or remove defaults but never silently
/// replace them (spelled-out removal via [`Extension::remove`] is the only
/// way to drop core tag recognition).
pub fn build_language(options: LanguageOptions) -> LanguageSupport {
    let mut language = options.base.unwrap_or_else(Language::commonmark);

    if let Some(delegate) = options.delegate {
        language = language.with_delegate(delegate);
    }

    language.apply(default_extension());
    for ext in options.extensions {
        language.apply(ext);
    }

    let keymap = if options.keymap.unwrap_or(true) {
        keymap::default_keymap()
    } else {
        Vec::new()
    };

    let html_tags: &'static [&'static str] = if options.complete_html_tags.unwrap_or(true) {
        completion::HTML_TAGS
    } else {
        &[]
    };

    LanguageSupport {
        language,
        keymap,
        html_tags,
        code_languages: options.code_languages,
    }
}
