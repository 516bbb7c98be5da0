//! Event-based parser for the tagged-markup grammar.
//!
//! The parser transforms a token stream into a flat list of [`Event`]s that
//! the [`Sink`] folds into a Rowan tree, following the rust-analyzer
//! architecture: grammar rules never touch the tree directly, they only
//! inspect tokens and emit events.
//!
//! ## The Marker System
//!
//! `parser.start()` reserves a slot and returns a [`Marker`]. The marker
//! **must** be either completed with `marker.complete(parser, KIND)` or
//! abandoned with `marker.abandon(parser)`; dropping one is a bug and
//! panics. This keeps the event stream balanced even when rules bail out
//! halfway.
//!
//! ## Declining rules
//!
//! Pluggable block/inline rules (see [`crate::language`]) receive
//! `&mut Parser` and return `bool`. A rule that returns `false` must leave
//! the parser untouched - no events, no consumed tokens - so the next rule
//! (or the built-in grammar) gets a clean shot at the same position. The
//! lookahead helpers ([`Parser::find_ahead`], [`Parser::find_ahead_on_line`])
//! exist so rules can check for a closing delimiter *before* committing.

pub mod event;
pub mod sink;

pub(crate) mod grammar;

use crate::language::Language;
use crate::lexer::Token;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events, and the
/// [`Language`] whose rules drive dispatch. Grammar functions receive
/// `&mut Parser` and use its methods to inspect tokens, consume them, and
/// build structure.
pub struct Parser<'t, 'input, 'l> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    lang: &'l Language,
}

impl<'t, 'input, 'l> Parser<'t, 'input, 'l> {
    /// Create a new parser over a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>], lang: &'l Language) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            lang,
        }
    }

    /// Parse the tokens as a full document and return the syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Drive the parser with a custom entry point and return the tree.
    ///
    /// This exists so sub-grammars (notably implementations of
    /// [`crate::tagexpr::TagExpressionGrammar`]) can be tested in isolation,
    /// without going through document parsing. The callback must leave the
    /// event stream balanced.
    pub fn parse_with(mut self, entry: impl FnOnce(&mut Self)) -> SyntaxNode {
        entry(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// The language this parser was built for.
    pub fn language(&self) -> &'l Language {
        self.lang
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.kind_at(self.pos + n)
    }

    /// Token kind at an absolute token index, or EOF if out of range.
    pub fn kind_at(&self, idx: usize) -> SyntaxKind {
        self.tokens
            .get(idx)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Absolute index of the current token.
    pub fn token_pos(&self) -> usize {
        self.pos
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n as u8,
            });
            self.pos += n;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    /// Get the text of the token n positions ahead.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Check if we're at the start of a line (after newline or at start).
    pub fn at_line_start(&self) -> bool {
        if self.pos == 0 {
            return true;
        }
        self.tokens
            .get(self.pos - 1)
            .map(|t| t.kind == SyntaxKind::NEWLINE)
            .unwrap_or(false)
    }

    /// Find the next token of `kind` at or after the current position,
    /// scanning to end of input. Returns its absolute index.
    pub fn find_ahead(&self, kind: SyntaxKind) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| self.tokens[i].kind == kind)
    }

    /// Find the next token of `kind` within the current line only.
    /// Returns its absolute index, or `None` if a newline (or end of input)
    /// comes first.
    pub fn find_ahead_on_line(&self, kind: SyntaxKind) -> Option<usize> {
        for i in self.pos..self.tokens.len() {
            match self.tokens[i].kind {
                SyntaxKind::NEWLINE => return None,
                k if k == kind => return Some(i),
                _ => {}
            }
        }
        None
    }

    /// Absolute index of the current line's terminating newline token, or
    /// the end of input if the last line is unterminated.
    pub fn line_end(&self) -> usize {
        self.find_ahead(SyntaxKind::NEWLINE)
            .unwrap_or(self.tokens.len())
    }
}

/// A marker for a node being constructed.
///
/// `parser.start()` pushes a `Placeholder` event and returns a `Marker`
/// pointing at it. Every marker must be completed or abandoned:
///
/// - `marker.complete(parser, KIND)` converts the placeholder to a `Start`
///   event and pushes a `Finish`.
/// - `marker.abandon(parser)` removes the placeholder (only possible while
///   nothing was pushed after it; otherwise it stays inert and the Sink
///   skips it).
///
/// Dropping a marker without doing either panics - that is a corrupt tree
/// waiting to happen, caught early.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Use this when a rule speculatively started a node and then declined.
    pub fn abandon(mut self, p: &mut Parser<'_, '_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}
