//! Parser events - the intermediate representation between grammar rules and
//! tree building.
//!
//! Instead of building the tree directly, the parser emits a flat sequence of
//! events that describe the tree structure. The indirection keeps grammar code
//! free of rowan details and makes declining rules cheap: a rule that matched
//! nothing has emitted nothing.
//!
//! ```text
//! Start(HEADING1)
//!   Token(HASH)
//!   Token(WHITESPACE)
//!   Token(TEXT)
//!   Token(NEWLINE)
//! Finish
//! ```
//!
//! The [`Sink`](super::sink::Sink) processes events in order, maintaining a
//! stack of open nodes: `Start` pushes, `Finish` pops.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node of the given kind.
    Start { kind: SyntaxKind },

    /// Add a token to the current node.
    ///
    /// `n_raw_tokens` says how many lexer tokens this event consumes.
    /// Usually 1, but can be more when grouping raw tokens into one
    /// semantic token.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node. Must be paired with a preceding `Start`.
    Finish,

    /// A reserved slot that may become a `Start`.
    ///
    /// `parser.start()` pushes a `Placeholder`; `marker.complete()` replaces
    /// it with a real `Start`, and `marker.abandon()` leaves it inert (the
    /// Sink ignores placeholders).
    Placeholder,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
