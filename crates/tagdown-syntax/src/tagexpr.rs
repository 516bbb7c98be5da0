//! The tag-expression sub-grammar.
//!
//! Directive tags carry their own little language between `{%` and `%}`:
//! a tag name (or `/name` for closing tags), `name=value` attribute pairs,
//! and `$variable` interpolation. That language is parsed by a grammar
//! separate from the outer document grammar; the two compose through the
//! [`TagExpressionGrammar`] trait, dispatched per directive node by the
//! outer grammar (see [`crate::parser::grammar::tag`]).
//!
//! The delegate operates on the same lossless token stream as the outer
//! grammar, through the public [`Parser`] API, between the current position
//! and a `limit` (the token index of the closing `%}`). It must never
//! consume past the limit; it may stop short, in which case the dispatcher
//! wraps the remainder in an `ERROR` node.
//!
//! Implementations are independently testable via [`Parser::parse_with`]
//! and swappable via
//! [`LanguageOptions::delegate`](crate::language::LanguageOptions).

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// A parser for the interior of directive tags.
///
/// `kind` is the directive node under construction ([`SyntaxKind::TAG`] or
/// [`SyntaxKind::INLINE_TAG`]); `limit` is the absolute token index of the
/// closing delimiter, which the implementation must not consume.
pub trait TagExpressionGrammar: Send + Sync {
    fn interior(&self, kind: SyntaxKind, p: &mut Parser<'_, '_, '_>, limit: usize);
}

/// The default tag-expression grammar.
///
/// Grammar sketch, whitespace-separated:
///
/// ```text
/// interior   := '/'? name attribute* | variable
/// attribute  := name '=' value
/// value      := string | number | variable | bare-word
/// variable   := '$' path
/// ```
pub struct TagExprGrammar;

/// The default delegate instance, supplied to language construction as a
/// constant dependency.
pub static TAG_EXPRESSION: TagExprGrammar = TagExprGrammar;

impl TagExpressionGrammar for TagExprGrammar {
    fn interior(&self, _kind: SyntaxKind, p: &mut Parser<'_, '_, '_>, limit: usize) {
        skip_space(p, limit);
        if p.token_pos() >= limit {
            return;
        }

        // Leading form: closing marker + name, interpolated variable, or name
        match p.current() {
            SyntaxKind::SLASH => {
                let m = p.start();
                p.bump(); // /
                bump_name(p, limit);
                m.complete(p, SyntaxKind::TAG_NAME);
            }
            SyntaxKind::DOLLAR => variable(p, limit),
            SyntaxKind::TEXT => {
                let m = p.start();
                bump_name(p, limit);
                m.complete(p, SyntaxKind::TAG_NAME);
            }
            _ => {}
        }

        loop {
            skip_space(p, limit);
            if p.token_pos() >= limit {
                break;
            }

            if at_attribute(p, limit) {
                attribute(p, limit);
            } else if p.at(SyntaxKind::DOLLAR) {
                variable(p, limit);
            } else {
                error_run(p, limit);
            }
        }
    }
}

/// Consume whitespace and newlines up to the limit (block tags span lines).
fn skip_space(p: &mut Parser<'_, '_, '_>, limit: usize) {
    while p.token_pos() < limit
        && matches!(p.current(), SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE)
    {
        p.bump();
    }
}

/// Consume a name: TEXT segments joined by dashes (`my-tag`).
fn bump_name(p: &mut Parser<'_, '_, '_>, limit: usize) {
    while p.token_pos() < limit && matches!(p.current(), SyntaxKind::TEXT | SyntaxKind::DASH) {
        p.bump();
    }
}

/// Lookahead: does a `name=` attribute start here?
fn at_attribute(p: &Parser<'_, '_, '_>, limit: usize) -> bool {
    if !p.at(SyntaxKind::TEXT) {
        return false;
    }
    let mut i = p.token_pos();
    while i < limit && matches!(p.kind_at(i), SyntaxKind::TEXT | SyntaxKind::DASH) {
        i += 1;
    }
    i < limit && p.kind_at(i) == SyntaxKind::EQUALS
}

/// Parse `name=value`.
fn attribute(p: &mut Parser<'_, '_, '_>, limit: usize) {
    let m = p.start();
    bump_name(p, limit);
    p.bump(); // =
    value(p, limit);
    m.complete(p, SyntaxKind::ATTRIBUTE);
}

/// Parse an attribute value. An absent value (`a= `) leaves the attribute
/// with name and `=` only.
fn value(p: &mut Parser<'_, '_, '_>, limit: usize) {
    if p.token_pos() >= limit {
        return;
    }
    match p.current() {
        SyntaxKind::QUOTE => string_value(p, limit),
        SyntaxKind::DOLLAR => variable(p, limit),
        SyntaxKind::DASH
            if p.nth(1) == SyntaxKind::TEXT && p.nth_text(1).parse::<f64>().is_ok() =>
        {
            let m = p.start();
            p.bump(); // -
            p.bump(); // digits
            m.complete(p, SyntaxKind::NUMBER_VALUE);
        }
        SyntaxKind::TEXT if p.current_text().parse::<f64>().is_ok() => {
            let m = p.start();
            p.bump();
            m.complete(p, SyntaxKind::NUMBER_VALUE);
        }
        SyntaxKind::TEXT => {
            // Bare word: true, false, an identifier
            p.bump();
        }
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {}
        _ => error_run(p, limit),
    }
}

/// Parse a double-quoted string. An unterminated string runs to the limit;
/// the tag's closing delimiter still wins.
fn string_value(p: &mut Parser<'_, '_, '_>, limit: usize) {
    let m = p.start();
    p.bump(); // "
    while p.token_pos() < limit && !p.at(SyntaxKind::QUOTE) {
        p.bump();
    }
    if p.token_pos() < limit {
        p.bump(); // closing "
    }
    m.complete(p, SyntaxKind::STRING_VALUE);
}

/// Parse `$path`.
fn variable(p: &mut Parser<'_, '_, '_>, limit: usize) {
    let m = p.start();
    p.bump(); // $
    if p.token_pos() < limit && p.at(SyntaxKind::TEXT) {
        p.bump();
    }
    m.complete(p, SyntaxKind::VARIABLE);
}

/// Wrap a run of unparseable tokens in an ERROR node, always making
/// progress.
fn error_run(p: &mut Parser<'_, '_, '_>, limit: usize) {
    let m = p.start();
    p.bump();
    while p.token_pos() < limit
        && !matches!(p.current(), SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE)
    {
        p.bump();
    }
    m.complete(p, SyntaxKind::ERROR);
}
