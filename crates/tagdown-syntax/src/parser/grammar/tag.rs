//! Directive-tag grammar rules and the mixed-parse dispatch.
//!
//! Two rules recognize `{% ... %}` directives:
//!
//! - [`tag_block`]: block-level, triggered only with `{%` at the start of a
//!   block line. The closing `%}` may sit on a later line.
//! - [`inline_tag`]: inline-level, triggered at `{%` anywhere in a line. The
//!   closing `%}` must sit on the *same* line - inline constructs do not
//!   cross block boundaries.
//!
//! Both rules look for the closing delimiter *before* emitting anything and
//! decline when it is missing, so an unterminated `{%` falls through to
//! ordinary paragraph parsing. That is the recovery policy, not an error.
//!
//! The interior between the delimiters belongs to a different grammar:
//! [`delegate_interior`] hands it to the language's
//! [`TagExpressionGrammar`](crate::tagexpr::TagExpressionGrammar), keyed on
//! the node kind being built. Whatever the delegate leaves unconsumed is
//! wrapped in an `ERROR` node so the tree stays lossless.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::block::consume_line;

/// Pluggable block rule: a directive tag occupying its own block, spanning
/// from `{%` at line start through the first `%}`, across lines if needed.
pub(crate) fn tag_block(p: &mut Parser<'_, '_, '_>) -> bool {
    if !p.at(SyntaxKind::TAG_OPEN) {
        return false;
    }
    // Block positions sit at line starts; the opener must be the line's
    // first token.
    debug_assert!(p.at_line_start());

    // Scan the rest of the document for the closing delimiter; without one
    // there is no tag node at all.
    let Some(close) = p.find_ahead(SyntaxKind::TAG_CLOSE) else {
        return false;
    };

    let m = p.start();
    p.bump(); // {%
    delegate_interior(p, SyntaxKind::TAG, close);
    p.bump(); // %}
    m.complete(p, SyntaxKind::TAG);

    // The node ends just past `%}`; whatever trails on the close line sits
    // outside it.
    consume_line(p);
    true
}

/// Interrupt predicate for [`tag_block`]: lets a terminated block tag cut a
/// paragraph short.
pub(crate) fn tag_interrupts(p: &Parser<'_, '_, '_>) -> bool {
    p.at(SyntaxKind::TAG_OPEN) && p.find_ahead(SyntaxKind::TAG_CLOSE).is_some()
}

/// Pluggable inline rule: a directive tag within a line of prose. The
/// closing `%}` is searched only in the remainder of the current line.
pub(crate) fn inline_tag(p: &mut Parser<'_, '_, '_>) -> bool {
    if !p.at(SyntaxKind::TAG_OPEN) {
        return false;
    }
    let Some(close) = p.find_ahead_on_line(SyntaxKind::TAG_CLOSE) else {
        return false;
    };

    let m = p.start();
    p.bump(); // {%
    delegate_interior(p, SyntaxKind::INLINE_TAG, close);
    p.bump(); // %}
    m.complete(p, SyntaxKind::INLINE_TAG);
    true
}

/// Hand the tag interior to the language's tag-expression grammar.
///
/// `kind` is the directive node being built and `limit` the absolute token
/// index of the closing `%}`. The delegate must stop at `limit`; leftovers
/// are consumed into an `ERROR` node here so the closing delimiter always
/// lines up.
fn delegate_interior(p: &mut Parser<'_, '_, '_>, kind: SyntaxKind, limit: usize) {
    debug_assert!(kind.is_directive());

    p.language().delegate().interior(kind, p, limit);

    if p.token_pos() < limit {
        let m = p.start();
        while p.token_pos() < limit {
            p.bump();
        }
        m.complete(p, SyntaxKind::ERROR);
    }
}
