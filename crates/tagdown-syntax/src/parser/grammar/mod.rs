//! Grammar rules driving the event parser.
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect the
//! current token, consume tokens, and build tree structure through markers.
//!
//! Grammar functions are lenient: they produce a tree for any input, wrapping
//! unexpected tokens into the surrounding node (or an `ERROR` node) rather
//! than failing. The goal is a valid tree that preserves all input bytes.
//!
//! ## Module Structure
//!
//! - [`block`] - Block-level elements (headings, quotes, lists, code, tables)
//! - [`inline`] - Inline elements (code spans, emphasis, links)
//! - [`tag`] - Directive tags (`{% ... %}`) and the mixed-parse dispatch

pub(crate) mod block;
pub(crate) mod inline;
pub(crate) mod tag;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document: a ROOT node containing all top-level blocks.
pub(crate) fn root(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}
