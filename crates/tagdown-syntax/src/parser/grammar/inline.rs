//! Inline-level grammar rules.
//!
//! Inline parsing is driven by special characters rather than line-start
//! patterns. At each position the pluggable inline rules from the active
//! language are tried first (the default language registers the inline
//! directive-tag rule there), then the built-in dispatch.
//!
//! Inline constructs never cross a line boundary, and all of them degrade
//! gracefully: an unclosed delimiter is consumed as plain content or wrapped
//! in a generic `INLINE` node, never reported as a failure.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline content until newline or EOF.
///
/// This is the main entry point called by block parsers.
pub(crate) fn inline_until_newline(p: &mut Parser<'_, '_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        inline_element(p);
    }
}

/// Parse a single inline element.
pub(crate) fn inline_element(p: &mut Parser<'_, '_, '_>) {
    let lang = p.language();
    for rule in lang.inline_rules() {
        if (rule.apply)(p) {
            return;
        }
    }

    match p.current() {
        SyntaxKind::BACKTICK => code_span(p),
        SyntaxKind::STAR => emphasis_or_strong(p, SyntaxKind::STAR),
        SyntaxKind::UNDERSCORE => emphasis_or_strong(p, SyntaxKind::UNDERSCORE),
        SyntaxKind::LBRACKET => link_or_text(p),
        SyntaxKind::EXCLAIM => {
            if p.nth(1) == SyntaxKind::LBRACKET {
                image(p);
            } else {
                p.bump();
            }
        }
        SyntaxKind::LT => autolink(p),
        _ => {
            // Plain content - just consume the token
            p.bump();
        }
    }
}

/// Parse a code span `` `code` ``. The span is a raw zone: no other inline
/// construct is recognized between the backticks.
fn code_span(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    let mut open_count = 0;
    while p.at(SyntaxKind::BACKTICK) {
        p.bump();
        open_count += 1;
    }

    loop {
        if p.at_end() || p.at(SyntaxKind::NEWLINE) {
            break;
        }

        if p.at(SyntaxKind::BACKTICK) {
            let mut close_count = 0;
            while p.nth(close_count) == SyntaxKind::BACKTICK {
                close_count += 1;
            }

            if close_count == open_count {
                for _ in 0..close_count {
                    p.bump();
                }
                break;
            }
            // Wrong-length backtick run: consume it as content
            for _ in 0..close_count {
                p.bump();
            }
        } else {
            p.bump();
        }
    }

    m.complete(p, SyntaxKind::CODE_SPAN);
}

/// Parse emphasis `*text*` / `_text_` or strong `**text**` / `__text__`.
fn emphasis_or_strong(p: &mut Parser<'_, '_, '_>, delimiter: SyntaxKind) {
    let m = p.start();

    let mut open_count = 0;
    while p.at(delimiter) && open_count < 2 {
        p.bump();
        open_count += 1;
    }

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if p.at(delimiter) {
            let mut close_count = 0;
            while p.nth(close_count) == delimiter && close_count < open_count {
                close_count += 1;
            }

            if close_count >= open_count {
                for _ in 0..open_count {
                    p.bump();
                }
                break;
            }
            p.bump();
        } else {
            p.bump();
        }
    }

    let kind = if open_count >= 2 {
        SyntaxKind::STRONG
    } else {
        SyntaxKind::EMPHASIS
    };

    m.complete(p, kind);
}

/// Parse a standard link `[text](url)`, degrading to a generic INLINE node
/// when brackets or parens don't close.
fn link_or_text(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    p.bump(); // [

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RBRACKET) {
        // Nested inline formatting is allowed in link text
        match p.current() {
            SyntaxKind::BACKTICK => code_span(p),
            SyntaxKind::STAR => emphasis_or_strong(p, SyntaxKind::STAR),
            SyntaxKind::UNDERSCORE => emphasis_or_strong(p, SyntaxKind::UNDERSCORE),
            _ => p.bump(),
        }
    }

    if !p.eat(SyntaxKind::RBRACKET) {
        m.complete(p, SyntaxKind::INLINE);
        return;
    }

    if p.at(SyntaxKind::LPAREN) {
        p.bump(); // (

        while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RPAREN) {
            p.bump();
        }

        if p.eat(SyntaxKind::RPAREN) {
            m.complete(p, SyntaxKind::LINK);
        } else {
            m.complete(p, SyntaxKind::INLINE);
        }
    } else {
        // Just [text] without (url)
        m.complete(p, SyntaxKind::INLINE);
    }
}

/// Parse an image `![alt](url)`.
fn image(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    p.bump(); // !
    p.bump(); // [

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RBRACKET) {
        p.bump();
    }

    if !p.eat(SyntaxKind::RBRACKET) {
        m.complete(p, SyntaxKind::INLINE);
        return;
    }

    if p.at(SyntaxKind::LPAREN) {
        p.bump(); // (

        while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RPAREN) {
            p.bump();
        }

        if p.eat(SyntaxKind::RPAREN) {
            m.complete(p, SyntaxKind::IMAGE);
        } else {
            m.complete(p, SyntaxKind::INLINE);
        }
    } else {
        m.complete(p, SyntaxKind::INLINE);
    }
}

/// Parse an autolink `<url>`.
fn autolink(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    p.bump(); // <

    let mut found_close = false;
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if p.at(SyntaxKind::GT) {
            p.bump();
            found_close = true;
            break;
        }
        p.bump();
    }

    if found_close {
        m.complete(p, SyntaxKind::AUTOLINK);
    } else {
        // Unclosed < - plain content
        m.complete(p, SyntaxKind::INLINE);
    }
}

#[cfg(test)]
mod tests {
    use crate::language::Language;
    use crate::syntax_kind::SyntaxKind;
    use crate::SyntaxNode;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> SyntaxNode {
        Language::default_language().parse(source)
    }

    fn find_node(tree: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
        tree.descendants().find(|n| n.kind() == kind)
    }

    #[test]
    fn parse_code_span() {
        let tree = parse("Use `code` here.\n");
        let code = find_node(&tree, SyntaxKind::CODE_SPAN).unwrap();
        assert_eq!(code.text().to_string(), "`code`");
    }

    #[test]
    fn parse_double_backtick_code_span() {
        let tree = parse("Use ``code with ` backtick`` here.\n");
        let code = find_node(&tree, SyntaxKind::CODE_SPAN).unwrap();
        assert!(code.text().to_string().contains("backtick"));
    }

    #[test]
    fn parse_emphasis_star_and_underscore() {
        let tree = parse("Both *star* and _underscore_ work.\n");
        let ems: Vec<_> = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::EMPHASIS)
            .collect();
        assert_eq!(ems.len(), 2);
    }

    #[test]
    fn parse_strong() {
        let tree = parse("This is **strong** text.\n");
        let strong = find_node(&tree, SyntaxKind::STRONG).unwrap();
        assert_eq!(strong.text().to_string(), "**strong**");
    }

    #[test]
    fn parse_standard_link() {
        let tree = parse("Click [here](https://example.com).\n");
        let link = find_node(&tree, SyntaxKind::LINK).unwrap();
        let text = link.text().to_string();
        assert!(text.contains("here"));
        assert!(text.contains("example.com"));
    }

    #[test]
    fn bracket_without_url_degrades() {
        let tree = parse("Just [brackets] here.\n");
        assert!(find_node(&tree, SyntaxKind::LINK).is_none());
        assert!(find_node(&tree, SyntaxKind::INLINE).is_some());
    }

    #[test]
    fn parse_image() {
        let tree = parse("See ![alt text](image.png) here.\n");
        let img = find_node(&tree, SyntaxKind::IMAGE).unwrap();
        assert!(img.text().to_string().contains("image.png"));
    }

    #[test]
    fn parse_autolink() {
        let tree = parse("Visit <https://example.com> for info.\n");
        let autolink = find_node(&tree, SyntaxKind::AUTOLINK).unwrap();
        assert!(autolink.text().to_string().contains("example.com"));
    }

    #[test]
    fn lt_without_gt_is_not_an_autolink() {
        let input = "Less than 5 < 10 works.\n";
        let tree = parse(input);
        assert!(find_node(&tree, SyntaxKind::AUTOLINK).is_none());
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn inline_preserves_text() {
        let input = "Text with [link](url) and `code` and *em* and ![img](u).\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn unclosed_emphasis_preserves_text() {
        let input = "Some *half done emphasis\nand `unclosed code\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }
}
