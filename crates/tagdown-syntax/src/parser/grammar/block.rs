//! Block-level grammar rules.
//!
//! Dispatch order at each block position: pluggable rules from the active
//! [`Language`](crate::language::Language) first (the default language
//! registers the directive-tag and table rules there), then the built-in
//! constructs. `IndentedCode` and `SetextHeading` are gated on
//! `Language::enabled` so an extension can remove them by name.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::inline;

/// Parse a block element.
pub(crate) fn block(p: &mut Parser<'_, '_, '_>) {
    // Skip leading blank lines
    while p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }

    if p.at_end() {
        return;
    }

    // Pluggable rules get first shot; a rule that declines has left the
    // parser untouched.
    let lang = p.language();
    for rule in lang.block_rules() {
        if (rule.apply)(p) {
            return;
        }
    }

    match p.current() {
        SyntaxKind::HASH => heading(p),
        SyntaxKind::GT => blockquote(p),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
            if is_thematic_break(p) {
                thematic_break(p);
            } else {
                list_item(p);
            }
        }
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => {
            if is_code_fence(p) {
                fenced_code(p);
            } else {
                paragraph(p);
            }
        }
        SyntaxKind::WHITESPACE
            if lang.enabled("IndentedCode") && is_code_indent(p.current_text()) =>
        {
            indented_code(p);
        }
        _ => paragraph(p),
    }
}

/// Check if current position is a thematic break (---, ***, etc.)
fn is_thematic_break(p: &Parser<'_, '_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::DASH | SyntaxKind::STAR) {
        return false;
    }

    // Need at least 3 markers and nothing else on the line
    let mut count = 0;
    let mut i = 0;

    while p.nth(i) != SyntaxKind::EOF && p.nth(i) != SyntaxKind::NEWLINE {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    count >= 3
}

/// Check if current position starts a code fence (3+ backticks or tildes).
pub(crate) fn is_code_fence(p: &Parser<'_, '_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return false;
    }

    let mut count = 0;
    while p.nth(count) == marker {
        count += 1;
    }

    count >= 3
}

/// True for leading whitespace that opens an indented code block.
fn is_code_indent(text: &str) -> bool {
    text.starts_with("    ") || text.starts_with('\t')
}

/// Parse an ATX heading. `#` runs longer than six, or not followed by
/// whitespace, are not headings.
fn heading(p: &mut Parser<'_, '_, '_>) {
    let mut level = 0;
    while p.nth(level) == SyntaxKind::HASH {
        level += 1;
    }
    let after = p.nth(level);
    let valid = level <= 6
        && matches!(
            after,
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        );
    if !valid {
        return paragraph(p);
    }

    let m = p.start();
    for _ in 0..level {
        p.bump();
    }
    p.eat(SyntaxKind::WHITESPACE);
    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);

    let kind = match level {
        1 => SyntaxKind::HEADING1,
        2 => SyntaxKind::HEADING2,
        3 => SyntaxKind::HEADING3,
        4 => SyntaxKind::HEADING4,
        5 => SyntaxKind::HEADING5,
        _ => SyntaxKind::HEADING6,
    };
    m.complete(p, kind);
}

/// Parse a blockquote.
fn blockquote(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    while p.at(SyntaxKind::GT) {
        p.bump();
        p.eat(SyntaxKind::WHITESPACE);

        inline::inline_until_newline(p);

        if p.eat(SyntaxKind::NEWLINE) {
            while p.at(SyntaxKind::WHITESPACE) {
                p.bump();
            }
            if !p.at(SyntaxKind::GT) {
                break;
            }
        } else {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

/// Parse a list item.
fn list_item(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    // Consume the marker (-, *, +)
    p.bump();

    // A marker without a following space is just paragraph text
    if !p.eat(SyntaxKind::WHITESPACE) {
        m.abandon(p);
        return paragraph(p);
    }

    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// Parse a thematic break.
fn thematic_break(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();
    consume_line(p);
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

/// Parse a fenced code block.
fn fenced_code(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    let fence_marker = p.current();

    let mut fence_len = 0;
    while p.at(fence_marker) {
        p.bump();
        fence_len += 1;
    }

    // Info string (language), then the opening fence's newline
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);

    // Content until a closing fence of at least the opening length
    loop {
        if p.at_end() {
            break;
        }

        if p.at(fence_marker) {
            let mut close_len = 0;
            while p.nth(close_len) == fence_marker {
                close_len += 1;
            }

            if close_len >= fence_len {
                for _ in 0..close_len {
                    p.bump();
                }
                consume_line(p);
                break;
            }
        }

        consume_line(p);
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// Parse an indented code block (only reachable when `IndentedCode` is
/// enabled; the default language removes it).
fn indented_code(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    loop {
        consume_line(p);
        if !(p.at(SyntaxKind::WHITESPACE) && is_code_indent(p.current_text())) {
            break;
        }
    }

    m.complete(p, SyntaxKind::INDENTED_CODE);
}

/// True if the line starting at the current position is a setext underline:
/// a run of `=` or `-`, nothing else but trailing whitespace.
fn at_setext_underline(p: &Parser<'_, '_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::EQUALS | SyntaxKind::DASH) {
        return false;
    }

    let mut i = 0;
    let mut markers = 0;
    while !matches!(p.nth(i), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        match p.nth(i) {
            k if k == marker => markers += 1,
            // Only trailing whitespace is allowed
            SyntaxKind::WHITESPACE
                if matches!(p.nth(i + 1), SyntaxKind::NEWLINE | SyntaxKind::EOF) => {}
            _ => return false,
        }
        i += 1;
    }

    markers >= 1
}

/// Parse a paragraph (default block). When `SetextHeading` is enabled and
/// the following line is an underline, the node becomes a SETEXT_HEADING
/// instead.
fn paragraph(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();
    let mut kind = SyntaxKind::PARAGRAPH;

    'lines: loop {
        inline::inline_until_newline(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }

        // Paragraph break: blank line or end of input
        if p.at_end() || p.at(SyntaxKind::NEWLINE) {
            break;
        }

        // A setext underline claims the paragraph before interrupt checks,
        // because `---` would otherwise read as a thematic break.
        if p.language().enabled("SetextHeading") && at_setext_underline(p) {
            consume_line(p);
            kind = SyntaxKind::SETEXT_HEADING;
            break;
        }

        // Pluggable rules that can interrupt a paragraph (tables, block tags)
        let lang = p.language();
        for rule in lang.block_rules() {
            if (rule.interrupts)(p) {
                break 'lines;
            }
        }

        // Built-in constructs that interrupt paragraphs
        match p.current() {
            SyntaxKind::HASH | SyntaxKind::GT => break,
            SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
                if p.nth(1) == SyntaxKind::WHITESPACE || is_thematic_break(p) {
                    break;
                }
            }
            SyntaxKind::BACKTICK | SyntaxKind::TILDE => {
                if is_code_fence(p) {
                    break;
                }
            }
            _ => {}
        }
    }

    m.complete(p, kind);
}

/// Consume the rest of the current line, including its newline.
pub(crate) fn consume_line(p: &mut Parser<'_, '_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);
}

/// True when the current line contains a `|` cell separator.
fn line_has_pipe(p: &Parser<'_, '_, '_>) -> bool {
    p.find_ahead_on_line(SyntaxKind::PIPE).is_some()
}

/// True when the line *after* the current one is a table delimiter row:
/// only pipes, dashes, colons, and whitespace, with at least one dash and
/// one pipe.
fn next_line_is_delimiter(p: &Parser<'_, '_, '_>) -> bool {
    let nl = p.line_end();
    if p.kind_at(nl) != SyntaxKind::NEWLINE {
        return false;
    }

    let mut i = nl + 1;
    let mut dashes = 0;
    let mut pipes = 0;
    loop {
        match p.kind_at(i) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => break,
            SyntaxKind::DASH => dashes += 1,
            SyntaxKind::PIPE => pipes += 1,
            SyntaxKind::COLON | SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    dashes >= 1 && pipes >= 1
}

/// Pluggable rule: parse a pipe table (header row, delimiter row, body rows).
pub(crate) fn table(p: &mut Parser<'_, '_, '_>) -> bool {
    if !table_interrupts(p) {
        return false;
    }

    let m = p.start();

    // Header row
    table_row(p);

    // Delimiter row
    let dm = p.start();
    consume_line(p);
    dm.complete(p, SyntaxKind::TABLE_DELIMITER);

    // Body rows until a blank line or a line without pipes
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && line_has_pipe(p) {
        table_row(p);
    }

    m.complete(p, SyntaxKind::TABLE);
    true
}

/// Interrupt predicate for [`table`]: a pipe-bearing line followed by a
/// delimiter row.
pub(crate) fn table_interrupts(p: &Parser<'_, '_, '_>) -> bool {
    line_has_pipe(p) && next_line_is_delimiter(p)
}

/// Parse a single table row. Cell content gets full inline parsing, so
/// directive tags and code spans work inside cells.
fn table_row(p: &mut Parser<'_, '_, '_>) {
    let m = p.start();

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if p.at(SyntaxKind::PIPE) {
            p.bump();
        } else {
            inline::inline_element(p);
        }
    }
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::TABLE_ROW);
}

#[cfg(test)]
mod tests {
    use crate::language::Language;
    use crate::syntax_kind::SyntaxKind;
    use crate::SyntaxNode;

    fn parse(source: &str) -> SyntaxNode {
        Language::default_language().parse(source)
    }

    fn parse_base(source: &str) -> SyntaxNode {
        Language::commonmark().parse(source)
    }

    #[rstest::rstest]
    #[case("# One\n", SyntaxKind::HEADING1)]
    #[case("## Two\n", SyntaxKind::HEADING2)]
    #[case("### Three\n", SyntaxKind::HEADING3)]
    #[case("#### Four\n", SyntaxKind::HEADING4)]
    #[case("##### Five\n", SyntaxKind::HEADING5)]
    #[case("###### Six\n", SyntaxKind::HEADING6)]
    fn parse_heading_levels(#[case] input: &str, #[case] expected: SyntaxKind) {
        let tree = parse(input);
        let heading = tree.children().next().unwrap();
        assert_eq!(heading.kind(), expected);
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        let tree = parse("####### nope\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn hash_without_space_is_not_a_heading() {
        let tree = parse("#nope\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn parse_blockquote() {
        let tree = parse("> quoted text\n");
        let bq = tree.children().next().unwrap();
        assert_eq!(bq.kind(), SyntaxKind::BLOCK_QUOTE);
    }

    #[test]
    fn parse_list_item() {
        let tree = parse("- item\n");
        let item = tree.children().next().unwrap();
        assert_eq!(item.kind(), SyntaxKind::LIST_ITEM);
    }

    #[test]
    fn parse_thematic_break() {
        let tree = parse("---\n");
        let hr = tree.children().next().unwrap();
        assert_eq!(hr.kind(), SyntaxKind::THEMATIC_BREAK);
    }

    #[test]
    fn parse_fenced_code() {
        let tree = parse("```rust\ncode\n```\n");
        let code = tree.children().next().unwrap();
        assert_eq!(code.kind(), SyntaxKind::FENCED_CODE);
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let input = "```\ncode\nmore\n";
        let tree = parse(input);
        let code = tree.children().next().unwrap();
        assert_eq!(code.kind(), SyntaxKind::FENCED_CODE);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn indented_code_is_removed_by_default() {
        let tree = parse("    let x = 1;\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn indented_code_in_base_language() {
        let tree = parse_base("    let x = 1;\n    let y = 2;\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::INDENTED_CODE);
    }

    #[test]
    fn setext_heading_is_removed_by_default() {
        let tree = parse("Title\n=====\n");
        let kinds: Vec<_> = tree.children().map(|c| c.kind()).collect();
        // The underline reads as a paragraph continuation line
        assert!(!kinds.contains(&SyntaxKind::SETEXT_HEADING));
    }

    #[test]
    fn setext_heading_in_base_language() {
        let tree = parse_base("Title\n=====\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::SETEXT_HEADING);
    }

    #[test]
    fn setext_dash_underline_in_base_language() {
        let tree = parse_base("Title\n---\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::SETEXT_HEADING);
    }

    #[test]
    fn parse_table() {
        let input = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let tree = parse(input);
        let table = tree.children().next().unwrap();
        assert_eq!(table.kind(), SyntaxKind::TABLE);

        let kinds: Vec<_> = table.children().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TABLE_ROW,
                SyntaxKind::TABLE_DELIMITER,
                SyntaxKind::TABLE_ROW
            ]
        );
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn pipe_line_without_delimiter_is_a_paragraph() {
        let tree = parse("| just | pipes |\n");
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn table_interrupts_paragraph() {
        let tree = parse("text\n| a |\n|---|\n");
        let kinds: Vec<_> = tree.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::PARAGRAPH, SyntaxKind::TABLE]);
    }

    #[test]
    fn parse_multiple_blocks() {
        let input = "# Heading\n\nParagraph text.\n\n- list item\n";
        let tree = parse(input);

        let blocks: Vec<_> = tree.children().collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].kind(), SyntaxKind::HEADING1);
        assert_eq!(blocks[1].kind(), SyntaxKind::PARAGRAPH);
        assert_eq!(blocks[2].kind(), SyntaxKind::LIST_ITEM);
    }

    #[test]
    fn text_preservation() {
        let input = "# Heading\n\n> Quote\n\n- Item\n\n| a |\n|---|\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }
}
