//! Plain-text projection of renderable trees.
//!
//! Flattens a [`RenderableNode`] tree into one normalized string for the
//! full-text indexer: scalars stringify, tags contribute only their
//! descendant text, and whitespace runs collapse to single spaces. The one
//! subtlety is adjacency: two neighboring tag-rendered pieces get a single
//! separating space so directive output doesn't fuse into one word, while
//! plain string neighbors concatenate untouched.

use std::sync::OnceLock;

use regex::Regex;

use crate::format::RenderableNode;

/// Matcher for whitespace runs, compiled once.
fn whitespace_runs() -> &'static Regex {
    static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUNS.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// Collapse every whitespace run to a single space.
fn normalize(text: &str) -> String {
    whitespace_runs().replace_all(text, " ").into_owned()
}

/// Numbers render the way the source language prints them: integral values
/// without a fractional suffix.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Render a tree to normalized plain text.
///
/// Total and structurally recursive: every input yields a string, possibly
/// empty. Null, booleans, and tag names/attributes contribute nothing.
pub fn render_plain_text(node: &RenderableNode) -> String {
    match node {
        RenderableNode::String(s) => normalize(s),
        RenderableNode::Number(n) => normalize(&format_number(*n)),
        RenderableNode::Fragment(items) => render_fragment(items),
        RenderableNode::Tag(tag) => render_fragment(&tag.children),
        RenderableNode::Null | RenderableNode::Bool(_) => String::new(),
    }
}

/// Fold a fragment left-to-right, separating *adjacent* tag-rendered
/// elements with one space, then normalize the joined result.
fn render_fragment(items: &[RenderableNode]) -> String {
    let mut out = String::new();
    let mut prev_was_tag = false;

    for item in items {
        let rendered = render_plain_text(item);
        let is_tag = matches!(item, RenderableNode::Tag(_));
        if prev_was_tag && is_tag {
            out.push(' ');
        }
        out.push_str(&rendered);
        prev_was_tag = is_tag;
    }

    normalize(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TagNode;
    use pretty_assertions::assert_eq;

    fn tag(children: Vec<RenderableNode>) -> RenderableNode {
        RenderableNode::Tag(TagNode::new("tag", children))
    }

    #[test]
    fn scalars_stringify() {
        assert_eq!(render_plain_text(&"hello".into()), "hello");
        assert_eq!(render_plain_text(&RenderableNode::Number(40.0)), "40");
        assert_eq!(render_plain_text(&RenderableNode::Number(3.5)), "3.5");
    }

    #[test]
    fn null_and_bool_render_empty() {
        assert_eq!(render_plain_text(&RenderableNode::Null), "");
        assert_eq!(render_plain_text(&RenderableNode::Bool(true)), "");
        assert_eq!(render_plain_text(&RenderableNode::Bool(false)), "");
    }

    #[test]
    fn leaf_whitespace_collapses() {
        assert_eq!(
            render_plain_text(&"a\n\n  b\tc".into()),
            "a b c"
        );
    }

    #[test]
    fn adjacent_tags_get_one_separating_space() {
        let node = RenderableNode::Fragment(vec![
            tag(vec!["x".into()]),
            tag(vec!["y".into()]),
        ]);
        assert_eq!(render_plain_text(&node), "x y");
    }

    #[test]
    fn adjacent_strings_concatenate_without_separator() {
        let node = RenderableNode::Fragment(vec!["a".into(), "b".into()]);
        assert_eq!(render_plain_text(&node), "ab");
    }

    #[test]
    fn explicit_space_leaf_is_not_doubled() {
        let node = RenderableNode::Fragment(vec![
            tag(vec!["x".into()]),
            " ".into(),
            tag(vec!["y".into()]),
        ]);
        assert_eq!(render_plain_text(&node), "x y");
    }

    #[test]
    fn tag_contributes_children_only() {
        let node = RenderableNode::Tag(TagNode {
            name: "callout".to_string(),
            attributes: [(
                "kind".to_string(),
                serde_json::Value::String("warning".to_string()),
            )]
            .into_iter()
            .collect(),
            children: vec!["body text".into()],
        });
        assert_eq!(render_plain_text(&node), "body text");
    }

    #[test]
    fn childless_tag_renders_empty() {
        let node = tag(vec![]);
        assert_eq!(render_plain_text(&node), "");
    }

    #[test]
    fn nested_fragments_stay_normalized() {
        let node = RenderableNode::Fragment(vec![
            RenderableNode::Fragment(vec!["one  ".into(), " two".into()]),
            RenderableNode::Fragment(vec![tag(vec!["three ".into()]), tag(vec![" four".into()])]),
        ]);
        assert_eq!(render_plain_text(&node), "one twothree four");
    }

    #[test]
    fn projection_is_idempotent() {
        let trees = [
            RenderableNode::Fragment(vec![
                "What is X? ".into(),
                tag(vec!["a   b".into()]),
                tag(vec!["c".into()]),
                RenderableNode::Null,
            ]),
            tag(vec![" spaced \n out ".into()]),
            "  already \t messy  ".into(),
        ];

        for tree in trees {
            let once = render_plain_text(&tree);
            let twice = render_plain_text(&RenderableNode::String(once.clone()));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn doc_body_projection_end_to_end() {
        let node = RenderableNode::Fragment(vec![
            "What is X? ".into(),
            tag(vec!["Markdoc is open-source".into()]),
            " ".into(),
            tag(vec!["see source".into()]),
        ]);
        insta::assert_snapshot!(
            render_plain_text(&node),
            @"What is X? Markdoc is open-source see source"
        );
    }

    #[test]
    fn qa_answer_projection() {
        let node = RenderableNode::Fragment(vec![
            tag(vec![
                "Answer:".into(),
                tag(vec![RenderableNode::Number(42.0)]),
            ]),
            RenderableNode::Bool(false),
            " (verified)".into(),
        ]);
        insta::assert_snapshot!(render_plain_text(&node), @"Answer:42 (verified)");
    }
}
