//! HTML tag completion candidates.
//!
//! The format allows raw HTML islands, so the language offers tag-name
//! completion after `<`. The host editor decides when to ask; this module
//! only supplies and filters the candidates.

/// Common HTML tag names offered for completion.
pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "blockquote", "br", "button",
    "caption", "cite", "code", "col", "colgroup", "dd", "details", "dfn", "div", "dl", "dt", "em",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "i", "iframe", "img", "input", "kbd", "label", "li", "main", "mark", "nav", "ol", "p", "pre",
    "q", "s", "samp", "section", "small", "span", "strong", "sub", "summary", "sup", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul", "var", "video",
];

/// Filter a candidate list down to tags matching a (case-insensitive)
/// prefix. An empty prefix returns everything.
pub fn filter_tags(tags: &'static [&'static str], prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_ascii_lowercase();
    tags.iter()
        .copied()
        .filter(|tag| tag.starts_with(&prefix))
        .collect()
}
