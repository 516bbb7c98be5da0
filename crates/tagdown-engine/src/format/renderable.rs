//! The renderable tree: the reference transformer's output.
//!
//! A recursive, heterogeneous union - scalars, tag nodes, and fragments -
//! modeled as a closed sum so consumers fold over it structurally instead
//! of inspecting runtime types. Trees are immutable, single-use inputs to
//! rendering; this crate's consumer is the plain-text projection in
//! [`crate::render`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the renderable tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderableNode {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Tag(TagNode),
    Fragment(Vec<RenderableNode>),
}

/// A rendered directive tag: name, attributes, and child content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagNode {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub children: Vec<RenderableNode>,
}

impl TagNode {
    /// A tag with the given name and children and no attributes.
    pub fn new(name: impl Into<String>, children: Vec<RenderableNode>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children,
        }
    }
}

impl From<&str> for RenderableNode {
    fn from(s: &str) -> Self {
        RenderableNode::String(s.to_string())
    }
}

impl From<TagNode> for RenderableNode {
    fn from(tag: TagNode) -> Self {
        RenderableNode::Tag(tag)
    }
}

impl From<Vec<RenderableNode>> for RenderableNode {
    fn from(items: Vec<RenderableNode>) -> Self {
        RenderableNode::Fragment(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_scalars_and_null() {
        let node: RenderableNode = serde_json::from_str("null").unwrap();
        assert_eq!(node, RenderableNode::Null);

        let node: RenderableNode = serde_json::from_str("true").unwrap();
        assert_eq!(node, RenderableNode::Bool(true));

        let node: RenderableNode = serde_json::from_str("3.5").unwrap();
        assert_eq!(node, RenderableNode::Number(3.5));

        let node: RenderableNode = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(node, RenderableNode::String("text".to_string()));
    }

    #[test]
    fn deserializes_a_transform_payload() {
        let raw = r#"["intro ", {"name": "badge", "attributes": {}, "children": ["new"]}]"#;
        let node: RenderableNode = serde_json::from_str(raw).unwrap();

        let RenderableNode::Fragment(items) = node else {
            panic!("expected fragment");
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], RenderableNode::Tag(_)));
    }

    #[test]
    fn tag_children_default_to_empty() {
        let raw = r#"{"name": "hr"}"#;
        let tag: TagNode = serde_json::from_str(raw).unwrap();
        assert!(tag.children.is_empty());
        assert!(tag.attributes.is_empty());
    }
}
