//! The boundary to the format's reference implementation.
//!
//! Parsing, validation, and transformation of the tagged-markup format are
//! owned by an external reference implementation; this crate only consumes
//! them. [`FormatEngine`] is that seam: the lint pipeline and the plain-text
//! projection are written against it, and tests script it.
//!
//! The data model mirrors what the reference implementation produces:
//! [`FormatAst`] from `parse`, [`ValidationError`]s from `validate`, and a
//! [`RenderableNode`] tree from `transform`.

mod renderable;

pub use renderable::{RenderableNode, TagNode};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the reference parser's syntax tree.
///
/// Distinct from the editor-facing CST: this tree is semantic (one node per
/// document construct), carries string-keyed attributes, and positions nodes
/// by 0-indexed source lines rather than byte spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatAst {
    /// Node type tag (`document`, `paragraph`, `tag`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// String-keyed attributes. The root node may carry the raw
    /// `frontmatter` string here.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,

    /// 0-indexed source lines this node covers.
    #[serde(default)]
    pub lines: Vec<u32>,

    /// Exact position, when the reference parser tracked one.
    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub children: Vec<FormatAst>,
}

impl FormatAst {
    /// Convenience constructor for a node with no position info.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            lines: Vec::new(),
            location: None,
            children: Vec::new(),
        }
    }

    /// The raw frontmatter string attached to this node, if any.
    pub fn frontmatter(&self) -> Option<&str> {
        self.attributes.get("frontmatter").and_then(|v| v.as_str())
    }
}

/// A start/end position pair, 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: LinePosition,
    pub end: LinePosition,
}

/// A line with an optional character offset within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePosition {
    pub line: u32,
    #[serde(default)]
    pub character: Option<u32>,
}

/// Severity levels the reference validator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

/// The error payload inside a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub level: ErrorLevel,
    pub id: String,
    pub message: String,
}

/// A finding from validating a [`FormatAst`] against a
/// [`ValidationConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The offending node's type tag.
    #[serde(rename = "type")]
    pub kind: String,

    /// 0-indexed source lines of the offending node.
    #[serde(default)]
    pub lines: Vec<u32>,

    /// Exact position, when available. Takes precedence over `lines`.
    #[serde(default)]
    pub location: Option<Location>,

    pub error: ErrorDetail,
}

/// Template variables exposed to validation.
///
/// Both keys alias the same decoded frontmatter value; `fm` exists for
/// backward-compatible template access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    pub frontmatter: serde_yaml::Value,
    pub fm: serde_yaml::Value,
}

/// Configuration handed to the reference validator and transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub variables: Variables,
}

impl ValidationConfig {
    /// A config binding the given value to both variable names.
    pub fn with_frontmatter(value: serde_yaml::Value) -> Self {
        Self {
            variables: Variables {
                frontmatter: value.clone(),
                fm: value,
            },
        }
    }

    /// The empty config: both variables bound to an empty mapping.
    pub fn empty() -> Self {
        Self::with_frontmatter(serde_yaml::Value::Mapping(Default::default()))
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::empty()
    }
}

/// The format's reference implementation, as consumed by this crate.
///
/// Implementations are expected to be total: `parse` produces a tree for
/// any text (malformed constructs become error-flavored nodes inside it),
/// and `validate` reports problems as values rather than failing.
pub trait FormatEngine {
    /// Parse source text into the reference syntax tree.
    fn parse(&self, text: &str) -> FormatAst;

    /// Validate a tree against a config, in document order.
    fn validate(&self, ast: &FormatAst, config: &ValidationConfig) -> Vec<ValidationError>;

    /// Transform a tree into its renderable form.
    fn transform(&self, ast: &FormatAst, config: &ValidationConfig) -> RenderableNode;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ast_serialization_uses_type_key() {
        let ast = FormatAst::new("document");
        let json = serde_json::to_value(&ast).unwrap();
        assert_eq!(json["type"], "document");
    }

    #[test]
    fn error_level_round_trips_lowercase() {
        let level: ErrorLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(level, ErrorLevel::Critical);
        assert_eq!(serde_json::to_string(&ErrorLevel::Debug).unwrap(), "\"debug\"");
    }

    #[test]
    fn frontmatter_accessor() {
        let mut ast = FormatAst::new("document");
        assert_eq!(ast.frontmatter(), None);

        ast.attributes.insert(
            "frontmatter".to_string(),
            serde_json::Value::String("title: hi".to_string()),
        );
        assert_eq!(ast.frontmatter(), Some("title: hi"));
    }

    #[test]
    fn empty_config_binds_both_aliases() {
        let config = ValidationConfig::empty();
        assert_eq!(config.variables.frontmatter, config.variables.fm);
        assert!(matches!(
            config.variables.frontmatter,
            serde_yaml::Value::Mapping(_)
        ));
    }

    #[test]
    fn validation_error_deserializes_from_engine_json() {
        let raw = r#"{
            "type": "tag",
            "lines": [3, 4],
            "error": {"level": "error", "id": "missing-attribute", "message": "missing required attribute"}
        }"#;
        let err: ValidationError = serde_json::from_str(raw).unwrap();
        assert_eq!(err.kind, "tag");
        assert_eq!(err.lines, vec![3, 4]);
        assert_eq!(err.location, None);
        assert_eq!(err.error.level, ErrorLevel::Error);
    }
}
