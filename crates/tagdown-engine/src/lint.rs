//! The lint pipeline: reference-validator findings projected onto
//! editor-facing diagnostics.
//!
//! Each run recomputes everything from the current document text: parse,
//! derive the validation config from frontmatter, validate, then map every
//! positionable finding to absolute byte offsets. There is no caching and
//! no shared state; a call is a pure function of the view's text.
//!
//! Findings are dropped in exactly two cases: nothing to position them with
//! (no `location`, no `lines` - a wrong position is worse than none), and
//! `debug`-level findings, which are never user-visible.

use serde::{Deserialize, Serialize};

use crate::document::DocumentView;
use crate::format::{ErrorLevel, FormatAst, FormatEngine, ValidationConfig, ValidationError};

/// Editor-facing severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A validation finding positioned in the document, ready for the host
/// editor's lint surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Absolute byte offset where the finding starts.
    pub from: usize,
    /// Absolute byte offset where the finding ends.
    pub to: usize,
    pub severity: Severity,
    pub message: String,
    /// `"<node type>: <error id>"`, for grouping in the editor UI.
    pub source: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("frontmatter is not valid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Decode a raw frontmatter string into template variables.
///
/// Kept as an explicit `Result` so the fallback below is a visible policy
/// branch, not swallowed control flow.
pub fn decode_frontmatter(raw: &str) -> Result<serde_yaml::Value, FrontmatterError> {
    let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
    Ok(value)
}

/// Derive the validation config from a parsed document.
///
/// The root `frontmatter` attribute, when present, is YAML-decoded and
/// bound to both the `frontmatter` and `fm` variables. Absent or
/// undecodable frontmatter yields the empty config - a malformed metadata
/// block never blocks linting.
pub fn validation_config(ast: &FormatAst) -> ValidationConfig {
    let Some(raw) = ast.frontmatter() else {
        return ValidationConfig::empty();
    };

    match decode_frontmatter(raw) {
        // YAML decodes an empty document to null; treat that as empty too
        Ok(serde_yaml::Value::Null) => ValidationConfig::empty(),
        Ok(value) => ValidationConfig::with_frontmatter(value),
        Err(_) => ValidationConfig::empty(),
    }
}

/// Lint the document: parse, validate, and project every finding onto byte
/// offsets. Output preserves the validator's order.
pub fn lint<E: FormatEngine>(view: &DocumentView, engine: &E) -> Vec<Diagnostic> {
    let text = view.text();
    let ast = engine.parse(&text);
    let config = validation_config(&ast);
    let errors = engine.validate(&ast, &config);

    errors
        .into_iter()
        .filter_map(|error| project(view, error))
        .collect()
}

/// Map one validation error onto a diagnostic, or drop it.
fn project(view: &DocumentView, error: ValidationError) -> Option<Diagnostic> {
    // Unpositionable findings are never surfaced
    if error.location.is_none() && error.lines.is_empty() {
        return None;
    }
    // Debug-level findings are never user-visible
    if error.error.level == ErrorLevel::Debug {
        return None;
    }

    let location = error.location.as_ref();

    let start_line = location
        .map(|l| l.start.line)
        .or_else(|| error.lines.first().copied())?;
    let end_line = location
        .map(|l| l.end.line)
        .or_else(|| error.lines.last().copied())?;

    let start = view.line(start_line as usize)?;
    let end = view.line(end_line as usize)?;

    let from = match location.and_then(|l| l.start.character) {
        Some(character) => start.from + character as usize,
        None => start.from,
    };
    // The end character is added to the end line's `to` offset, not its
    // `from`. Reproduced from the reference behavior; see DESIGN.md.
    let to = match location.and_then(|l| l.end.character) {
        Some(character) => end.to + character as usize,
        None => end.to,
    };

    let severity = match error.error.level {
        ErrorLevel::Critical | ErrorLevel::Error => Severity::Error,
        ErrorLevel::Info => Severity::Info,
        _ => Severity::Warning,
    };

    Some(Diagnostic {
        from,
        to,
        severity,
        message: error.error.message,
        source: format!("{}: {}", error.kind, error.error.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ErrorDetail, LinePosition, Location, RenderableNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::RefCell;

    /// A scripted stand-in for the reference implementation.
    struct StubEngine {
        ast: FormatAst,
        errors: Vec<ValidationError>,
        seen_config: RefCell<Option<ValidationConfig>>,
    }

    impl StubEngine {
        fn new(ast: FormatAst, errors: Vec<ValidationError>) -> Self {
            Self {
                ast,
                errors,
                seen_config: RefCell::new(None),
            }
        }

        fn with_errors(errors: Vec<ValidationError>) -> Self {
            Self::new(FormatAst::new("document"), errors)
        }
    }

    impl FormatEngine for StubEngine {
        fn parse(&self, _text: &str) -> FormatAst {
            self.ast.clone()
        }

        fn validate(&self, _ast: &FormatAst, config: &ValidationConfig) -> Vec<ValidationError> {
            *self.seen_config.borrow_mut() = Some(config.clone());
            self.errors.clone()
        }

        fn transform(&self, _ast: &FormatAst, _config: &ValidationConfig) -> RenderableNode {
            RenderableNode::Null
        }
    }

    fn error_at_lines(lines: Vec<u32>, level: ErrorLevel) -> ValidationError {
        ValidationError {
            kind: "tag".to_string(),
            lines,
            location: None,
            error: ErrorDetail {
                level,
                id: "attribute-undefined".to_string(),
                message: "undefined attribute".to_string(),
            },
        }
    }

    fn located(start: (u32, Option<u32>), end: (u32, Option<u32>)) -> ValidationError {
        ValidationError {
            kind: "tag".to_string(),
            lines: Vec::new(),
            location: Some(Location {
                start: LinePosition {
                    line: start.0,
                    character: start.1,
                },
                end: LinePosition {
                    line: end.0,
                    character: end.1,
                },
            }),
            error: ErrorDetail {
                level: ErrorLevel::Error,
                id: "tag-unclosed".to_string(),
                message: "unclosed tag".to_string(),
            },
        }
    }

    #[test]
    fn unlocatable_errors_are_dropped() {
        let view = DocumentView::new("line one\n");
        let engine = StubEngine::with_errors(vec![error_at_lines(vec![], ErrorLevel::Error)]);
        assert_eq!(lint(&view, &engine), vec![]);
    }

    #[test]
    fn debug_errors_are_dropped_even_when_located() {
        let view = DocumentView::new("line one\n");
        let engine = StubEngine::with_errors(vec![
            error_at_lines(vec![0], ErrorLevel::Debug),
            located((0, Some(0)), (0, Some(0))),
        ]);
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].source, "tag: tag-unclosed");
    }

    #[test]
    fn lines_position_spans_whole_lines() {
        // lines:  0 -> [0,4)  1 -> [5,9)
        let view = DocumentView::new("abcd\nefgh\n");
        let engine = StubEngine::with_errors(vec![error_at_lines(vec![0, 1], ErrorLevel::Error)]);
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics[0].from, 0);
        assert_eq!(diagnostics[0].to, 9);
    }

    #[test]
    fn location_characters_offset_the_start_from_line_start() {
        let view = DocumentView::new("abcd\nefgh\n");
        let engine = StubEngine::with_errors(vec![located((0, Some(2)), (0, None))]);
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics[0].from, 2);
        assert_eq!(diagnostics[0].to, 4);
    }

    /// Pins the end-offset arithmetic for a multi-line span: the end
    /// character is measured from the end line's *end* offset. With line 1
    /// spanning [5,9), an end character of 2 lands at 11 - not 7.
    #[test]
    fn end_offset_is_measured_from_line_end() {
        let view = DocumentView::new("abcd\nefgh\nij\n");
        let engine = StubEngine::with_errors(vec![located((0, Some(2)), (1, Some(2)))]);
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics[0].from, 2);
        assert_eq!(diagnostics[0].to, 11);
    }

    #[rstest]
    #[case(ErrorLevel::Critical, Severity::Error)]
    #[case(ErrorLevel::Error, Severity::Error)]
    #[case(ErrorLevel::Warning, Severity::Warning)]
    #[case(ErrorLevel::Info, Severity::Info)]
    fn severity_mapping(#[case] level: ErrorLevel, #[case] expected: Severity) {
        let view = DocumentView::new("line one\n");
        let engine = StubEngine::with_errors(vec![error_at_lines(vec![0], level)]);
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics[0].severity, expected);
    }

    #[test]
    fn validator_order_is_preserved() {
        let view = DocumentView::new("abcd\nefgh\n");
        let mut second = error_at_lines(vec![0], ErrorLevel::Warning);
        second.error.id = "second".to_string();
        let engine = StubEngine::with_errors(vec![
            error_at_lines(vec![1], ErrorLevel::Error),
            second,
        ]);
        let diagnostics = lint(&view, &engine);
        // Not re-sorted by position: the later-line error stays first
        assert_eq!(diagnostics[0].from, 5);
        assert_eq!(diagnostics[1].source, "tag: second");
    }

    #[test]
    fn out_of_range_lines_are_dropped() {
        let view = DocumentView::new("only\n");
        let engine = StubEngine::with_errors(vec![error_at_lines(vec![7], ErrorLevel::Error)]);
        assert_eq!(lint(&view, &engine), vec![]);
    }

    #[test]
    fn frontmatter_binds_both_variables() {
        let mut ast = FormatAst::new("document");
        ast.attributes.insert(
            "frontmatter".to_string(),
            serde_json::Value::String("title: Hello".to_string()),
        );
        let engine = StubEngine::new(ast, vec![]);
        let view = DocumentView::new("---\ntitle: Hello\n---\n");

        lint(&view, &engine);

        let config = engine.seen_config.borrow().clone().unwrap();
        assert_eq!(config.variables.frontmatter, config.variables.fm);
        let title = config.variables.frontmatter.get("title").unwrap();
        assert_eq!(title.as_str(), Some("Hello"));
    }

    #[test]
    fn malformed_frontmatter_falls_back_to_empty_config() {
        let mut ast = FormatAst::new("document");
        ast.attributes.insert(
            "frontmatter".to_string(),
            serde_json::Value::String("title: [unclosed".to_string()),
        );
        let engine = StubEngine::new(ast, vec![]);
        let view = DocumentView::new("---\ntitle: [unclosed\n---\n");

        // Completes without failing...
        let diagnostics = lint(&view, &engine);
        assert_eq!(diagnostics, vec![]);

        // ...and both variables are the empty mapping
        let config = engine.seen_config.borrow().clone().unwrap();
        assert_eq!(config, ValidationConfig::empty());
    }

    #[test]
    fn decode_frontmatter_surfaces_yaml_errors() {
        assert!(decode_frontmatter("title: Hello").is_ok());
        assert!(decode_frontmatter("title: [unclosed").is_err());
    }

    #[test]
    fn empty_frontmatter_decodes_to_empty_config() {
        let mut ast = FormatAst::new("document");
        ast.attributes.insert(
            "frontmatter".to_string(),
            serde_json::Value::String(String::new()),
        );
        assert_eq!(validation_config(&ast), ValidationConfig::empty());
    }
}
