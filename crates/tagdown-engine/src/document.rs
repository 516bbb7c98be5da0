//! The editor-facing document view: full text plus a line-indexed position
//! table.
//!
//! The lint pipeline positions validation findings by line/character pairs;
//! this view resolves those to absolute byte offsets. The buffer is an
//! xi-rope, matching how the host editor stores its documents.

use xi_rope::Rope;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Byte span of a single line. `from` is the offset of the line's first
/// byte; `to` is the offset just past its last content byte, *excluding*
/// the line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub from: usize,
    pub to: usize,
}

/// A read-only view of an editor document.
#[derive(Debug)]
pub struct DocumentView {
    buffer: Rope,
    /// Position table: one entry per line, in order.
    lines: Vec<LineSpan>,
}

impl DocumentView {
    /// Create a view over the given text.
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let lines = line_table(text);
        Self { buffer, lines }
    }

    /// Create a view from raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// The full document text.
    pub fn text(&self) -> String {
        self.buffer.slice_to_cow(0..self.buffer.len()).into_owned()
    }

    /// Document length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Number of lines. A trailing newline opens a final empty line, the
    /// way editors count.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The span of the 0-indexed line, or `None` when out of range.
    pub fn line(&self, line: usize) -> Option<LineSpan> {
        self.lines.get(line).copied()
    }
}

/// Build the position table: byte spans of every line, terminator excluded.
fn line_table(text: &str) -> Vec<LineSpan> {
    let mut lines = Vec::new();
    let mut from = 0;

    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            let mut to = i;
            if i > from && text.as_bytes()[i - 1] == b'\r' {
                to -= 1;
            }
            lines.push(LineSpan { from, to });
            from = i + 1;
        }
    }

    // The final line: content after the last newline, or the empty line a
    // trailing newline opens.
    lines.push(LineSpan {
        from,
        to: text.len(),
    });

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_has_one_empty_line() {
        let view = DocumentView::new("");
        assert_eq!(view.line_count(), 1);
        assert_eq!(view.line(0), Some(LineSpan { from: 0, to: 0 }));
        assert!(view.is_empty());
    }

    #[test]
    fn single_line_without_terminator() {
        let view = DocumentView::new("hello");
        assert_eq!(view.line_count(), 1);
        assert_eq!(view.line(0), Some(LineSpan { from: 0, to: 5 }));
    }

    #[test]
    fn line_spans_exclude_terminators() {
        let view = DocumentView::new("ab\ncdef\ng");
        assert_eq!(view.line(0), Some(LineSpan { from: 0, to: 2 }));
        assert_eq!(view.line(1), Some(LineSpan { from: 3, to: 7 }));
        assert_eq!(view.line(2), Some(LineSpan { from: 8, to: 9 }));
        assert_eq!(view.line_count(), 3);
    }

    #[test]
    fn trailing_newline_opens_an_empty_line() {
        let view = DocumentView::new("ab\n");
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.line(1), Some(LineSpan { from: 3, to: 3 }));
    }

    #[test]
    fn crlf_terminators_are_excluded() {
        let view = DocumentView::new("ab\r\ncd");
        assert_eq!(view.line(0), Some(LineSpan { from: 0, to: 2 }));
        assert_eq!(view.line(1), Some(LineSpan { from: 4, to: 6 }));
    }

    #[test]
    fn out_of_range_line_is_none() {
        let view = DocumentView::new("ab");
        assert_eq!(view.line(5), None);
    }

    #[test]
    fn text_round_trips() {
        let input = "# Title\n\nbody\n";
        let view = DocumentView::new(input);
        assert_eq!(view.text(), input);
        assert_eq!(view.len(), input.len());
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        let err = DocumentView::from_bytes(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidUtf8(_)));
    }

    #[test]
    fn from_bytes_accepts_utf8() {
        let view = DocumentView::from_bytes("héllo\n".as_bytes()).unwrap();
        assert_eq!(view.line_count(), 2);
    }
}
