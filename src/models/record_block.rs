//! Record block model.

use serde::Serialize;

/// The normalized lines belonging to one employee/date unit.
///
/// Blocks are only opened by the record grouper, and only on a boundary
/// line, so every block has at least one line and its first line is the
/// employee+date header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordBlock {
    lines: Vec<String>,
}

impl RecordBlock {
    pub(crate) fn open(header: String) -> Self {
        Self {
            lines: vec![header],
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// The employee+date header line.
    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// All lines in input order, header first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, header included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
