//! Plain-text input.

use crate::error::{ParserError, ParserResult};

use super::TextExtractor;

/// Splits extracted text into lines.
///
/// Form feeds, which separate pages in extractor output, count as line breaks.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\u{000C}'])
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Reads documents that are already UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn extract_lines(&self, bytes: &[u8]) -> ParserResult<Vec<String>> {
        let text = std::str::from_utf8(bytes).map_err(|e| ParserError::Extraction {
            extractor: self.name().to_string(),
            message: e.to_string(),
        })?;
        Ok(split_lines(text))
    }
}
