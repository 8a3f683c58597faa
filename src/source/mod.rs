//! Text-extraction collaborators.
//!
//! The pipeline consumes ordered text lines and does not care where they
//! came from. A [`TextExtractor`] turns an uploaded document into those
//! lines. PDFs go through `pdf-extract` first and fall back to the poppler
//! `pdftotext` utility via [`FallbackExtractor`].

mod fallback;
mod pdf;
mod text;

pub use fallback::FallbackExtractor;
pub use pdf::{PdfExtractExtractor, PdftotextExtractor};
pub use text::{PlainTextExtractor, split_lines};

use crate::error::ParserResult;

/// Produces the ordered text lines of a document.
pub trait TextExtractor {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Extracts every line of the document, pages concatenated in order.
    fn extract_lines(&self, bytes: &[u8]) -> ParserResult<Vec<String>>;
}

/// The default PDF extractor: `pdf-extract`, falling back to `pdftotext`.
pub fn default_pdf_extractor() -> FallbackExtractor<PdfExtractExtractor, PdftotextExtractor> {
    FallbackExtractor::new(PdfExtractExtractor, PdftotextExtractor::default())
}
