//! PDF text extractors.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{ParserError, ParserResult};

use super::{TextExtractor, split_lines};

/// Extracts text in-process with the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractExtractor;

impl TextExtractor for PdfExtractExtractor {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_lines(&self, bytes: &[u8]) -> ParserResult<Vec<String>> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ParserError::Extraction {
                extractor: self.name().to_string(),
                message: e.to_string(),
            }
        })?;
        let lines = split_lines(&text);
        debug!(extractor = self.name(), lines = lines.len(), "extracted PDF text");
        Ok(lines)
    }
}

/// Extracts text by running poppler's `pdftotext -layout`.
///
/// The document is written to a scratch file for the duration of the call.
/// The file is removed when the call returns or unwinds.
#[derive(Debug, Clone)]
pub struct PdftotextExtractor {
    program: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl PdftotextExtractor {
    /// Uses `program` instead of looking up `pdftotext` on `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scratch_dir: None,
        }
    }

    /// Creates scratch files in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn scratch_file(&self, bytes: &[u8]) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("shift-report-").suffix(".pdf");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    }

    fn error(&self, message: impl Into<String>) -> ParserError {
        ParserError::Extraction {
            extractor: self.name().to_string(),
            message: message.into(),
        }
    }
}

impl TextExtractor for PdftotextExtractor {
    fn name(&self) -> &'static str {
        "pdftotext"
    }

    fn extract_lines(&self, bytes: &[u8]) -> ParserResult<Vec<String>> {
        let scratch = self
            .scratch_file(bytes)
            .map_err(|e| self.error(format!("failed to write scratch file: {}", e)))?;

        let output = Command::new(&self.program)
            .arg("-layout")
            .arg("-q")
            .arg(scratch.path())
            .arg("-")
            .output();
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(path = %scratch_path.display(), error = %e, "failed to remove scratch file");
        }

        let output = output.map_err(|e| {
            self.error(format!("failed to run {}: {}", self.program.display(), e))
        })?;
        if !output.status.success() {
            return Err(self.error(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let lines = split_lines(&String::from_utf8_lossy(&output.stdout));
        debug!(extractor = self.name(), lines = lines.len(), "extracted PDF text");
        Ok(lines)
    }
}
