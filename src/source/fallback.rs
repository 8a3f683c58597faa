//! Primary/fallback extractor composition.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::error::{ParserError, ParserResult};

use super::TextExtractor;

/// Tries `primary`, then `fallback` if the primary fails.
///
/// A panic inside the primary counts as a failure. When both fail the
/// fallback's error is returned.
#[derive(Debug, Clone)]
pub struct FallbackExtractor<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackExtractor<P, F> {
    /// Composes two extractors.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: TextExtractor, F: TextExtractor> TextExtractor for FallbackExtractor<P, F> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn extract_lines(&self, bytes: &[u8]) -> ParserResult<Vec<String>> {
        let primary = panic::catch_unwind(AssertUnwindSafe(|| self.primary.extract_lines(bytes)))
            .unwrap_or_else(|payload| {
                Err(ParserError::Extraction {
                    extractor: self.primary.name().to_string(),
                    message: format!("panicked: {}", panic_message(payload.as_ref())),
                })
            });

        match primary {
            Ok(lines) => Ok(lines),
            Err(e) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "primary text extraction failed, retrying with fallback"
                );
                self.fallback.extract_lines(bytes)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
