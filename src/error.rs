//! Error types for the shift report parser.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Per-line and per-punch problems never reach this type: they are recovered
//! locally (the field or punch is left out). Errors here describe a whole
//! block, a configuration file, an extraction attempt or a storage write.

use thiserror::Error;

/// The main error type for the shift report parser.
///
/// # Example
///
/// ```
/// use shift_report_parser::error::ParserError;
///
/// let error = ParserError::MalformedHeader {
///     line: "Smith John".to_string(),
/// };
/// assert_eq!(error.to_string(), "Malformed record header: 'Smith John'");
/// ```
#[derive(Debug, Error)]
pub enum ParserError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the parser cannot work with.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The first line of a record block does not parse as `Last, First M/D/YYYY`.
    #[error("Malformed record header: '{line}'")]
    MalformedHeader {
        /// The header line as it appeared in the block.
        line: String,
    },

    /// A text extractor could not turn the source document into lines.
    #[error("Text extraction with '{extractor}' failed: {message}")]
    Extraction {
        /// Name of the extractor that failed.
        extractor: String,
        /// A description of the failure.
        message: String,
    },

    /// A diagnostic snapshot could not be written.
    #[error("Failed to write snapshot '{path}': {message}")]
    Snapshot {
        /// Where the snapshot was going.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The persistence collaborator rejected a record.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return ParserError.
pub type ParserResult<T> = Result<T, ParserError>;
