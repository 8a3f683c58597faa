//! Response types for the shift report API.
//!
//! This module defines the success bodies and the error envelope returned
//! by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ParserError;
use crate::models::ShiftRecord;
use crate::pipeline::PipelineReport;
use crate::store::{ImportStats, ShiftSummary};

/// Body of a successful `POST /parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Source document identifier.
    pub document: String,
    /// Pipeline counts.
    pub report: PipelineReport,
    /// Parsed records in report order.
    pub records: Vec<ShiftRecord>,
}

/// Body of a successful `POST /import` or `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Source document identifier.
    pub document: String,
    /// Pipeline counts.
    pub report: PipelineReport,
    /// Store counts.
    pub stats: ImportStats,
}

/// Body of `GET /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftsResponse {
    /// Matching summaries, most recent first.
    pub shifts: Vec<ShiftSummary>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unsupported-file error for `document`.
    pub fn unsupported_file(document: &str) -> Self {
        Self::with_details(
            "UNSUPPORTED_FILE",
            "Only PDF files are supported",
            format!("'{}' does not have a .pdf extension", document),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response carrying `error`.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ParserError> for ApiErrorResponse {
    fn from(error: ParserError) -> Self {
        let details = error.to_string();
        match error {
            ParserError::ConfigNotFound { .. }
            | ParserError::ConfigParseError { .. }
            | ParserError::InvalidConfig { .. } => {
                Self::internal(ApiError::with_details("CONFIG_ERROR", "Configuration error", details))
            }
            ParserError::MalformedHeader { .. } => Self::bad_request(ApiError::with_details(
                "MALFORMED_RECORD",
                "Record header could not be parsed",
                details,
            )),
            ParserError::Extraction { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "EXTRACTION_FAILED",
                    "Could not extract text from the document",
                    details,
                ),
            },
            ParserError::Snapshot { .. } => Self::internal(ApiError::with_details(
                "SNAPSHOT_ERROR",
                "Failed to write diagnostic snapshot",
                details,
            )),
            ParserError::Storage { .. } => {
                Self::internal(ApiError::with_details("STORAGE_ERROR", "Storage error", details))
            }
        }
    }
}
