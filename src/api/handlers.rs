//! HTTP request handlers for the shift report API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Query, State,
        rejection::{BytesRejection, JsonRejection, QueryRejection, StringRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ParserError;
use crate::pipeline::Pipeline;
use crate::store::{ImportStats, ShiftQuery, import_records};

use super::request::{DocumentQuery, ImportRequest};
use super::response::{ApiError, ApiErrorResponse, ImportResponse, ParseResponse, ShiftsResponse};
use super::state::AppState;

/// Largest request body accepted, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/parse", post(parse_handler))
        .route("/import", post(import_handler))
        .route("/upload", post(upload_handler))
        .route("/shifts", get(shifts_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /parse.
///
/// Parses a plain-text report body and returns the records without storing them.
async fn parse_handler(
    State(state): State<AppState>,
    query: Result<Query<DocumentQuery>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return invalid_query(correlation_id, rejection),
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return invalid_body(correlation_id, rejection.status(), rejection.body_text());
        }
    };
    let document = query.name().to_string();
    info!(correlation_id = %correlation_id, document = %document, bytes = body.len(), "Processing parse request");

    let start_time = Instant::now();
    let task_document = document.clone();
    let output = match tokio::task::spawn_blocking(move || {
        let mut sink = state.snapshot_sink();
        Pipeline::new(state.config()).run_text(&task_document, &body, sink.as_mut())
    })
    .await
    {
        Ok(output) => output,
        Err(err) => return task_failed(correlation_id, "PARSE_FAILED", err),
    };

    info!(
        correlation_id = %correlation_id,
        records = output.records.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Parse completed"
    );
    json_response(
        StatusCode::OK,
        ParseResponse {
            document,
            report: output.report,
            records: output.records,
        },
    )
}

/// Handler for POST /import.
///
/// Parses already-extracted lines and stores the records.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let result = tokio::task::spawn_blocking(move || {
        import_lines(&state, &request.document, &request.lines)
    })
    .await;
    match result {
        Ok(result) => respond_with_import(correlation_id, result),
        Err(err) => task_failed(correlation_id, "IMPORT_FAILED", err),
    }
}

/// Handler for POST /upload.
///
/// Accepts raw PDF bytes, extracts the text, then imports as POST /import does.
async fn upload_handler(
    State(state): State<AppState>,
    query: Result<Query<DocumentQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return invalid_query(correlation_id, rejection),
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return invalid_body(correlation_id, rejection.status(), rejection.body_text());
        }
    };
    let document = query.name().to_string();
    info!(correlation_id = %correlation_id, document = %document, bytes = body.len(), "Processing upload");

    if !document.to_lowercase().ends_with(".pdf") {
        warn!(correlation_id = %correlation_id, document = %document, "Rejected non-PDF upload");
        return ApiErrorResponse::bad_request(ApiError::unsupported_file(&document)).into_response();
    }

    // Extraction, snapshots and the store all block
    let result = tokio::task::spawn_blocking(move || -> Result<ImportResponse, ParserError> {
        let lines = state.extractor().extract_lines(&body).inspect_err(|err| {
            warn!(correlation_id = %correlation_id, error = %err, "Text extraction failed");
        })?;
        import_lines(&state, &document, &lines)
    })
    .await;
    match result {
        Ok(result) => respond_with_import(correlation_id, result),
        Err(err) => task_failed(correlation_id, "EXTRACTION_FAILED", err),
    }
}

/// Handler for GET /shifts.
async fn shifts_handler(
    State(state): State<AppState>,
    query: Result<Query<ShiftQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return invalid_query(correlation_id, rejection),
    };

    match state.with_store(|store| store.summaries(&query)) {
        Ok(shifts) => json_response(StatusCode::OK, ShiftsResponse { shifts }),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

fn invalid_query(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", body_text)).into_response()
}

fn invalid_body(correlation_id: Uuid, status: StatusCode, body_text: String) -> Response {
    warn!(correlation_id = %correlation_id, status = %status, error = %body_text, "Invalid request body");
    ApiErrorResponse {
        status,
        error: ApiError::new("INVALID_BODY", body_text),
    }
    .into_response()
}

fn task_failed(correlation_id: Uuid, code: &str, err: JoinError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Blocking task failed");
    ApiErrorResponse::internal(ApiError::new(code, err.to_string())).into_response()
}

/// Runs the pipeline over `lines` and stores the resulting records.
fn import_lines(
    state: &AppState,
    document: &str,
    lines: &[String],
) -> Result<ImportResponse, ParserError> {
    let mut sink = state.snapshot_sink();
    let output = Pipeline::new(state.config()).run(document, lines, sink.as_mut());

    if output.records.is_empty() {
        return Ok(ImportResponse {
            message: "No records found in document".to_string(),
            document: document.to_string(),
            report: output.report,
            stats: ImportStats::default(),
        });
    }

    let stats = state.with_store(|store| import_records(store, &output.records))?;
    Ok(ImportResponse {
        message: "File processed successfully".to_string(),
        document: document.to_string(),
        report: output.report,
        stats,
    })
}

fn respond_with_import(
    correlation_id: Uuid,
    result: Result<ImportResponse, ParserError>,
) -> Response {
    match result {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                document = %response.document,
                summaries = response.stats.summaries_inserted,
                punches = response.stats.punches_inserted,
                errors = response.stats.errors,
                "Import completed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Import failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
