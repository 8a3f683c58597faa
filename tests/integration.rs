//! Integration tests for shift report parsing.
//!
//! This suite drives the crate through its public surfaces:
//! - The pipeline over realistic multi-page report text
//! - Stage snapshots written to disk
//! - Configuration loaded from YAML
//! - The HTTP endpoints, end to end through the shared store

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use shift_report_parser::api::{AppState, create_router};
use shift_report_parser::config::{ConfigLoader, ParserConfig};
use shift_report_parser::pipeline::{FsSnapshotSink, MemorySnapshotSink, Pipeline, Stage};
use shift_report_parser::source::{PlainTextExtractor, TextExtractor};
use shift_report_parser::store::{InMemoryShiftStore, ShiftQuery, import_records};

// =============================================================================
// Test Helpers
// =============================================================================

const WEEKLY_REPORT: &str = "\
Scheduled vs Actual Hours
JS Foods BURGER KING #4411
Employee Business Date Labor Type Break Hours Worked
--------------------------------------------------------------
Smith, John 5/1/2024 Crew
Scheduled 0.50 8.00 7:55a - 4:05p
Actual 0.48 8.10 7:58a - 4:10p
Smith, John 5/2/2024 Crew
Actual 0.00 4.00 6:00p - 10:00p
Total: Smith, John 12.10
O'Neil, Mary-Kate 5/1/2024 Shift Manager
Scheduled 8.00 3:00p - 11:00p
Actual 0.50 8.70 2:58p - 11:58p 12:00a - 12:10a
Page 1 of 2
\u{000C}Scheduled vs Actual Hours
Doe, Jane 13/45/2024 Crew
Actual 0.30 4.00 9:00a - 1:00p
Garcia-Lopez, Luis 5/3/2024 Crew
Scheduled 0.50 8.00 10:00p - 6:00a
Actual 0.50 812.00 10:04p - 6:01a
Difference 0.01
This report is confidential and distribution is strictly prohibited
Page 2 of 2
";

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn create_router_for_test() -> (AppState, Router) {
    let state = AppState::with_extractor(ParserConfig::default(), PlainTextExtractor);
    (state.clone(), create_router(state))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn post_import(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/import")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn report_lines() -> Vec<String> {
    PlainTextExtractor
        .extract_lines(WEEKLY_REPORT.as_bytes())
        .unwrap()
}

// =============================================================================
// SECTION 1: Pipeline over a full report
// =============================================================================

#[test]
fn test_weekly_report_records_in_order() {
    let config = ParserConfig::default();
    let output = Pipeline::new(&config).run("week18.pdf", &report_lines(), &mut MemorySnapshotSink::new());

    let names: Vec<(String, NaiveDate)> = output
        .records
        .iter()
        .map(|r| (r.employee_last_name.clone(), r.business_date))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Smith".to_string(), make_date("2024-05-01")),
            ("Smith".to_string(), make_date("2024-05-02")),
            ("O'Neil".to_string(), make_date("2024-05-01")),
            ("Garcia-Lopez".to_string(), make_date("2024-05-03")),
        ]
    );
    assert_eq!(output.report.total_blocks, 5);
    assert_eq!(output.report.skipped_blocks, 1);
}

#[test]
fn test_weekly_report_field_values() {
    let config = ParserConfig::default();
    let output = Pipeline::new(&config).run("week18.pdf", &report_lines(), &mut MemorySnapshotSink::new());

    let john = &output.records[0];
    assert_eq!(john.employee_first_name, "John");
    assert_eq!(john.scheduled_break_hours, Some(dec("0.50")));
    assert_eq!(john.actual_working_hours, Some(dec("8.10")));

    // The "Total:" line is noise, so the second day keeps its own values
    let john_day_two = &output.records[1];
    assert_eq!(john_day_two.actual_working_hours, Some(dec("4.00")));
    assert_eq!(john_day_two.scheduled_working_hours, None);
    assert_eq!(john_day_two.scheduled_break_hours, Some(Decimal::ZERO));

    // Single scheduled column; a range starting at 12:00a stays on the business date
    let mary = &output.records[2];
    assert_eq!(mary.employee_first_name, "Mary-Kate");
    assert_eq!(mary.scheduled_working_hours, Some(dec("8.00")));
    assert_eq!(mary.scheduled_break_hours, Some(Decimal::ZERO));
    assert_eq!(mary.punches.len(), 2);
    assert_eq!(mary.punches[0].end, make_datetime("2024-05-01", "23:58:00"));
    assert_eq!(mary.punches[1].start, make_datetime("2024-05-01", "00:00:00"));
    assert_eq!(mary.punches[1].end, make_datetime("2024-05-01", "00:10:00"));

    // Overnight schedule and an implausible actual total
    let luis = &output.records[3];
    assert_eq!(luis.scheduled_punches[0].end, make_datetime("2024-05-04", "06:00:00"));
    assert_eq!(luis.scheduled_punches[0].duration_minutes, 480);
    assert_eq!(luis.actual_working_hours, None);
    assert_eq!(luis.punches[0].duration_minutes, 477);
}

#[test]
fn test_snapshots_written_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = ParserConfig::default();
    let mut sink = FsSnapshotSink::new(dir.path());

    Pipeline::new(&config).run_text("Week 18.pdf", WEEKLY_REPORT, &mut sink);
    Pipeline::new(&config).run_text("Week 18.pdf", WEEKLY_REPORT, &mut sink);

    for name in [
        "stage1_raw_text_week_18.txt",
        "stage2_cleaned_lines_week_18.jsonl",
        "stage3_grouped_records_week_18.jsonl",
        "stage4_parsed_records_week_18.jsonl",
        "stage4_parsed_records_week_18_1.jsonl",
    ] {
        assert!(dir.path().join(name).exists(), "missing snapshot {}", name);
    }

    let parsed = std::fs::read_to_string(dir.path().join("stage4_parsed_records_week_18.jsonl")).unwrap();
    let rows: Vec<Value> = parsed
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["scheduled_working_hours"], json!(8.0));
    assert_eq!(rows[3]["actual_working_hours"], Value::Null);
}

#[test]
fn test_stage_snapshot_contents() {
    let config = ParserConfig::default();
    let mut sink = MemorySnapshotSink::new();
    Pipeline::new(&config).run("week18.pdf", &report_lines(), &mut sink);

    assert_eq!(sink.snapshots().len(), 4);
    assert!(sink.get(Stage::CleanedLines).is_some());
}

#[test]
fn test_config_file_drives_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parser.yaml");
    std::fs::write(
        &path,
        "noise_patterns:\n  - Scheduled vs Actual Hours\n  - Page\nmax_plausible_hours: 1000\n",
    )
    .unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    let output = Pipeline::new(&config).run("week18.pdf", &report_lines(), &mut MemorySnapshotSink::new());

    // The raised bound accepts the 812.00 column
    let luis = output
        .records
        .iter()
        .find(|r| r.employee_last_name == "Garcia-Lopez")
        .unwrap();
    assert_eq!(luis.actual_working_hours, Some(dec("812.00")));
}

#[test]
fn test_import_twice_skips_duplicates() {
    let config = ParserConfig::default();
    let output = Pipeline::new(&config).run("week18.pdf", &report_lines(), &mut MemorySnapshotSink::new());
    let mut store = InMemoryShiftStore::new();

    let first = import_records(&mut store, &output.records);
    assert_eq!(first.summaries_inserted, 4);
    assert_eq!(first.punches_inserted, 5);

    let second = import_records(&mut store, &output.records);
    assert_eq!(second.summaries_inserted, 0);
    assert_eq!(second.duplicates(), 4);
    assert_eq!(second.errors, 0);

    let smiths = store.summaries(&ShiftQuery {
        employee_last_name: Some("Smith".to_string()),
        ..ShiftQuery::default()
    });
    assert_eq!(smiths[0].business_date, make_date("2024-05-02"));
}

// =============================================================================
// SECTION 2: HTTP endpoints
// =============================================================================

#[tokio::test]
async fn test_import_then_query_shifts() {
    let (_, router) = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        post_import(json!({ "document": "week18.pdf", "lines": report_lines() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File processed successfully");
    assert_eq!(body["report"]["total_blocks"], 5);
    assert_eq!(body["stats"]["total_records"], 4);
    assert_eq!(body["stats"]["summaries_inserted"], 4);

    let (status, body) = send(
        router,
        Request::builder()
            .uri("/shifts?employee_last_name=Smith&start_date=2024-05-01&end_date=2024-05-01")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let shifts = body["shifts"].as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["employee_first_name"], "John");
    assert_eq!(shifts[0]["actual_working_hours"], json!(8.1));
    assert_eq!(shifts[0]["punch_count"], 1);
}

#[tokio::test]
async fn test_repeated_import_reports_no_new_rows() {
    let (state, router) = create_router_for_test();
    let body = json!({ "document": "week18.pdf", "lines": report_lines() });

    send(router.clone(), post_import(body.clone())).await;
    let (status, second) = send(router, post_import(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["stats"]["summaries_inserted"], 0);
    assert_eq!(second["stats"]["errors"], 0);
    assert_eq!(state.with_store(|store| store.len()).unwrap(), 4);
}

#[tokio::test]
async fn test_import_without_records() {
    let (_, router) = create_router_for_test();

    let (status, body) = send(
        router,
        post_import(json!({ "document": "blank.pdf", "lines": ["Scheduled vs Actual Hours", "Page 1 of 1"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No records found in document");
    assert_eq!(
        body["stats"],
        json!({ "total_records": 0, "summaries_inserted": 0, "punches_inserted": 0, "errors": 0 })
    );
}

#[tokio::test]
async fn test_upload_uses_extractor() {
    let (_, router) = create_router_for_test();

    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/upload?document=week18.PDF")
            .body(Body::from(WEEKLY_REPORT))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["summaries_inserted"], 4);
    assert_eq!(body["stats"]["punches_inserted"], 5);
}

#[tokio::test]
async fn test_upload_without_document_name_rejected() {
    let (_, router) = create_router_for_test();

    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::from(WEEKLY_REPORT))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_FILE");
}

#[tokio::test]
async fn test_parse_does_not_store() {
    let (state, router) = create_router_for_test();

    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/parse")
            .header("Content-Type", "text/plain")
            .body(Body::from(WEEKLY_REPORT))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document"], "upload");
    assert_eq!(body["records"].as_array().unwrap().len(), 4);
    assert!(state.with_store(|store| store.is_empty()).unwrap());
}
