//! End-to-end pipeline: normalize, group, extract.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ParserConfig;
use crate::error::ParserResult;
use crate::models::ShiftRecord;
use crate::parsing::{extract_record, group_records, normalize_lines};
use crate::source::split_lines;

use super::snapshot::{SnapshotPayload, SnapshotSink, Stage};

/// Aggregate counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Source document identifier.
    pub document: String,
    /// Lines received from the text extractor.
    pub raw_lines: usize,
    /// Lines surviving normalization.
    pub normalized_lines: usize,
    /// Record blocks found by the grouper.
    pub total_blocks: usize,
    /// Blocks that produced a record.
    pub parsed_records: usize,
    /// Blocks dropped because extraction failed.
    pub skipped_blocks: usize,
}

impl PipelineReport {
    /// True when the document produced no records.
    pub fn is_empty(&self) -> bool {
        self.parsed_records == 0
    }
}

/// Records and counts produced by [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Extracted records in block order.
    pub records: Vec<ShiftRecord>,
    /// Run counts.
    pub report: PipelineReport,
}

/// Runs the parsing stages over one document.
///
/// A pipeline borrows its configuration and keeps no state between runs, so
/// one instance can process any number of documents.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    config: &'a ParserConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline using `config`.
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }

    /// Parses already-split report lines.
    ///
    /// Blocks that fail extraction are logged and dropped. Snapshot failures
    /// are logged and never stop the run.
    ///
    /// # Arguments
    ///
    /// * `document` - Source identifier, used in logs and snapshot names
    /// * `lines` - Raw lines in page order
    /// * `sink` - Receives one snapshot per stage
    ///
    /// # Example
    ///
    /// ```
    /// use shift_report_parser::config::ParserConfig;
    /// use shift_report_parser::pipeline::{NoopSnapshotSink, Pipeline};
    ///
    /// let config = ParserConfig::default();
    /// let lines = [
    ///     "Scheduled vs Actual Hours",
    ///     "Smith, John 5/1/2024",
    ///     "Scheduled 0.50 8.00 7:55a - 4:05p",
    ///     "Actual 0.48 8.10 7:58a - 4:10p",
    /// ];
    /// let output = Pipeline::new(&config).run("week18.pdf", &lines, &mut NoopSnapshotSink);
    ///
    /// assert_eq!(output.records.len(), 1);
    /// assert_eq!(output.report.normalized_lines, 3);
    /// assert_eq!(output.records[0].employee_first_name, "John");
    /// ```
    pub fn run<S: AsRef<str>>(
        &self,
        document: &str,
        lines: &[S],
        sink: &mut dyn SnapshotSink,
    ) -> PipelineOutput {
        self.snapshot(sink, Stage::RawText, document, || {
            let raw: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
            SnapshotPayload::json_lines(raw)
        });
        self.process(document, lines, sink)
    }

    /// Parses a whole extracted text, splitting it into lines first.
    ///
    /// Newlines and form feeds both end a line. The raw-text snapshot is
    /// written as plain text.
    pub fn run_text(
        &self,
        document: &str,
        text: &str,
        sink: &mut dyn SnapshotSink,
    ) -> PipelineOutput {
        self.snapshot(sink, Stage::RawText, document, || {
            Ok(SnapshotPayload::Text(text.to_string()))
        });
        self.process(document, &split_lines(text), sink)
    }

    fn process<S: AsRef<str>>(
        &self,
        document: &str,
        lines: &[S],
        sink: &mut dyn SnapshotSink,
    ) -> PipelineOutput {
        info!(document, lines = lines.len(), "starting shift report parse");

        let cleaned = normalize_lines(lines, &self.config.noise_patterns);
        self.snapshot(sink, Stage::CleanedLines, document, || {
            SnapshotPayload::json_lines(&cleaned)
        });
        let normalized_lines = cleaned.len();

        let blocks = group_records(cleaned);
        self.snapshot(sink, Stage::GroupedRecords, document, || {
            SnapshotPayload::json_lines(&blocks)
        });

        let mut records = Vec::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            match extract_record(block, self.config) {
                Ok(record) => {
                    debug!(
                        document,
                        block = index,
                        employee = %record.full_name(),
                        date = %record.business_date,
                        punches = record.punches.len(),
                        "extracted shift record"
                    );
                    records.push(record);
                }
                Err(e) => {
                    warn!(document, block = index, error = %e, "dropping record block");
                }
            }
        }

        self.snapshot(sink, Stage::ParsedRecords, document, || {
            SnapshotPayload::json_lines(&records)
        });

        let report = PipelineReport {
            document: document.to_string(),
            raw_lines: lines.len(),
            normalized_lines,
            total_blocks: blocks.len(),
            parsed_records: records.len(),
            skipped_blocks: blocks.len() - records.len(),
        };

        if report.is_empty() {
            warn!(document, blocks = report.total_blocks, "no records found in document");
        }
        info!(
            document,
            total_blocks = report.total_blocks,
            parsed_records = report.parsed_records,
            "finished shift report parse"
        );

        PipelineOutput { records, report }
    }

    fn snapshot<F>(&self, sink: &mut dyn SnapshotSink, stage: Stage, document: &str, payload: F)
    where
        F: FnOnce() -> ParserResult<SnapshotPayload>,
    {
        if !sink.is_enabled() {
            return;
        }
        if let Err(e) = payload().and_then(|payload| sink.write(stage, document, &payload)) {
            warn!(document, stage = %stage, error = %e, "failed to save stage snapshot");
        }
    }
}
