//! Diagnostic stage snapshots.
//!
//! The orchestrator hands each stage's output to a [`SnapshotSink`]. Sinks
//! are injected, so a pipeline run can write files, keep snapshots in
//! memory for a test, or discard them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{ParserError, ParserResult};

/// A pipeline stage whose output can be snapshotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Lines as delivered by the text extractor.
    RawText,
    /// Lines after normalization.
    CleanedLines,
    /// Record blocks after grouping.
    GroupedRecords,
    /// Extracted shift records.
    ParsedRecords,
}

impl Stage {
    /// The label used in snapshot names.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::RawText => "stage1_raw_text",
            Stage::CleanedLines => "stage2_cleaned_lines",
            Stage::GroupedRecords => "stage3_grouped_records",
            Stage::ParsedRecords => "stage4_parsed_records",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized output of one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotPayload {
    /// One JSON value per item, written as JSON lines.
    JsonLines(Vec<serde_json::Value>),
    /// Unstructured text, written as-is.
    Text(String),
}

impl SnapshotPayload {
    /// Serializes each item to a JSON value.
    pub fn json_lines<I>(items: I) -> ParserResult<Self>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(SnapshotPayload::JsonLines)
            .map_err(|e| ParserError::Snapshot {
                path: "<serialize>".to_string(),
                message: e.to_string(),
            })
    }

    /// File extension matching the payload kind.
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotPayload::JsonLines(_) => "jsonl",
            SnapshotPayload::Text(_) => "txt",
        }
    }

    /// Renders the payload as file content.
    pub fn render(&self) -> String {
        match self {
            SnapshotPayload::JsonLines(values) => values
                .iter()
                .map(|value| format!("{}\n", value))
                .collect(),
            SnapshotPayload::Text(text) => text.clone(),
        }
    }
}

/// Receives stage snapshots, keyed by stage and source document.
pub trait SnapshotSink {
    /// Returns false when snapshots are discarded, so callers can skip
    /// serializing them.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Stores one snapshot.
    fn write(
        &mut self,
        stage: Stage,
        document: &str,
        payload: &SnapshotPayload,
    ) -> ParserResult<()>;
}

/// A sink that drops every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotSink;

impl SnapshotSink for NoopSnapshotSink {
    fn is_enabled(&self) -> bool {
        false
    }

    fn write(&mut self, _: Stage, _: &str, _: &SnapshotPayload) -> ParserResult<()> {
        Ok(())
    }
}

/// A snapshot kept by [`MemorySnapshotSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The stage that produced it.
    pub stage: Stage,
    /// The source document identifier.
    pub document: String,
    /// The stage output.
    pub payload: SnapshotPayload,
}

/// A sink that keeps snapshots in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotSink {
    snapshots: Vec<Snapshot>,
}

impl MemorySnapshotSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots in write order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// The most recent snapshot for `stage`, if any.
    pub fn get(&self, stage: Stage) -> Option<&Snapshot> {
        self.snapshots.iter().rev().find(|s| s.stage == stage)
    }
}

impl SnapshotSink for MemorySnapshotSink {
    fn write(
        &mut self,
        stage: Stage,
        document: &str,
        payload: &SnapshotPayload,
    ) -> ParserResult<()> {
        self.snapshots.push(Snapshot {
            stage,
            document: document.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

/// A sink that writes one file per snapshot under a directory.
///
/// Files are named `<stage>_<document stem>.<ext>`. When the name is taken a
/// numeric suffix is appended: `_1`, `_2`, and so on.
#[derive(Debug, Clone)]
pub struct FsSnapshotSink {
    dir: PathBuf,
}

impl FsSnapshotSink {
    /// Creates a sink writing under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unused_path(&self, base: &str, extension: &str) -> PathBuf {
        let candidate = self.dir.join(format!("{}.{}", base, extension));
        if !candidate.exists() {
            return candidate;
        }

        (1u32..)
            .map(|n| self.dir.join(format!("{}_{}.{}", base, n, extension)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

/// Reduces a document identifier to its lowercased file stem, spaces as underscores.
pub fn document_stem(document: &str) -> String {
    Path::new(document)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.to_string())
        .to_lowercase()
        .replace(' ', "_")
}

impl SnapshotSink for FsSnapshotSink {
    fn write(
        &mut self,
        stage: Stage,
        document: &str,
        payload: &SnapshotPayload,
    ) -> ParserResult<()> {
        let to_error = |path: &Path, e: std::io::Error| ParserError::Snapshot {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(|e| to_error(&self.dir, e))?;

        let base = format!("{}_{}", stage.label(), document_stem(document));
        let path = self.unused_path(&base, payload.extension());

        info!(stage = %stage, path = %path.display(), "saving stage snapshot");
        fs::write(&path, payload.render()).map_err(|e| to_error(&path, e))
    }
}
