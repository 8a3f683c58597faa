//! Pipeline orchestration and diagnostic snapshots.
//!
//! [`Pipeline`] sequences the parsing stages over one document and reports
//! how many record blocks produced records. Each stage's output can be
//! handed to a [`SnapshotSink`] for debugging.

mod orchestrator;
mod snapshot;

pub use orchestrator::{Pipeline, PipelineOutput, PipelineReport};
pub use snapshot::{
    FsSnapshotSink, MemorySnapshotSink, NoopSnapshotSink, Snapshot, SnapshotPayload,
    SnapshotSink, Stage, document_stem,
};
