//! Text-to-record parsing for "Scheduled vs Actual Hours" reports.
//!
//! This module contains the stages of the parsing pipeline: compact time
//! token parsing, line normalization, record boundary grouping, punch range
//! extraction with midnight reconciliation, and per-block field extraction.
//! Every stage is a pure function of its input plus configuration.

mod extractor;
mod grouper;
mod normalizer;
mod time_range;
mod time_token;

pub use extractor::{LineKind, RecordHeader, extract_record, parse_header};
pub use grouper::{group_records, is_boundary};
pub use normalizer::{collapse_whitespace, is_noise, normalize_lines};
pub use time_range::{extract_punches, resolve_punch};
pub use time_token::parse_time_token;
