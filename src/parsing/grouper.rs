//! Record boundary detection and grouping.
//!
//! Each employee/date unit in the report opens with a header line of the
//! form `LastName, FirstName M/D/YYYY`. Grouping is a single pass that
//! either opens a new block on such a line or appends to the open block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::models::RecordBlock;

/// The employee+date boundary pattern.
///
/// Captures: last name, first name, month, day, year.
pub(crate) static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z'\-]+),\s+([A-Za-z'\-]+)\s+([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})")
        .expect("valid regex")
});

/// Returns true if `line` starts a new record block.
pub fn is_boundary(line: &str) -> bool {
    BOUNDARY_RE.is_match(line)
}

/// Partitions normalized lines into record blocks.
///
/// Lines before the first boundary are discarded. Blocks come out in order
/// of first appearance, each starting with its boundary line.
///
/// # Examples
///
/// ```
/// use shift_report_parser::parsing::group_records;
///
/// let lines = vec![
///     "stray line before any header",
///     "Smith, John 5/1/2024",
///     "Actual 0.48 8.10 7:58a - 4:10p",
///     "O'Neil, Mary-Kate 5/1/2024",
/// ];
/// let blocks = group_records(lines);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].line_count(), 2);
/// assert_eq!(blocks[1].header(), "O'Neil, Mary-Kate 5/1/2024");
/// ```
pub fn group_records<I, S>(lines: I) -> Vec<RecordBlock>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut blocks = Vec::new();
    let mut current: Option<RecordBlock> = None;
    let mut orphaned = 0usize;

    for line in lines {
        let line = line.into();
        if is_boundary(&line) {
            if let Some(block) = current.replace(RecordBlock::open(line)) {
                blocks.push(block);
            }
        } else if let Some(block) = current.as_mut() {
            block.push(line);
        } else {
            orphaned += 1;
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    if orphaned > 0 {
        debug!(orphaned, "discarded lines before the first record header");
    }
    info!(blocks = blocks.len(), "grouped employee shift records");

    blocks
}
