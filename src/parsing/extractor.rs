//! Record field extraction.
//!
//! Turns one [`RecordBlock`] into one [`ShiftRecord`]. The header gives the
//! employee and business date; the Actual and Scheduled lines give hour
//! totals and punch ranges. Numeric problems on a line leave that line's
//! fields unset and never fail the block. Only a header that does not parse
//! fails the block.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{ParserError, ParserResult};
use crate::models::{PunchInterval, RecordBlock, ShiftRecord};

use super::grouper::BOUNDARY_RE;
use super::time_range::extract_punches;

/// The category of a line within a record block.
///
/// Classification is by ordered predicate: a line starting with "Total" is
/// never an hours line, and "Actual" is checked before "Scheduled".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The actual-hours line.
    Actual,
    /// The scheduled-hours line.
    Scheduled,
    /// Anything else (header, labour type, department, ...).
    Other,
}

impl LineKind {
    /// Classifies a normalized line.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_report_parser::parsing::LineKind;
    ///
    /// assert_eq!(LineKind::classify("Actual 0.48 8.10 7:58a - 4:10p"), LineKind::Actual);
    /// assert_eq!(LineKind::classify("Scheduled 8.00 8:00a - 4:00p"), LineKind::Scheduled);
    /// assert_eq!(LineKind::classify("Total Actual 40.00"), LineKind::Other);
    /// ```
    pub fn classify(line: &str) -> Self {
        if line.starts_with("Total") {
            LineKind::Other
        } else if line.contains("Actual") {
            LineKind::Actual
        } else if line.contains("Scheduled") {
            LineKind::Scheduled
        } else {
            LineKind::Other
        }
    }
}

/// Employee and date parsed from a block's first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    /// Name before the comma.
    pub last_name: String,
    /// Name after the comma.
    pub first_name: String,
    /// The business date.
    pub business_date: NaiveDate,
}

/// Parses a `LastName, FirstName M/D/YYYY` header line.
///
/// Fails with [`ParserError::MalformedHeader`] when the line does not match
/// or the date is not a real calendar date.
pub fn parse_header(line: &str) -> ParserResult<RecordHeader> {
    let malformed = || ParserError::MalformedHeader {
        line: line.to_string(),
    };

    let caps = BOUNDARY_RE.captures(line).ok_or_else(malformed)?;

    let month = caps[3].parse::<u32>().map_err(|_| malformed())?;
    let day = caps[4].parse::<u32>().map_err(|_| malformed())?;
    let year = caps[5].parse::<i32>().map_err(|_| malformed())?;
    let business_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)?;

    Ok(RecordHeader {
        last_name: caps[1].to_string(),
        first_name: caps[2].to_string(),
        business_date,
    })
}

/// Break and working hours read from one hours line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HourColumns {
    break_hours: Option<Decimal>,
    working_hours: Option<Decimal>,
}

/// What one Actual or Scheduled line contributes to the record.
#[derive(Debug, Clone, Default)]
struct HoursLine {
    hours: HourColumns,
    punches: Vec<PunchInterval>,
}

/// Reads the decimal hour columns from an hours line.
///
/// Two or more decimal tokens are (break, working); a single token on a
/// Scheduled line is working hours alone. A working value at or above
/// `max_plausible_hours` is treated as a mis-tokenized number and dropped.
fn read_hour_columns(line: &str, kind: LineKind, max_plausible_hours: Decimal) -> HourColumns {
    let tokens: Vec<&str> = line.split_whitespace().filter(|t| t.contains('.')).collect();

    let parse = |token: &str| match Decimal::from_str(token) {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(line, token, "hour column is not a decimal");
            None
        }
    };

    let plausible = |working: Decimal| {
        if working < max_plausible_hours {
            true
        } else {
            warn!(
                line,
                hours = %working,
                limit = %max_plausible_hours,
                "implausible working hours, leaving field unset"
            );
            false
        }
    };

    match tokens.as_slice() {
        [] => HourColumns::default(),
        [single] => {
            if kind != LineKind::Scheduled {
                warn!(line, "actual line has a single hour column, leaving fields unset");
                return HourColumns::default();
            }
            match parse(*single) {
                Some(working) if plausible(working) => HourColumns {
                    break_hours: None,
                    working_hours: Some(working),
                },
                _ => HourColumns::default(),
            }
        }
        [first, second, rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    line,
                    columns = tokens.len(),
                    "more hour columns than expected, using the first two"
                );
            }
            match (parse(*first), parse(*second)) {
                (Some(break_hours), Some(working)) if plausible(working) => HourColumns {
                    break_hours: Some(break_hours),
                    working_hours: Some(working),
                },
                _ => HourColumns::default(),
            }
        }
    }
}

fn read_hours_line(
    line: &str,
    kind: LineKind,
    business_date: NaiveDate,
    config: &ParserConfig,
) -> HoursLine {
    HoursLine {
        hours: read_hour_columns(line, kind, config.max_plausible_hours),
        punches: extract_punches(line, business_date),
    }
}

/// Extracts one shift record from a record block.
///
/// Only the first Actual line and the first Scheduled line of a block are
/// used; a repeat is logged and ignored. Missing hour values stay `None`,
/// except scheduled break hours which default to zero.
///
/// # Examples
///
/// ```
/// use shift_report_parser::config::ParserConfig;
/// use shift_report_parser::parsing::{extract_record, group_records};
/// use rust_decimal::Decimal;
///
/// let blocks = group_records(vec![
///     "Smith, John 5/1/2024",
///     "Scheduled 0.50 8.00 7:55a - 4:05p",
///     "Actual 0.48 8.10 7:58a - 4:10p",
/// ]);
/// let record = extract_record(&blocks[0], &ParserConfig::default()).unwrap();
///
/// assert_eq!(record.employee_last_name, "Smith");
/// assert_eq!(record.actual_working_hours, Some(Decimal::new(810, 2)));
/// assert_eq!(record.punches[0].duration_minutes, 492);
/// assert_eq!(record.scheduled_punches[0].duration_minutes, 490);
/// ```
pub fn extract_record(block: &RecordBlock, config: &ParserConfig) -> ParserResult<ShiftRecord> {
    let header = parse_header(block.header())?;

    let mut actual: Option<HoursLine> = None;
    let mut scheduled: Option<HoursLine> = None;

    for line in block.lines() {
        let kind = LineKind::classify(line);
        let slot = match kind {
            LineKind::Actual => &mut actual,
            LineKind::Scheduled => &mut scheduled,
            LineKind::Other => continue,
        };

        if slot.is_some() {
            warn!(
                header = block.header(),
                line = line.as_str(),
                kind = ?kind,
                "repeated hours line in block, keeping the first"
            );
            continue;
        }

        *slot = Some(read_hours_line(line, kind, header.business_date, config));
    }

    if actual.is_none() && scheduled.is_none() {
        debug!(header = block.header(), "block has no Actual or Scheduled line");
    }

    let actual = actual.unwrap_or_default();
    let scheduled = scheduled.unwrap_or_default();

    Ok(ShiftRecord {
        employee_first_name: header.first_name,
        employee_last_name: header.last_name,
        business_date: header.business_date,
        actual_working_hours: actual.hours.working_hours,
        scheduled_working_hours: scheduled.hours.working_hours,
        scheduled_break_hours: Some(scheduled.hours.break_hours.unwrap_or(Decimal::ZERO)),
        break_hours: actual.hours.break_hours,
        punches: actual.punches,
        scheduled_punches: scheduled.punches,
    })
}
