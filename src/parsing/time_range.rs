//! Punch time-range extraction and midnight reconciliation.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use tracing::warn;

use crate::models::PunchInterval;

use super::time_token::parse_time_token;

/// `H(H):MM[a|p] - H(H):MM[a|p]`, spaces around the hyphen optional.
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}:[0-9]{2}[ap])\s*-\s*([0-9]{1,2}:[0-9]{2}[ap])")
        .expect("valid regex")
});

/// Anchors a (start, end) pair of clock times to `business_date`.
///
/// The end moves to the next calendar day when the range runs from PM into
/// AM, or when it would otherwise not come after the start.
///
/// # Examples
///
/// ```
/// use shift_report_parser::parsing::resolve_punch;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let punch = resolve_punch(
///     date,
///     NaiveTime::from_hms_opt(23, 58, 0).unwrap(),
///     NaiveTime::from_hms_opt(0, 10, 0).unwrap(),
/// );
/// assert_eq!(punch.end.date(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
/// assert_eq!(punch.duration_minutes, 12);
/// ```
pub fn resolve_punch(business_date: NaiveDate, start: NaiveTime, end: NaiveTime) -> PunchInterval {
    let start_dt = business_date.and_time(start);
    let mut end_dt = business_date.and_time(end);

    let pm_into_am = start.hour() >= 12 && end.hour() < 12;
    if pm_into_am || end_dt <= start_dt {
        end_dt += Duration::days(1);
    }

    PunchInterval::new(start_dt, end_dt)
}

/// Extracts every punch range on `line`, anchored to `business_date`.
///
/// Ranges are taken left to right without overlap. A range with a side that
/// fails to parse is skipped and the rest of the line is still used.
pub fn extract_punches(line: &str, business_date: NaiveDate) -> Vec<PunchInterval> {
    TIME_RANGE_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let (start_token, end_token) = (&caps[1], &caps[2]);
            match (parse_time_token(start_token), parse_time_token(end_token)) {
                (Some(start), Some(end)) => Some(resolve_punch(business_date, start, end)),
                _ => {
                    warn!(
                        start = start_token,
                        end = end_token,
                        "skipping punch with unparseable time"
                    );
                    None
                }
            }
        })
        .collect()
}
