//! Punch interval model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One contiguous clock-in/clock-out interval within a shift.
///
/// `end` is always after `start` once the midnight-crossing rule has been
/// applied, and `duration_minutes` is the whole-minute difference between
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchInterval {
    /// Clock-in timestamp.
    pub start: NaiveDateTime,
    /// Clock-out timestamp, possibly on the day after the business date.
    pub end: NaiveDateTime,
    /// Whole minutes between `start` and `end`.
    pub duration_minutes: i64,
}

impl PunchInterval {
    /// Creates an interval, deriving the duration from the two timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_report_parser::models::PunchInterval;
    /// use chrono::NaiveDateTime;
    ///
    /// let start = NaiveDateTime::parse_from_str("2024-05-01 07:58:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2024-05-01 16:10:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert_eq!(PunchInterval::new(start, end).duration_minutes, 492);
    /// ```
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    /// Returns the interval length in hours.
    pub fn hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns true when the interval ends on a later calendar day than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end.date() > self.start.date()
    }
}
