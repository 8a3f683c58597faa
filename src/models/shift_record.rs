//! Shift record model.
//!
//! A [`ShiftRecord`] is built once per record block and never modified
//! afterwards. Hour quantities serialize as JSON numbers so snapshots and API
//! responses can be consumed without decimal-string handling.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PunchInterval;

/// The attendance summary for one employee on one business date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Employee first name, as printed after the comma in the header.
    pub employee_first_name: String,
    /// Employee last name, as printed before the comma in the header.
    pub employee_last_name: String,
    /// The calendar date the shift is attributed to.
    pub business_date: NaiveDate,
    /// Hours actually worked, if the Actual line yielded a plausible value.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub actual_working_hours: Option<Decimal>,
    /// Hours scheduled, if the Scheduled line yielded a plausible value.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub scheduled_working_hours: Option<Decimal>,
    /// Scheduled break hours; zero when the Scheduled line carried no break column.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub scheduled_break_hours: Option<Decimal>,
    /// Break hours actually taken.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub break_hours: Option<Decimal>,
    /// Actual punches, in the order they appear on the Actual line.
    #[serde(default)]
    pub punches: Vec<PunchInterval>,
    /// Scheduled punches, in the order they appear on the Scheduled line.
    #[serde(default)]
    pub scheduled_punches: Vec<PunchInterval>,
}

/// Identity of a shift record for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    /// Employee first name.
    pub first_name: String,
    /// Employee last name.
    pub last_name: String,
    /// Business date of the shift.
    pub business_date: NaiveDate,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} on {}",
            self.last_name, self.first_name, self.business_date
        )
    }
}

impl ShiftRecord {
    /// Returns the (first name, last name, business date) identity of the record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            first_name: self.employee_first_name.clone(),
            last_name: self.employee_last_name.clone(),
            business_date: self.business_date,
        }
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.employee_first_name, self.employee_last_name)
    }

    /// Sum of actual punch durations in minutes.
    pub fn punched_minutes(&self) -> i64 {
        self.punches.iter().map(|p| p.duration_minutes).sum()
    }
}
