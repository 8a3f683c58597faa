//! In-memory shift store.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParserResult;
use crate::models::{RecordKey, ShiftRecord};

use super::{ShiftStore, StoredShift};

/// A stored shift summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Summary row id.
    pub id: u64,
    /// Employee first name.
    pub employee_first_name: String,
    /// Employee last name.
    pub employee_last_name: String,
    /// Business date.
    pub business_date: NaiveDate,
    /// Actual working hours.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub actual_working_hours: Option<Decimal>,
    /// Scheduled working hours.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub scheduled_working_hours: Option<Decimal>,
    /// Scheduled break hours.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub scheduled_break_hours: Option<Decimal>,
    /// Break hours taken.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub break_hours: Option<Decimal>,
    /// Number of punch rows referencing this summary.
    pub punch_count: usize,
}

/// A stored punch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPunch {
    /// Punch row id.
    pub id: u64,
    /// The summary this punch belongs to.
    pub summary_id: u64,
    /// Clock-in time.
    pub clock_in: NaiveDateTime,
    /// Clock-out time.
    pub clock_out: NaiveDateTime,
    /// Duration in minutes.
    pub duration_minutes: i64,
}

/// Filters for [`InMemoryShiftStore::summaries`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftQuery {
    /// Exact employee last name.
    #[serde(default)]
    pub employee_last_name: Option<String>,
    /// Earliest business date, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Latest business date, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ShiftQuery {
    fn matches(&self, summary: &ShiftSummary) -> bool {
        self.employee_last_name
            .as_deref()
            .is_none_or(|name| summary.employee_last_name == name)
            && self.start_date.is_none_or(|start| summary.business_date >= start)
            && self.end_date.is_none_or(|end| summary.business_date <= end)
    }
}

/// Keeps summaries and punches in memory with sequential ids starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftStore {
    summaries: Vec<ShiftSummary>,
    punches: Vec<StoredPunch>,
    index: HashMap<RecordKey, u64>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored summaries.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Summaries matching `query`, most recent business date first.
    pub fn summaries(&self, query: &ShiftQuery) -> Vec<ShiftSummary> {
        let mut found: Vec<ShiftSummary> = self
            .summaries
            .iter()
            .filter(|summary| query.matches(summary))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.business_date.cmp(&a.business_date).then(a.id.cmp(&b.id)));
        found
    }

    /// Punches belonging to `summary_id`, in insertion order.
    pub fn punches_for(&self, summary_id: u64) -> Vec<&StoredPunch> {
        self.punches
            .iter()
            .filter(|punch| punch.summary_id == summary_id)
            .collect()
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn contains(&self, key: &RecordKey) -> bool {
        self.index.contains_key(key)
    }

    fn insert(&mut self, record: &ShiftRecord) -> ParserResult<StoredShift> {
        let summary_id = self.summaries.len() as u64 + 1;

        for punch in &record.punches {
            self.punches.push(StoredPunch {
                id: self.punches.len() as u64 + 1,
                summary_id,
                clock_in: punch.start,
                clock_out: punch.end,
                duration_minutes: punch.duration_minutes,
            });
        }

        self.summaries.push(ShiftSummary {
            id: summary_id,
            employee_first_name: record.employee_first_name.clone(),
            employee_last_name: record.employee_last_name.clone(),
            business_date: record.business_date,
            actual_working_hours: record.actual_working_hours,
            scheduled_working_hours: record.scheduled_working_hours,
            scheduled_break_hours: record.scheduled_break_hours,
            break_hours: record.break_hours,
            punch_count: record.punches.len(),
        });
        self.index.insert(record.key(), summary_id);

        Ok(StoredShift {
            summary_id,
            punches_inserted: record.punches.len(),
        })
    }
}
