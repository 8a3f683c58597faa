//! Persistence collaborator contract.
//!
//! Parsed records are handed to a [`ShiftStore`]. [`import_records`] skips
//! records whose (first name, last name, business date) is already stored,
//! inserts the rest, and reports what happened.

mod memory;

pub use memory::{InMemoryShiftStore, ShiftQuery, ShiftSummary, StoredPunch};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ParserResult;
use crate::models::{RecordKey, ShiftRecord};

/// The result of inserting one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredShift {
    /// Identifier assigned to the summary row.
    pub summary_id: u64,
    /// Number of punch rows inserted for it.
    pub punches_inserted: usize,
}

/// Storage for shift summaries and their punches.
pub trait ShiftStore {
    /// Returns true if a record with this key is already stored.
    fn contains(&self, key: &RecordKey) -> bool;

    /// Inserts the summary and one punch row per actual punch.
    fn insert(&mut self, record: &ShiftRecord) -> ParserResult<StoredShift>;
}

/// Counts reported by [`import_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Records handed to the import.
    pub total_records: usize,
    /// Summary rows inserted.
    pub summaries_inserted: usize,
    /// Punch rows inserted.
    pub punches_inserted: usize,
    /// Records that failed to insert.
    pub errors: usize,
}

impl ImportStats {
    /// Records skipped because they were already stored.
    pub fn duplicates(&self) -> usize {
        self.total_records
            .saturating_sub(self.summaries_inserted)
            .saturating_sub(self.errors)
    }
}

/// Imports `records` in order, skipping duplicates.
///
/// A duplicate is logged and skipped without counting as an error. A failed
/// insert is counted and the import continues with the next record.
pub fn import_records(store: &mut dyn ShiftStore, records: &[ShiftRecord]) -> ImportStats {
    let mut stats = ImportStats {
        total_records: records.len(),
        ..ImportStats::default()
    };

    for record in records {
        let key = record.key();
        if store.contains(&key) {
            warn!(record = %key, "skipping duplicate shift record");
            continue;
        }

        match store.insert(record) {
            Ok(stored) => {
                stats.summaries_inserted += 1;
                stats.punches_inserted += stored.punches_inserted;
            }
            Err(e) => {
                warn!(record = %key, error = %e, "failed to store shift record");
                stats.errors += 1;
            }
        }
    }

    info!(
        total = stats.total_records,
        summaries = stats.summaries_inserted,
        punches = stats.punches_inserted,
        errors = stats.errors,
        "imported shift records"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParserError;
    use crate::models::PunchInterval;
    use chrono::{NaiveDate, NaiveDateTime};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn record(first: &str, last: &str, date: &str, punches: usize) -> ShiftRecord {
        ShiftRecord {
            employee_first_name: first.to_string(),
            employee_last_name: last.to_string(),
            business_date: make_date(date),
            actual_working_hours: None,
            scheduled_working_hours: None,
            scheduled_break_hours: None,
            break_hours: None,
            punches: (0..punches)
                .map(|_| {
                    PunchInterval::new(
                        make_datetime(date, "08:00:00"),
                        make_datetime(date, "12:00:00"),
                    )
                })
                .collect(),
            scheduled_punches: vec![],
        }
    }

    /// Rejects every insert for one last name.
    struct FlakyStore {
        inner: InMemoryShiftStore,
        reject_last_name: &'static str,
    }

    impl ShiftStore for FlakyStore {
        fn contains(&self, key: &RecordKey) -> bool {
            self.inner.contains(key)
        }

        fn insert(&mut self, record: &ShiftRecord) -> ParserResult<StoredShift> {
            if record.employee_last_name == self.reject_last_name {
                return Err(ParserError::Storage {
                    message: "constraint violation".to_string(),
                });
            }
            self.inner.insert(record)
        }
    }

    // ==========================================================================
    // IM-001: counts
    // ==========================================================================
    #[test]
    fn test_im_001_counts_summaries_and_punches() {
        let mut store = InMemoryShiftStore::new();
        let records = vec![
            record("John", "Smith", "2024-05-01", 2),
            record("Jane", "Doe", "2024-05-01", 1),
        ];

        let stats = import_records(&mut store, &records);
        assert_eq!(
            stats,
            ImportStats {
                total_records: 2,
                summaries_inserted: 2,
                punches_inserted: 3,
                errors: 0,
            }
        );
        assert_eq!(stats.duplicates(), 0);
    }

    // ==========================================================================
    // IM-002: duplicates
    // ==========================================================================
    #[test]
    fn test_im_002_duplicates_skipped_not_errors() {
        let mut store = InMemoryShiftStore::new();
        import_records(&mut store, &[record("John", "Smith", "2024-05-01", 1)]);

        let stats = import_records(
            &mut store,
            &[
                record("John", "Smith", "2024-05-01", 3),
                record("John", "Smith", "2024-05-02", 1),
            ],
        );
        assert_eq!(stats.summaries_inserted, 1);
        assert_eq!(stats.punches_inserted, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.duplicates(), 1);
    }

    #[test]
    fn test_duplicate_within_one_batch() {
        let mut store = InMemoryShiftStore::new();
        let stats = import_records(
            &mut store,
            &[
                record("John", "Smith", "2024-05-01", 1),
                record("John", "Smith", "2024-05-01", 1),
            ],
        );
        assert_eq!(stats.summaries_inserted, 1);
        assert_eq!(stats.duplicates(), 1);
    }

    #[test]
    fn test_duplicates_with_inconsistent_counts() {
        let stats: ImportStats = serde_json::from_str(
            r#"{"total_records": 1, "summaries_inserted": 2, "punches_inserted": 0, "errors": 1}"#,
        )
        .unwrap();
        assert_eq!(stats.duplicates(), 0);
    }

    // ==========================================================================
    // IM-003: insert failures
    // ==========================================================================
    #[test]
    fn test_im_003_insert_failure_counted_and_continues() {
        let mut store = FlakyStore {
            inner: InMemoryShiftStore::new(),
            reject_last_name: "Doe",
        };
        let stats = import_records(
            &mut store,
            &[
                record("Jane", "Doe", "2024-05-01", 2),
                record("John", "Smith", "2024-05-01", 1),
            ],
        );
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.summaries_inserted, 1);
        assert_eq!(stats.punches_inserted, 1);
    }

    #[test]
    fn test_empty_import() {
        let mut store = InMemoryShiftStore::new();
        assert_eq!(import_records(&mut store, &[]), ImportStats::default());
    }
}
