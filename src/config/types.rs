//! Configuration types for report parsing.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ParserError, ParserResult};

/// Substrings that mark a line as report furniture rather than record data.
///
/// Covers the report title, company banners, column headers, separator
/// rules, page footers and legal boilerplate.
pub const DEFAULT_NOISE_PATTERNS: &[&str] = &[
    "Scheduled vs Actual Hours",
    "JS Foods",
    "BURGER KING",
    "Employee",
    "Business",
    "Labor Type",
    "Break",
    "Hours",
    "Date",
    "Time",
    "Worked",
    "---",
    "===",
    "Total:",
    "Page",
    "Global Payments Inc",
    "strictly prohibited",
    "Difference",
];

/// Working-hour values must be strictly below this to be accepted.
pub const DEFAULT_MAX_PLAUSIBLE_HOURS: Decimal = Decimal::ONE_HUNDRED;

/// Parser configuration.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines containing any of these substrings are dropped by the normalizer.
    pub noise_patterns: Vec<String>,
    /// Plausibility bound for working-hour columns (exclusive).
    pub max_plausible_hours: Decimal,
    /// Directory for diagnostic stage snapshots. Snapshots are off when unset.
    pub snapshot_dir: Option<PathBuf>,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            noise_patterns: DEFAULT_NOISE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            max_plausible_hours: DEFAULT_MAX_PLAUSIBLE_HOURS,
            snapshot_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl ParserConfig {
    /// Checks values that deserialize fine but would break parsing.
    ///
    /// An empty noise pattern would match every line and empty the report;
    /// a non-positive bound would reject every hour value.
    pub fn validate(&self) -> ParserResult<()> {
        if self.max_plausible_hours <= Decimal::ZERO {
            return Err(ParserError::InvalidConfig {
                field: "max_plausible_hours".to_string(),
                message: format!(
                    "must be greater than zero, got {}",
                    self.max_plausible_hours
                ),
            });
        }

        if let Some(index) = self.noise_patterns.iter().position(|p| p.is_empty()) {
            return Err(ParserError::InvalidConfig {
                field: "noise_patterns".to_string(),
                message: format!("pattern at index {} is empty", index),
            });
        }

        Ok(())
    }
}
