//! Configuration loading for the shift report parser.
//!
//! The parser ships with defaults for the fixed "Scheduled vs Actual Hours"
//! layout. A YAML file can override the noise patterns, the plausibility
//! bound, the snapshot directory and the log level.
//!
//! # Example
//!
//! ```no_run
//! use shift_report_parser::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/parser.yaml").unwrap();
//! println!("Plausibility bound: {} hours", config.max_plausible_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_MAX_PLAUSIBLE_HOURS, DEFAULT_NOISE_PATTERNS, ParserConfig};
