//! Core data models for the shift report parser.
//!
//! Records flow one way through these types: grouped [`RecordBlock`]s are
//! turned into [`ShiftRecord`]s, each carrying its [`PunchInterval`]s.

mod punch;
mod record_block;
mod shift_record;

pub use punch::PunchInterval;
pub use record_block::RecordBlock;
pub use shift_record::{RecordKey, ShiftRecord};
