//! HTTP API for parsing and importing shift reports.
//!
//! Each request runs its own pipeline. The shift store is the only state
//! shared between requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_UPLOAD_BYTES, create_router};
pub use request::{DocumentQuery, ImportRequest};
pub use response::{ApiError, ApiErrorResponse, ImportResponse, ParseResponse, ShiftsResponse};
pub use state::AppState;
