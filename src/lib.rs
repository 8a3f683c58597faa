//! Shift attendance extraction for "Scheduled vs Actual Hours" reports.
//!
//! This crate turns the text of a timesheet report into structured shift
//! records: employee, business date, scheduled and actual hours, and
//! clock-in/clock-out punches with midnight crossings resolved. The parsing
//! core lives in [`parsing`] and [`pipeline`]; text extraction, storage and
//! the HTTP surface are collaborators around it.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod source;
pub mod store;
