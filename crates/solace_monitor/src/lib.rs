//! Safety monitoring: score an utterance, keep the audit trail.
//!
//! [`detector::analyze`] is a pure, total classifier — any string in,
//! a well-defined [`solace_core::SignalReport`] out. [`EventLog`]
//! appends those verdicts to a durable, ordered history for caregiver
//! review.

pub mod detector;
pub mod event_log;

pub use detector::analyze;
pub use event_log::EventLog;
