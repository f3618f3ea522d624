//! GitHub Issues adapter.
//!
//! Provides the issue-tracker side of the rollover: listing open diary
//! issues, listing their comments, closing them, and creating the next
//! day's entry.

pub mod client;
pub mod models;
