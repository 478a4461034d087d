//! Display formatting for terminal output
//!
//! Provides utilities for formatting sizes, percentages and snapshot times
//! for the plain-text reports.

pub mod format;

pub use format::{format_bytes, format_percent, format_snapshot_time};
