//! Configuration module for restic-kit
//!
//! This module provides the audit configuration surface:
//! - Size-change thresholds
//! - Per-granularity retention limits
//! - Loading from a JSON config file

pub mod settings;

pub use settings::{AuditConfig, Granularity, RetentionPolicy};
