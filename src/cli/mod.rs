//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the log analysis and audit layers.

pub mod audit;
pub mod report;

pub use audit::{handle_audit_command, AuditArgs, OutputFormat};
pub use report::{handle_report_command, ReportArgs};
