//! Reports module for restic-kit
//!
//! Plain-text renderings of a parsed log directory and of an audit result.
//! Rendering is pure: the same input always yields the same text.

pub mod audit;
pub mod backup;

pub use audit::{format_audit_email_body, format_audit_summary};
pub use backup::BackupReport;
