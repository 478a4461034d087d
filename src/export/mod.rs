//! Export module for restic-kit
//!
//! Machine-readable renderings of an audit result:
//! - JSON: versioned document with verdict, counts and violations
//! - YAML: the same document, human-readable
//! - CSV: one row per violation (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use crate::audit::AuditReport;
use crate::error::ResticKitResult;

pub use self::csv::{export_audit_csv, CSV_HEADER};
pub use json::{export_audit_json, AuditExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_audit_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

/// Write `report` to `writer` in the given format
pub fn export_audit<W: Write>(
    report: &AuditReport,
    format: ExportFormat,
    writer: &mut W,
) -> ResticKitResult<()> {
    match format {
        ExportFormat::Json => export_audit_json(report, writer),
        ExportFormat::Yaml => export_audit_yaml(report, writer),
        ExportFormat::Csv => export_audit_csv(report, writer),
    }
}
