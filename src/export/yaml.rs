//! YAML Export functionality
//!
//! Same document as the JSON export, for readers who prefer YAML.

use std::io::Write;

use crate::audit::AuditReport;
use crate::error::{ResticKitError, ResticKitResult};
use crate::export::json::AuditExport;

/// Export an audit result to YAML format
pub fn export_audit_yaml<W: Write>(report: &AuditReport, writer: &mut W) -> ResticKitResult<()> {
    let export = AuditExport::from_report(report);

    writeln!(writer, "# restic-kit audit export")
        .map_err(|e| ResticKitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ResticKitError::Export(e.to_string()))?;

    Ok(())
}
