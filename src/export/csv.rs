//! CSV Export functionality
//!
//! One row per violation. Details are flattened into a single
//! `key=value; key=value` column in insertion order.

use std::io::Write;

use crate::audit::{AuditReport, AuditViolation};
use crate::error::{ResticKitError, ResticKitResult};

/// Column headers of the CSV export
pub const CSV_HEADER: [&str; 4] = ["check_type", "path", "message", "details"];

fn flatten_details(violation: &AuditViolation) -> String {
    violation
        .details
        .iter()
        .map(|d| format!("{}={}", d.key, d.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Export the violations of an audit result to CSV
pub fn export_audit_csv<W: Write>(report: &AuditReport, writer: &mut W) -> ResticKitResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ResticKitError::Export(e.to_string()))?;

    for violation in &report.violations {
        csv_writer
            .write_record([
                violation.check_type.as_str(),
                violation.path.as_str(),
                violation.message.as_str(),
                flatten_details(violation).as_str(),
            ])
            .map_err(|e| ResticKitError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ResticKitError::Export(e.to_string()))?;

    Ok(())
}
