//! JSON Export functionality
//!
//! Exports an audit result with schema versioning for machine consumption.

use std::io::Write;

use serde::Serialize;

use crate::audit::{AuditReport, AuditViolation};
use crate::error::{ResticKitError, ResticKitResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Audit export structure
#[derive(Debug, Clone, Serialize)]
pub struct AuditExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Version of restic-kit that produced the export
    pub app_version: &'static str,

    /// `PASSED` or `FAILED`
    pub verdict: &'static str,

    pub snapshot_count: usize,

    pub group_count: usize,

    pub violations: &'a [AuditViolation],
}

impl<'a> AuditExport<'a> {
    pub fn from_report(report: &'a AuditReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            app_version: env!("CARGO_PKG_VERSION"),
            verdict: report.verdict(),
            snapshot_count: report.snapshot_count,
            group_count: report.group_count,
            violations: &report.violations,
        }
    }
}

/// Export an audit result as pretty-printed JSON
pub fn export_audit_json<W: Write>(report: &AuditReport, writer: &mut W) -> ResticKitResult<()> {
    let export = AuditExport::from_report(report);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| ResticKitError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ResticKitError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CheckType;

    #[test]
    fn test_export_json() {
        let report = AuditReport {
            snapshot_count: 2,
            group_count: 1,
            violations: vec![AuditViolation::new(
                CheckType::SizeShrink,
                "/home",
                "-8.3% change exceeds 5.0% threshold",
            )
            .with_detail("change_percent", "-8.3")],
        };

        let mut buffer = Vec::new();
        export_audit_json(&report, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["verdict"], "FAILED");
        assert_eq!(value["snapshot_count"], 2);
        assert_eq!(value["violations"][0]["check_type"], "size_shrink");
        assert_eq!(value["violations"][0]["details"][0]["value"], "-8.3");
    }

    #[test]
    fn test_export_json_passed() {
        let mut buffer = Vec::new();
        export_audit_json(&AuditReport::default(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["verdict"], "PASSED");
        assert_eq!(value["violations"].as_array().unwrap().len(), 0);
    }
}
