//! Audit Report
//!
//! Two renderings of an [`AuditReport`]: a short verdict for the terminal and a
//! longer body, grouped by check type, for notifications.

use crate::audit::AuditReport;

/// Verdict line followed by one `- <check_type>: <message>` line per violation
pub fn format_audit_summary(report: &AuditReport) -> String {
    if report.passed() {
        return "Audit PASSED: All checks successful\n".to_string();
    }

    let mut output = format!("Audit FAILED: {} checks failed\n", report.violations.len());
    for violation in &report.violations {
        output.push_str(&format!("- {}: {}\n", violation.check_type, violation.message));
    }
    output
}

/// Body for an audit failure notification
///
/// Check types appear in a fixed order, violations keep their audit order and
/// details keep their insertion order, so the body is stable across runs.
pub fn format_audit_email_body(report: &AuditReport) -> String {
    let mut output = String::from("Audit Report: FAILURES DETECTED\n\n");
    output.push_str(&format!(
        "Total failed checks: {}\n\n",
        report.violations.len()
    ));

    for (check_type, violations) in report.by_check_type() {
        output.push_str(&format!(
            "=== {} ===\n",
            check_type.as_str().to_uppercase()
        ));
        for violation in violations {
            output.push_str(&format!("Path: {}\n", violation.path));
            output.push_str(&format!("Issue: {}\n", violation.message));
            if !violation.details.is_empty() {
                output.push_str("Details:\n");
                for detail in &violation.details {
                    output.push_str(&format!("  {}: {}\n", detail.key, detail.value));
                }
            }
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
