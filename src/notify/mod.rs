//! Notification composition
//!
//! restic-kit builds the message (subject, body, attachments) but does not
//! deliver it. Delivery goes through a [`NotificationSink`]; the only sink
//! shipped here is [`PreviewSink`], which prints what would be sent.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::audit::AuditReport;
use crate::error::ResticKitResult;
use crate::logs::LogAnalysis;
use crate::reports::{format_audit_email_body, BackupReport};

/// A composed notification, ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    /// Files to attach, in action order
    pub attachments: Vec<PathBuf>,
}

impl Notification {
    /// Report for one pipeline run
    ///
    /// The `.out` and `.err` logs of failed actions are attached when they exist.
    pub fn backup_report(analysis: &LogAnalysis) -> Self {
        let report = BackupReport::new(analysis);

        let attachments = analysis
            .failed_actions()
            .flat_map(|action| [action.out_file(), action.err_file()])
            .filter(|path| path.is_file())
            .map(|path| path.to_path_buf())
            .collect();

        Self {
            subject: format!("Backup Report: {}", report.status()),
            body: report.format_terminal(),
            attachments,
        }
    }

    /// Notification for an audit that found violations
    pub fn audit_failure(report: &AuditReport) -> Self {
        Self {
            subject: "Audit Report: FAILURES DETECTED".to_string(),
            body: format_audit_email_body(report),
            attachments: Vec::new(),
        }
    }
}

/// Delivers composed notifications
pub trait NotificationSink {
    fn deliver(&mut self, notification: &Notification) -> ResticKitResult<()>;
}

/// Sink that writes a dry-run preview instead of sending
pub struct PreviewSink<W: Write> {
    writer: W,
}

impl<W: Write> PreviewSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NotificationSink for PreviewSink<W> {
    fn deliver(&mut self, notification: &Notification) -> ResticKitResult<()> {
        debug!(
            subject = %notification.subject,
            attachments = notification.attachments.len(),
            "previewing notification"
        );

        writeln!(
            self.writer,
            "DRY RUN: Would send email with subject: {}",
            notification.subject
        )?;
        for attachment in &notification.attachments {
            writeln!(self.writer, "DRY RUN: Would attach: {}", attachment.display())?;
        }
        writeln!(self.writer, "DRY RUN: Email body preview:")?;
        writeln!(self.writer, "{}", notification.body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditViolation, CheckType};
    use crate::models::{ActionOutcome, ActionResult, BackupResult, CheckResult};
    use std::fs;
    use tempfile::TempDir;

    fn action(dir: &std::path::Path, base: &str, exit_code: i32, outcome: ActionOutcome) -> ActionResult {
        ActionResult::new(
            base.trim_start_matches("backup."),
            exit_code,
            dir.join(format!("{}.out", base)),
            dir.join(format!("{}.err", base)),
            outcome,
        )
    }

    #[test]
    fn test_backup_report_attaches_failed_logs_only() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("backup.home.out"), "{}").unwrap();
        fs::write(dir.join("backup.home.err"), "boom").unwrap();
        fs::write(dir.join("backup.srv.out"), "{}").unwrap();
        fs::write(dir.join("check.out"), "{}").unwrap();
        fs::write(dir.join("check.err"), "").unwrap();

        let analysis = LogAnalysis::new(
            dir.to_path_buf(),
            vec![
                action(dir, "backup.home", 1, ActionOutcome::Backup(BackupResult::default())),
                action(dir, "backup.srv", 3, ActionOutcome::Backup(BackupResult::default())),
                action(dir, "check", 0, ActionOutcome::Check(CheckResult::default())),
            ],
        );
        let notification = Notification::backup_report(&analysis);

        assert_eq!(notification.subject, "Backup Report: FAILURE");
        assert!(notification.body.starts_with("Overall Status: FAILURE\n"));
        assert_eq!(
            notification.attachments,
            vec![
                dir.join("backup.home.out"),
                dir.join("backup.home.err"),
                dir.join("backup.srv.out"),
            ]
        );
    }

    #[test]
    fn test_successful_run_has_no_attachments() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("check.out"), "{}").unwrap();

        let analysis = LogAnalysis::new(
            dir.to_path_buf(),
            vec![action(dir, "check", 0, ActionOutcome::Check(CheckResult::default()))],
        );
        let notification = Notification::backup_report(&analysis);

        assert_eq!(notification.subject, "Backup Report: SUCCESS");
        assert!(notification.attachments.is_empty());
    }

    #[test]
    fn test_preview_sink_output() {
        let report = AuditReport {
            snapshot_count: 2,
            group_count: 1,
            violations: vec![AuditViolation::new(CheckType::SizeGrowth, "/home", "size grew")],
        };
        let notification = Notification::audit_failure(&report);

        let mut sink = PreviewSink::new(Vec::new());
        sink.deliver(&notification).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.starts_with(
            "DRY RUN: Would send email with subject: Audit Report: FAILURES DETECTED\n\
             DRY RUN: Email body preview:\n\
             Audit Report: FAILURES DETECTED\n"
        ));
        assert!(text.contains("=== SIZE_GROWTH ===\nPath: /home\nIssue: size grew\n"));
    }
}
