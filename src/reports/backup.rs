//! Backup Report
//!
//! Renders the result of one pipeline run: an overall status line followed by
//! one section per action, in the order the actions ran.

use std::collections::BTreeMap;

use crate::display::{format_bytes, format_snapshot_time};
use crate::logs::LogAnalysis;
use crate::models::{group_by_path, sort_newest_first, ActionOutcome, ActionResult};
use crate::restic::Snapshot;

const TIME_WIDTH: usize = 20;
const COUNT_WIDTH: usize = 8;
const SIZE_WIDTH: usize = 12;

/// Plain-text report over a [`LogAnalysis`]
#[derive(Debug, Clone, Copy)]
pub struct BackupReport<'a> {
    analysis: &'a LogAnalysis,
}

impl<'a> BackupReport<'a> {
    pub fn new(analysis: &'a LogAnalysis) -> Self {
        Self { analysis }
    }

    /// `SUCCESS` only when every action succeeded
    pub fn status(&self) -> &'static str {
        self.analysis.status_label()
    }

    /// Format the report for terminal or mail body
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Overall Status: {}\n", self.status()));

        for action in self.analysis.actions() {
            output.push('\n');
            output.push_str(&format!("{} {}\n", status_marker(action), action.heading()));

            match action.outcome() {
                ActionOutcome::Backup(_) => render_backup(&mut output, action),
                ActionOutcome::Check(_) => render_check(&mut output, action),
                ActionOutcome::Snapshots(snapshots) => render_snapshots(&mut output, snapshots),
                ActionOutcome::Forget(result) => {
                    if result.removed > 0 {
                        output.push_str(&format!("  {} snapshots removed\n", result.removed));
                    } else {
                        output.push_str("  No snapshots removed\n");
                    }
                }
            }
        }

        output
    }
}

fn status_marker(action: &ActionResult) -> &'static str {
    if action.is_success() {
        "✅"
    } else {
        "❌"
    }
}

fn render_backup(output: &mut String, action: &ActionResult) {
    let info = action.summary_info();
    let get = |key: &'static str| field(&info, key, "0");

    output.push_str(&format!(
        "  Files: {} new, {} changed, {} unmodified\n",
        get("files_new"),
        get("files_changed"),
        get("files_unmodified")
    ));
    output.push_str(&format!(
        "  Directories: {} new, {} changed, {} unmodified\n",
        get("dirs_new"),
        get("dirs_changed"),
        get("dirs_unmodified")
    ));
    output.push_str(&format!(
        "  Data added: {} ({} packed)\n",
        get("data_added"),
        get("data_added_packed")
    ));
    output.push_str(&format!(
        "  Total files processed: {}\n",
        get("total_files_processed")
    ));
    output.push_str(&format!(
        "  Total bytes processed: {}\n",
        get("total_bytes_processed")
    ));
    if let Some(duration) = info.get("duration") {
        output.push_str(&format!("  Duration: {} seconds\n", duration));
    }
}

fn render_check(output: &mut String, action: &ActionResult) {
    let info = action.summary_info();
    output.push_str(&format!(
        "  Status: {} ({} errors)\n",
        field(&info, "status", "FAILED"),
        field(&info, "num_errors", "0")
    ));
}

fn field<'a>(info: &'a BTreeMap<&'static str, String>, key: &str, default: &'a str) -> &'a str {
    info.get(key).map(String::as_str).unwrap_or(default)
}

fn render_snapshots(output: &mut String, snapshots: &[Snapshot]) {
    output.push_str(&format!("Repository Snapshots: {}\n", snapshots.len()));

    for (path, mut group) in group_by_path(snapshots) {
        sort_newest_first(&mut group);

        output.push('\n');
        output.push_str(&format!("Path: {}\n", path));
        output.push_str(&format!("Snapshots: {}\n", group.len()));
        output.push_str(&table_row(
            "Date & Time",
            "New",
            "Modified",
            "Total Files",
            "Added Size",
            "Total Size",
        ));
        output.push_str(&table_row(
            &"-".repeat(TIME_WIDTH),
            &"-".repeat(COUNT_WIDTH),
            &"-".repeat(COUNT_WIDTH),
            &"-".repeat(SIZE_WIDTH),
            &"-".repeat(SIZE_WIDTH),
            &"-".repeat(SIZE_WIDTH),
        ));

        for snapshot in group {
            let summary = &snapshot.summary;
            output.push_str(&table_row(
                &format_snapshot_time(&snapshot.time, snapshot.parsed_time(), TIME_WIDTH),
                &summary.files_new.to_string(),
                &summary.files_changed.to_string(),
                &summary.total_files_processed.to_string(),
                &format_bytes(summary.data_added),
                &format_bytes(summary.total_bytes_processed),
            ));
        }
    }
}

fn table_row(time: &str, new: &str, modified: &str, files: &str, added: &str, total: &str) -> String {
    format!(
        "{:<tw$} | {:>cw$} | {:>cw$} | {:>sw$} | {:>sw$} | {:>sw$}\n",
        time,
        new,
        modified,
        files,
        added,
        total,
        tw = TIME_WIDTH,
        cw = COUNT_WIDTH,
        sw = SIZE_WIDTH
    )
}
