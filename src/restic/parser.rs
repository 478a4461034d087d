//! Parsers for the four restic output shapes
//!
//! Each parser takes the raw `.out` content plus the path it was read from, so
//! that a malformed artifact is reported by name.

use std::path::Path;

use tracing::debug;

use super::models::{ForgetGroup, ResticMessage, Snapshot, SnapshotGroup};
use crate::error::{ResticKitError, ResticKitResult};
use crate::models::{BackupResult, CheckResult, ForgetResult};

/// Parse `restic backup --json` output
///
/// The output is JSON lines; only the last non-empty line, the summary event,
/// is read. Empty output yields an all-zero result.
pub fn parse_backup_output(content: &str, source: &Path) -> ResticKitResult<BackupResult> {
    let Some(last_line) = content.lines().map(str::trim).rev().find(|l| !l.is_empty()) else {
        debug!(path = %source.display(), "empty backup output, using zero summary");
        return Ok(BackupResult::default());
    };

    let msg: ResticMessage = serde_json::from_str(last_line).map_err(|e| {
        ResticKitError::format(source, format!("failed to parse backup summary JSON: {}", e))
    })?;

    if msg.message_type != "summary" {
        debug!(
            path = %source.display(),
            message_type = %msg.message_type,
            "last backup line is not a summary event"
        );
    }

    Ok(BackupResult {
        files_new: msg.files_new,
        files_changed: msg.files_changed,
        files_unmodified: msg.files_unmodified,
        dirs_new: msg.dirs_new,
        dirs_changed: msg.dirs_changed,
        dirs_unmodified: msg.dirs_unmodified,
        data_added: msg.data_added,
        data_added_packed: msg.data_added_packed,
        total_files_processed: msg.total_files_processed,
        total_bytes_processed: msg.total_bytes_processed,
        total_duration: msg.total_duration,
    })
}

/// Parse `restic check --json` output, a single JSON object
///
/// A literal `null` reads as a check without errors.
pub fn parse_check_output(content: &str, source: &Path) -> ResticKitResult<CheckResult> {
    let msg: ResticMessage = serde_json::from_str::<Option<ResticMessage>>(content)
        .map_err(|e| {
            ResticKitError::format(source, format!("failed to parse check output as JSON: {}", e))
        })?
        .unwrap_or_default();

    Ok(CheckResult {
        num_errors: msg.num_errors,
    })
}

/// Parse `restic snapshots --json` output
///
/// The groups are flattened into one list in input order. A literal `null`
/// reads as an empty listing.
pub fn parse_snapshots_output(content: &str, source: &Path) -> ResticKitResult<Vec<Snapshot>> {
    let groups: Vec<SnapshotGroup> = serde_json::from_str::<Option<Vec<SnapshotGroup>>>(content)
        .map_err(|e| {
            ResticKitError::format(
                source,
                format!("failed to parse snapshots output as JSON: {}", e),
            )
        })?
        .unwrap_or_default();

    Ok(groups.into_iter().flat_map(|g| g.snapshots).collect())
}

/// Parse `restic forget --json` output
///
/// restic may print plain-text lines around the JSON, so only the first line
/// beginning with `[` is parsed, and it must hold the whole array.
pub fn parse_forget_output(content: &str, source: &Path) -> ResticKitResult<ForgetResult> {
    let line = find_array_line(content)
        .ok_or_else(|| ResticKitError::format(source, "no JSON content found in forget output"))?;

    let groups: Vec<ForgetGroup> = serde_json::from_str(line).map_err(|e| {
        ResticKitError::format(source, format!("failed to parse forget output as JSON: {}", e))
    })?;

    let mut result = ForgetResult::default();
    for group in &groups {
        result.kept.extend_from_slice(group.kept());
        result.removed += group.removed().len();
    }

    Ok(result)
}

/// First line whose trimmed content starts with `[`, trimmed
fn find_array_line(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('['))
}
