//! Wire models for restic's `--json` output
//!
//! Every field is defaulted: restic omits zero values and older versions lack
//! whole sections, and a missing field must read as zero rather than fail.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One line of `restic backup --json` output
///
/// Status, verbose and summary events share this shape; only the summary
/// event fills in the counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResticMessage {
    pub message_type: String,
    pub files_new: u64,
    pub files_changed: u64,
    pub files_unmodified: u64,
    pub dirs_new: u64,
    pub dirs_changed: u64,
    pub dirs_unmodified: u64,
    pub data_blobs: u64,
    pub tree_blobs: u64,
    pub data_added: u64,
    pub data_added_packed: u64,
    pub total_files_processed: u64,
    pub total_bytes_processed: u64,
    pub total_duration: f64,
    pub snapshot_id: Option<String>,
    /// Set by `restic check --json`
    pub num_errors: u64,
}

/// Summary block stored inside each snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSummary {
    pub backup_start: String,
    pub backup_end: String,
    pub files_new: u64,
    pub files_changed: u64,
    pub files_unmodified: u64,
    pub dirs_new: u64,
    pub dirs_changed: u64,
    pub dirs_unmodified: u64,
    pub data_blobs: u64,
    pub tree_blobs: u64,
    pub data_added: u64,
    pub data_added_packed: u64,
    pub total_files_processed: u64,
    pub total_bytes_processed: u64,
}

/// A restic snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub id: String,
    pub short_id: String,
    /// RFC 3339 timestamp with nanoseconds and offset
    pub time: String,
    pub parent: String,
    pub tree: String,
    pub paths: Vec<String>,
    pub hostname: String,
    pub username: String,
    pub tags: Option<Vec<String>>,
    pub program_version: String,
    pub summary: BackupSummary,
}

impl Snapshot {
    /// Join key identifying the backup target: the paths, in order, joined by ", "
    pub fn path_group(&self) -> String {
        self.paths.join(", ")
    }

    /// The snapshot time in its own offset, or `None` if it is not valid RFC 3339
    pub fn parsed_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.time).ok()
    }
}

/// Key restic grouped a set of snapshots by
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupKey {
    pub hostname: String,
    pub paths: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// One element of `restic snapshots --json --group-by ...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotGroup {
    pub group_key: GroupKey,
    pub snapshots: Vec<Snapshot>,
}

/// Why a snapshot was kept by `restic forget`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeepReason {
    pub snapshot: Snapshot,
    pub matches: Vec<String>,
}

/// One element of `restic forget --json`
///
/// restic writes `null` rather than `[]` for empty keep/remove lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgetGroup {
    pub tags: Option<Vec<String>>,
    pub host: String,
    pub paths: Option<Vec<String>>,
    pub keep: Option<Vec<Snapshot>>,
    pub remove: Option<Vec<Snapshot>>,
    pub reasons: Option<Vec<KeepReason>>,
}

impl ForgetGroup {
    pub fn kept(&self) -> &[Snapshot] {
        self.keep.as_deref().unwrap_or_default()
    }

    pub fn removed(&self) -> &[Snapshot] {
        self.remove.as_deref().unwrap_or_default()
    }
}
