//! Parsed results of the actions recorded in a log directory
//!
//! An [`ActionResult`] carries what every action shares (name, success flag,
//! log file locations) plus an [`ActionOutcome`] holding the kind-specific
//! payload. The set of kinds is closed, so renderers match on it exhaustively.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::format_bytes;
use crate::restic::Snapshot;

/// Action kind, derived from the artifact file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Backup,
    Check,
    Snapshots,
    Forget,
    Unknown,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Backup => write!(f, "backup"),
            ActionKind::Check => write!(f, "check"),
            ActionKind::Snapshots => write!(f, "snapshots"),
            ActionKind::Forget => write!(f, "forget"),
            ActionKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Counters from the summary event of `restic backup`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupResult {
    pub files_new: u64,
    pub files_changed: u64,
    pub files_unmodified: u64,
    pub dirs_new: u64,
    pub dirs_changed: u64,
    pub dirs_unmodified: u64,
    pub data_added: u64,
    pub data_added_packed: u64,
    pub total_files_processed: u64,
    pub total_bytes_processed: u64,
    /// Seconds
    pub total_duration: f64,
}

/// Result of `restic check`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub num_errors: u64,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.num_errors == 0
    }
}

/// Result of `restic forget`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgetResult {
    /// Snapshots kept across all groups
    pub kept: Vec<Snapshot>,
    /// Number of snapshots removed across all groups
    pub removed: usize,
}

/// Kind-specific payload of an action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Backup(BackupResult),
    Check(CheckResult),
    Snapshots(Vec<Snapshot>),
    Forget(ForgetResult),
}

/// The parsed result of one action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    name: String,
    success: bool,
    out_file: PathBuf,
    err_file: PathBuf,
    outcome: ActionOutcome,
}

impl ActionResult {
    pub fn new(
        name: impl Into<String>,
        exit_code: i32,
        out_file: PathBuf,
        err_file: PathBuf,
        outcome: ActionOutcome,
    ) -> Self {
        Self {
            name: name.into(),
            success: exit_code == 0,
            out_file,
            err_file,
            outcome,
        }
    }

    /// Action name: the backup label for backups, the kind otherwise
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn kind(&self) -> ActionKind {
        match self.outcome {
            ActionOutcome::Backup(_) => ActionKind::Backup,
            ActionOutcome::Check(_) => ActionKind::Check,
            ActionOutcome::Snapshots(_) => ActionKind::Snapshots,
            ActionOutcome::Forget(_) => ActionKind::Forget,
        }
    }

    pub fn outcome(&self) -> &ActionOutcome {
        &self.outcome
    }

    /// Heading used in reports, e.g. `backup home` or `check`
    pub fn heading(&self) -> String {
        match self.outcome {
            ActionOutcome::Backup(_) => format!("backup {}", self.name),
            _ => self.kind().to_string(),
        }
    }

    /// Path of the `.out` file this result was parsed from
    pub fn out_file(&self) -> &Path {
        &self.out_file
    }

    /// Path of the `.err` file next to it (may not exist)
    pub fn err_file(&self) -> &Path {
        &self.err_file
    }

    /// Snapshots listed by a snapshots action; empty for other kinds
    pub fn snapshots(&self) -> &[Snapshot] {
        match &self.outcome {
            ActionOutcome::Snapshots(snapshots) => snapshots,
            _ => &[],
        }
    }

    /// Human-readable summary fields keyed by label
    pub fn summary_info(&self) -> BTreeMap<&'static str, String> {
        let mut info = BTreeMap::new();
        match &self.outcome {
            ActionOutcome::Backup(r) => {
                info.insert("files_new", r.files_new.to_string());
                info.insert("files_changed", r.files_changed.to_string());
                info.insert("files_unmodified", r.files_unmodified.to_string());
                info.insert("dirs_new", r.dirs_new.to_string());
                info.insert("dirs_changed", r.dirs_changed.to_string());
                info.insert("dirs_unmodified", r.dirs_unmodified.to_string());
                info.insert("data_added", format_bytes(r.data_added));
                info.insert("data_added_packed", format_bytes(r.data_added_packed));
                info.insert("total_files_processed", r.total_files_processed.to_string());
                info.insert("total_bytes_processed", format_bytes(r.total_bytes_processed));
                if r.total_duration > 0.0 {
                    info.insert("duration", format!("{:.2}", r.total_duration));
                }
            }
            ActionOutcome::Check(r) => {
                info.insert("num_errors", r.num_errors.to_string());
                let status = if r.passed() { "PASSED" } else { "FAILED" };
                info.insert("status", status.to_string());
            }
            ActionOutcome::Snapshots(snapshots) => {
                info.insert("total_snapshots", snapshots.len().to_string());
            }
            ActionOutcome::Forget(r) => {
                info.insert("removed", r.removed.to_string());
                info.insert("kept", r.kept.len().to_string());
                let status = if self.success { "successful" } else { "failed" };
                info.insert("status", status.to_string());
            }
        }
        info
    }
}
