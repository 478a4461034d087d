//! restic output handling
//!
//! restic-kit never runs restic itself. It reads what the pipeline captured
//! from `restic backup`, `check`, `snapshots` and `forget` (all with `--json`)
//! and turns it into typed values.
//!
//! - `models`: serde mirrors of restic's JSON
//! - `parser`: one parser per action kind

pub mod models;
pub mod parser;

pub use models::{BackupSummary, ForgetGroup, GroupKey, ResticMessage, Snapshot, SnapshotGroup};
pub use parser::{
    parse_backup_output, parse_check_output, parse_forget_output, parse_snapshots_output,
};
