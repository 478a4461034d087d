//! Result model for restic-kit
//!
//! This module contains the data structures every consumer of a parsed log
//! directory works with: the per-action results and the path grouping of
//! snapshots.

pub mod path_group;
pub mod result;

pub use path_group::{group_by_path, sort_newest_first, sort_oldest_first};
pub use result::{
    ActionKind, ActionOutcome, ActionResult, BackupResult, CheckResult, ForgetResult,
};
