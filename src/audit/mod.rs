//! Snapshot audit engine
//!
//! Two independent check families run over the snapshot history of a log
//! directory:
//!
//! - `size`: compares the two latest snapshots of each path group against the
//!   grow/shrink thresholds
//! - `retention`: buckets each path group by calendar unit and compares the
//!   bucket counts with the keep policy
//!
//! Findings are collected as [`AuditViolation`]s into an [`AuditReport`]; the
//! audit fails when that list is non-empty.
//!
//! # Example
//!
//! ```rust,ignore
//! use restic_kit::audit::run_audit;
//! use restic_kit::config::AuditConfig;
//! use restic_kit::logs::analyze_log_dir;
//!
//! let analysis = analyze_log_dir(log_dir)?;
//! let report = run_audit(analysis.snapshots(), &AuditConfig::default());
//! if !report.passed() {
//!     // ...
//! }
//! ```

mod retention;
mod size;
mod violation;

use std::collections::BTreeSet;

use tracing::info;

pub use retention::{bucket_key, check_retention_policy, count_buckets};
pub use size::check_size_changes;
pub use violation::{AuditReport, AuditViolation, CheckType, ViolationDetail};

use crate::config::AuditConfig;
use crate::restic::Snapshot;

/// Run every check over `snapshots`
///
/// Size violations come first, then retention violations.
pub fn run_audit<'a, I>(snapshots: I, config: &AuditConfig) -> AuditReport
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let snapshots: Vec<&Snapshot> = snapshots.into_iter().collect();
    let group_count = snapshots
        .iter()
        .map(|s| s.path_group())
        .collect::<BTreeSet<_>>()
        .len();

    let mut violations = check_size_changes(snapshots.iter().copied(), config);
    violations.extend(check_retention_policy(
        snapshots.iter().copied(),
        &config.retention,
    ));

    let report = AuditReport {
        snapshot_count: snapshots.len(),
        group_count,
        violations,
    };

    info!(
        snapshots = report.snapshot_count,
        groups = report.group_count,
        violations = report.violations.len(),
        "audit {}",
        report.verdict()
    );

    report
}
