//! Size-change detector
//!
//! For each path group only the two most recent snapshots are compared, so the
//! check follows the current trend rather than historical drift.

use tracing::debug;

use super::violation::{AuditViolation, CheckType};
use crate::config::AuditConfig;
use crate::display::{format_bytes, format_percent};
use crate::models::{group_by_path, sort_oldest_first};
use crate::restic::Snapshot;

/// Flag abnormal growth or shrinkage between the two latest snapshots of each path group
///
/// Groups with fewer than two snapshots, or whose earlier snapshot processed
/// zero bytes, are skipped. The threshold is inclusive.
pub fn check_size_changes<'a, I>(snapshots: I, config: &AuditConfig) -> Vec<AuditViolation>
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let mut violations = Vec::new();

    for (path, mut group) in group_by_path(snapshots) {
        if group.len() < 2 {
            continue;
        }

        sort_oldest_first(&mut group);
        let previous = group[group.len() - 2];
        let current = group[group.len() - 1];

        let previous_bytes = previous.summary.total_bytes_processed;
        let current_bytes = current.summary.total_bytes_processed;
        if previous_bytes == 0 {
            debug!(path = %path, "previous snapshot has no size, skipping size check");
            continue;
        }

        let change_percent =
            (current_bytes as f64 - previous_bytes as f64) / previous_bytes as f64 * 100.0;

        let (check_type, threshold) = if change_percent > 0.0 {
            (CheckType::SizeGrowth, config.grow_threshold)
        } else {
            (CheckType::SizeShrink, config.shrink_threshold)
        };

        if change_percent.abs() >= threshold {
            let message = format!(
                "{}% change exceeds {}% threshold",
                format_percent(change_percent),
                format_percent(threshold)
            );
            violations.push(
                AuditViolation::new(check_type, path, message)
                    .with_detail("previous_size", format_bytes(previous_bytes))
                    .with_detail("current_size", format_bytes(current_bytes))
                    .with_detail("change_percent", format_percent(change_percent))
                    .with_detail("threshold", format_percent(threshold))
                    .with_detail("previous_time", previous.time.clone())
                    .with_detail("current_time", current.time.clone()),
            );
        }
    }

    violations
}
