//! Retention policy checker
//!
//! Snapshots of a path group are bucketed by calendar unit in their own UTC
//! offset. The number of distinct buckets, not the number of snapshots, is
//! compared against the configured keep count.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike};
use tracing::warn;

use super::violation::{AuditViolation, CheckType};
use crate::config::{Granularity, RetentionPolicy};
use crate::models::group_by_path;
use crate::restic::Snapshot;

/// Bucket a snapshot time falls into for a granularity
///
/// Weekly buckets are keyed by the Monday on or before the snapshot's date.
pub fn bucket_key(granularity: Granularity, time: &DateTime<FixedOffset>) -> String {
    match granularity {
        Granularity::Hourly => format!(
            "{}-{:02}-{:02}-{:02}",
            time.year(),
            time.month(),
            time.day(),
            time.hour()
        ),
        Granularity::Daily => format!("{}-{:02}-{:02}", time.year(), time.month(), time.day()),
        Granularity::Weekly => {
            let date = time.date_naive();
            let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
            format!("{}-{:02}-{:02}", monday.year(), monday.month(), monday.day())
        }
        Granularity::Monthly => format!("{}-{:02}", time.year(), time.month()),
        Granularity::Yearly => time.year().to_string(),
    }
}

/// Number of distinct buckets populated by `times`
pub fn count_buckets(granularity: Granularity, times: &[DateTime<FixedOffset>]) -> usize {
    times
        .iter()
        .map(|t| bucket_key(granularity, t))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Flag every path group and granularity whose bucket count exceeds the keep limit
///
/// Snapshots with unparsable times are left out of this check only.
pub fn check_retention_policy<'a, I>(snapshots: I, policy: &RetentionPolicy) -> Vec<AuditViolation>
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let mut violations = Vec::new();
    if !policy.is_enabled() {
        return violations;
    }

    for (path, group) in group_by_path(snapshots) {
        let mut times: Vec<DateTime<FixedOffset>> = group
            .iter()
            .filter_map(|snapshot| {
                let parsed = snapshot.parsed_time();
                if parsed.is_none() {
                    warn!(
                        path = %path,
                        snapshot = %snapshot.id,
                        time = %snapshot.time,
                        "unparsable snapshot time, excluded from retention check"
                    );
                }
                parsed
            })
            .collect();
        times.sort();

        for granularity in Granularity::ALL {
            let Some(keep) = policy.limit(granularity) else {
                continue;
            };

            let actual = count_buckets(granularity, &times);
            if actual > keep as usize {
                violations.push(
                    AuditViolation::new(
                        CheckType::Retention(granularity),
                        path.clone(),
                        format!("too many {} snapshots: {} > {}", granularity, actual, keep),
                    )
                    .with_detail("policy", granularity.as_str())
                    .with_detail("actual", actual.to_string())
                    .with_detail("expected", keep.to_string())
                    .with_detail("total_snaps", times.len().to_string()),
                );
            }
        }
    }

    violations
}
