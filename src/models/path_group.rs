//! Grouping of snapshots into per-target history lines
//!
//! Both the report and the audit regroup snapshots by their joined path list
//! instead of trusting restic's own grouping. Groups come back in key order so
//! that everything downstream is deterministic.

use std::collections::BTreeMap;

use crate::restic::Snapshot;

/// Group snapshots by [`Snapshot::path_group`], keys sorted, input order kept within a group
pub fn group_by_path<'a, I>(snapshots: I) -> BTreeMap<String, Vec<&'a Snapshot>>
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let mut groups: BTreeMap<String, Vec<&'a Snapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        groups.entry(snapshot.path_group()).or_default().push(snapshot);
    }
    groups
}

/// Sort oldest first by parsed time
///
/// The sort is stable; snapshots whose time does not parse sort before all others.
pub fn sort_oldest_first(snapshots: &mut [&Snapshot]) {
    snapshots.sort_by_key(|s| s.parsed_time());
}

/// Sort newest first by parsed time, stable for equal times
pub fn sort_newest_first(snapshots: &mut [&Snapshot]) {
    snapshots.sort_by(|a, b| b.parsed_time().cmp(&a.parsed_time()));
}
