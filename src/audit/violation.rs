//! Audit findings
//!
//! A violation is a finding about the snapshot history, not an error: the audit
//! always runs to completion and reports every violation it found.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::Granularity;

/// Which check produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckType {
    SizeGrowth,
    SizeShrink,
    Retention(Granularity),
}

impl CheckType {
    /// Stable identifier, e.g. `size_growth` or `retention_weekly`
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::SizeGrowth => "size_growth",
            CheckType::SizeShrink => "size_shrink",
            CheckType::Retention(Granularity::Hourly) => "retention_hourly",
            CheckType::Retention(Granularity::Daily) => "retention_daily",
            CheckType::Retention(Granularity::Weekly) => "retention_weekly",
            CheckType::Retention(Granularity::Monthly) => "retention_monthly",
            CheckType::Retention(Granularity::Yearly) => "retention_yearly",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CheckType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One key/value pair of a violation's details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationDetail {
    pub key: String,
    pub value: String,
}

/// A single failed audit check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditViolation {
    pub check_type: CheckType,
    /// Path group the violation is about
    pub path: String,
    pub message: String,
    /// Ordered details for reports
    pub details: Vec<ViolationDetail>,
}

impl AuditViolation {
    pub fn new(check_type: CheckType, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_type,
            path: path.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Append a detail, keeping insertion order
    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.push(ViolationDetail {
            key: key.to_string(),
            value: value.into(),
        });
        self
    }

    /// Look up a detail value by key
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.as_str())
    }
}

/// Outcome of auditing one snapshot history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Number of snapshots audited
    pub snapshot_count: usize,
    /// Number of distinct path groups
    pub group_count: usize,
    /// Size violations first, then retention violations, each in path order
    pub violations: Vec<AuditViolation>,
}

impl AuditReport {
    /// True when no check failed
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// `PASSED` or `FAILED`
    pub fn verdict(&self) -> &'static str {
        if self.passed() {
            "PASSED"
        } else {
            "FAILED"
        }
    }

    /// Violations grouped by check type, in check type order
    pub fn by_check_type(&self) -> BTreeMap<CheckType, Vec<&AuditViolation>> {
        let mut grouped: BTreeMap<CheckType, Vec<&AuditViolation>> = BTreeMap::new();
        for violation in &self.violations {
            grouped.entry(violation.check_type).or_default().push(violation);
        }
        grouped
    }
}
