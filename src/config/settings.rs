//! Audit settings for restic-kit
//!
//! Manages the size-change thresholds and the retention policy that the audit
//! engine checks snapshot history against.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResticKitError, ResticKitResult};

/// Calendar granularity used to bucket snapshots for retention checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    /// All granularities, finest first
    pub const ALL: [Granularity; 5] = [
        Granularity::Hourly,
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
        Granularity::Yearly,
    ];

    /// Lowercase name used in check types and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-granularity limits on how many distinct calendar buckets may hold snapshots
///
/// A value of 0 disables the check for that granularity; it never means "keep zero".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    #[serde(default)]
    pub keep_hourly: u32,
    #[serde(default)]
    pub keep_daily: u32,
    #[serde(default)]
    pub keep_weekly: u32,
    #[serde(default)]
    pub keep_monthly: u32,
    #[serde(default)]
    pub keep_yearly: u32,
}

impl RetentionPolicy {
    /// The configured limit for a granularity, or `None` when the check is disabled
    pub fn limit(&self, granularity: Granularity) -> Option<u32> {
        let keep = match granularity {
            Granularity::Hourly => self.keep_hourly,
            Granularity::Daily => self.keep_daily,
            Granularity::Weekly => self.keep_weekly,
            Granularity::Monthly => self.keep_monthly,
            Granularity::Yearly => self.keep_yearly,
        };
        (keep > 0).then_some(keep)
    }

    /// Check if at least one granularity is enabled
    pub fn is_enabled(&self) -> bool {
        Granularity::ALL.iter().any(|g| self.limit(*g).is_some())
    }
}

/// Configuration for the audit engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Growth percentage between the two latest snapshots that is flagged
    #[serde(default = "default_grow_threshold")]
    pub grow_threshold: f64,

    /// Shrink percentage between the two latest snapshots that is flagged
    #[serde(default = "default_shrink_threshold")]
    pub shrink_threshold: f64,

    /// Retention limits
    #[serde(default)]
    pub retention: RetentionPolicy,
}

fn default_grow_threshold() -> f64 {
    20.0
}

fn default_shrink_threshold() -> f64 {
    5.0
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            grow_threshold: default_grow_threshold(),
            shrink_threshold: default_shrink_threshold(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl AuditConfig {
    /// Load audit settings from a JSON file
    pub fn load(path: &Path) -> ResticKitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ResticKitError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ResticKitError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ResticKitResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject thresholds the size-change detector cannot compare against
    pub fn validate(&self) -> ResticKitResult<()> {
        validate_threshold("grow-threshold", self.grow_threshold)?;
        validate_threshold("shrink-threshold", self.shrink_threshold)?;
        Ok(())
    }
}

fn validate_threshold(name: &str, value: f64) -> ResticKitResult<()> {
    if !value.is_finite() {
        return Err(ResticKitError::Config(format!("{} must be a finite number", name)));
    }
    if value < 0.0 {
        return Err(ResticKitError::Config(format!("{} must be non-negative", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert_eq!(config.grow_threshold, 20.0);
        assert_eq!(config.shrink_threshold, 5.0);
        assert!(!config.retention.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_thresholds_rejected() {
        let config = AuditConfig {
            grow_threshold: -1.0,
            ..AuditConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: grow-threshold must be non-negative"
        );

        let config = AuditConfig {
            shrink_threshold: -0.5,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuditConfig {
            grow_threshold: f64::NAN,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limit_disables_granularity() {
        let policy = RetentionPolicy {
            keep_daily: 7,
            ..RetentionPolicy::default()
        };
        assert_eq!(policy.limit(Granularity::Daily), Some(7));
        assert_eq!(policy.limit(Granularity::Hourly), None);
        assert_eq!(policy.limit(Granularity::Yearly), None);
        assert!(policy.is_enabled());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audit.json");
        std::fs::write(&path, r#"{"grow_threshold": 50.0, "retention": {"keep_weekly": 4}}"#)
            .unwrap();

        let config = AuditConfig::load(&path).unwrap();
        assert_eq!(config.grow_threshold, 50.0);
        assert_eq!(config.shrink_threshold, 5.0);
        assert_eq!(config.retention.limit(Granularity::Weekly), Some(4));
        assert_eq!(config.retention.limit(Granularity::Daily), None);
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audit.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AuditConfig::load(&path).unwrap_err();
        assert!(matches!(err, ResticKitError::Config(_)));
    }

    #[test]
    fn test_granularity_display() {
        assert_eq!(Granularity::Weekly.to_string(), "weekly");
        assert_eq!(Granularity::ALL.len(), 5);
    }
}
