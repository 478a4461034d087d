//! restic-kit - reports and audits for restic backup pipelines
//!
//! A backup pipeline runs `restic backup`, `check`, `snapshots` and `forget`
//! with `--json` and leaves, per action, a `<name>.exitcode` file next to the
//! captured `<name>.out` (and optionally `<name>.err`). This library turns
//! such a log directory into a typed, chronologically ordered result model,
//! renders a report of it, and audits the snapshot history.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `config`: Audit configuration (thresholds and retention policy)
//! - `restic`: Wire models and parsers for restic's JSON output
//! - `logs`: Artifact discovery and analysis of a log directory
//! - `models`: Result model shared by reports and audit
//! - `audit`: Size-change and retention checks
//! - `reports`: Plain-text backup and audit reports
//! - `display`: Formatting helpers
//! - `export`: JSON, YAML and CSV export of audit results
//! - `notify`: Notification composition and preview
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use restic_kit::audit::run_audit;
//! use restic_kit::config::AuditConfig;
//! use restic_kit::logs::analyze_log_dir;
//! use restic_kit::reports::BackupReport;
//!
//! let analysis = analyze_log_dir(Path::new("/var/log/backup"))?;
//! println!("{}", BackupReport::new(&analysis).format_terminal());
//!
//! let report = run_audit(analysis.snapshots(), &AuditConfig::default());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logs;
pub mod models;
pub mod notify;
pub mod reports;
pub mod restic;

pub use error::{ResticKitError, ResticKitResult};
