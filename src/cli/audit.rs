//! Audit CLI command
//!
//! Runs the size and retention checks over the snapshot listing of a log
//! directory and prints the verdict.

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::audit::{run_audit, AuditReport};
use crate::config::AuditConfig;
use crate::error::{ResticKitError, ResticKitResult};
use crate::export::{export_audit, ExportFormat};
use crate::logs::analyze_log_dir;
use crate::notify::{Notification, NotificationSink, PreviewSink};
use crate::reports::format_audit_summary;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable verdict
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// One CSV row per violation
    Csv,
}

/// Arguments of `restic-kit audit`
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Directory holding the *.exitcode / *.out / *.err artifacts
    pub log_dir: PathBuf,

    /// JSON file with audit settings
    #[arg(short, long, env = "RESTIC_KIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Growth percentage that is flagged (default 20)
    #[arg(long, allow_negative_numbers = true)]
    pub grow_threshold: Option<f64>,

    /// Shrink percentage that is flagged (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub shrink_threshold: Option<f64>,

    /// Maximum number of hourly buckets per path (0 disables)
    #[arg(long)]
    pub keep_hourly: Option<u32>,

    /// Maximum number of daily buckets per path (0 disables)
    #[arg(long)]
    pub keep_daily: Option<u32>,

    /// Maximum number of weekly buckets per path (0 disables)
    #[arg(long)]
    pub keep_weekly: Option<u32>,

    /// Maximum number of monthly buckets per path (0 disables)
    #[arg(long)]
    pub keep_monthly: Option<u32>,

    /// Maximum number of yearly buckets per path (0 disables)
    #[arg(long)]
    pub keep_yearly: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also show the failure notification that would be sent
    #[arg(long)]
    pub preview: bool,
}

impl AuditArgs {
    /// Settings file (if any) with command-line overrides applied, validated
    pub fn resolve_config(&self) -> ResticKitResult<AuditConfig> {
        let mut config = AuditConfig::load_or_default(self.config.as_deref())?;

        if let Some(value) = self.grow_threshold {
            config.grow_threshold = value;
        }
        if let Some(value) = self.shrink_threshold {
            config.shrink_threshold = value;
        }

        let retention = &mut config.retention;
        let overrides = [
            (&mut retention.keep_hourly, self.keep_hourly),
            (&mut retention.keep_daily, self.keep_daily),
            (&mut retention.keep_weekly, self.keep_weekly),
            (&mut retention.keep_monthly, self.keep_monthly),
            (&mut retention.keep_yearly, self.keep_yearly),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Handle the audit command
///
/// Returns the report so the caller can map the verdict to an exit status.
pub fn handle_audit_command<W: Write>(args: &AuditArgs, out: &mut W) -> ResticKitResult<AuditReport> {
    let config = args.resolve_config()?;
    debug!(?config, "resolved audit configuration");

    let analysis = analyze_log_dir(&args.log_dir)?;
    if !analysis.has_snapshot_listing() {
        return Err(ResticKitError::discovery(
            analysis.log_dir().join("snapshots.out"),
            "no snapshots artifact to audit",
        ));
    }
    let report = run_audit(analysis.snapshots(), &config);

    match args.format {
        OutputFormat::Text => write!(out, "{}", format_audit_summary(&report))?,
        OutputFormat::Json => export_audit(&report, ExportFormat::Json, out)?,
        OutputFormat::Yaml => export_audit(&report, ExportFormat::Yaml, out)?,
        OutputFormat::Csv => export_audit(&report, ExportFormat::Csv, out)?,
    }

    if args.preview && !report.passed() {
        PreviewSink::new(&mut *out).deliver(&Notification::audit_failure(&report))?;
    }

    Ok(report)
}
