//! Log directory analysis
//!
//! Runs the scanner, hands each artifact to the parser for its kind and
//! collects the results in execution order.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::scanner::{scan_log_dir, ArtifactPair};
use crate::error::ResticKitResult;
use crate::models::{ActionKind, ActionOutcome, ActionResult};
use crate::restic::{
    parse_backup_output, parse_check_output, parse_forget_output, parse_snapshots_output, Snapshot,
};

/// The parsed contents of one log directory
#[derive(Debug, Clone)]
pub struct LogAnalysis {
    log_dir: PathBuf,
    actions: Vec<ActionResult>,
}

impl LogAnalysis {
    pub fn new(log_dir: PathBuf, actions: Vec<ActionResult>) -> Self {
        Self { log_dir, actions }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Actions in chronological order
    pub fn actions(&self) -> &[ActionResult] {
        &self.actions
    }

    /// True only if every recorded action exited with 0
    pub fn overall_success(&self) -> bool {
        self.actions.iter().all(ActionResult::is_success)
    }

    /// `SUCCESS` or `FAILURE`
    pub fn status_label(&self) -> &'static str {
        if self.overall_success() {
            "SUCCESS"
        } else {
            "FAILURE"
        }
    }

    pub fn failed_actions(&self) -> impl Iterator<Item = &ActionResult> {
        self.actions.iter().filter(|a| !a.is_success())
    }

    /// Snapshots from every snapshots action, in order
    pub fn snapshots(&self) -> Vec<&Snapshot> {
        self.actions.iter().flat_map(|a| a.snapshots()).collect()
    }

    /// Check if the directory recorded a snapshot listing at all
    pub fn has_snapshot_listing(&self) -> bool {
        self.actions.iter().any(|a| a.kind() == ActionKind::Snapshots)
    }
}

/// Parse one artifact; `None` for artifacts of unknown kind
pub fn parse_artifact(artifact: &ArtifactPair) -> ResticKitResult<Option<ActionResult>> {
    let text = artifact.output_text.as_str();
    let source = artifact.out_path.as_path();

    let outcome = match artifact.kind {
        ActionKind::Backup => ActionOutcome::Backup(parse_backup_output(text, source)?),
        ActionKind::Check => ActionOutcome::Check(parse_check_output(text, source)?),
        ActionKind::Snapshots => ActionOutcome::Snapshots(parse_snapshots_output(text, source)?),
        ActionKind::Forget => ActionOutcome::Forget(parse_forget_output(text, source)?),
        ActionKind::Unknown => {
            warn!(path = %artifact.exitcode_path.display(), "skipping artifact of unknown kind");
            return Ok(None);
        }
    };

    debug!(path = %source.display(), kind = %artifact.kind, "parsed artifact output");

    Ok(Some(ActionResult::new(
        artifact.name.clone(),
        artifact.exit_code,
        artifact.out_path.clone(),
        artifact.err_path.clone(),
        outcome,
    )))
}

/// Scan and parse a whole log directory
///
/// Any discovery or format error aborts the analysis; there are no partial results.
pub fn analyze_log_dir(log_dir: &Path) -> ResticKitResult<LogAnalysis> {
    let artifacts = scan_log_dir(log_dir)?;

    let mut actions = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        if let Some(action) = parse_artifact(artifact)? {
            actions.push(action);
        }
    }

    Ok(LogAnalysis::new(log_dir.to_path_buf(), actions))
}
