//! Artifact scanner
//!
//! A log directory holds one `<kind>[.<name>].exitcode` file per action, with
//! the action's JSON output next to it in `<kind>[.<name>].out` and its stderr
//! in `<kind>[.<name>].err`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{ResticKitError, ResticKitResult};
use crate::models::ActionKind;

pub const EXITCODE_SUFFIX: &str = ".exitcode";
pub const OUTPUT_SUFFIX: &str = ".out";
pub const ERROR_SUFFIX: &str = ".err";

/// Everything recorded for one action
#[derive(Debug, Clone)]
pub struct ArtifactPair {
    pub kind: ActionKind,
    /// Backup label for backups, the base name otherwise
    pub name: String,
    pub exit_code: i32,
    /// Raw content of the `.out` file
    pub output_text: String,
    /// Modification time of the `.exitcode` file
    pub modified: SystemTime,
    pub exitcode_path: PathBuf,
    pub out_path: PathBuf,
    pub err_path: PathBuf,
}

/// Classify an artifact by its base name (suffix already stripped)
pub fn classify(base: &str) -> (ActionKind, String) {
    if let Some(name) = base.strip_prefix("backup.") {
        return (ActionKind::Backup, name.to_string());
    }

    let kind = match base {
        "check" => ActionKind::Check,
        "snapshots" => ActionKind::Snapshots,
        "forget" => ActionKind::Forget,
        _ => ActionKind::Unknown,
    };
    (kind, base.to_string())
}

/// List every action recorded in `dir`, oldest first
///
/// Ordering is by modification time of the exit-code file; equal times fall
/// back to the file name so the order never depends on directory iteration.
pub fn scan_log_dir(dir: &Path) -> ResticKitResult<Vec<ArtifactPair>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ResticKitError::discovery(dir, format!("failed to list log directory: {}", e))
    })?;

    let mut exitcode_files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ResticKitError::discovery(dir, format!("failed to read directory entry: {}", e))
        })?;

        let path = entry.path();
        let is_exitcode = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.ends_with(EXITCODE_SUFFIX));

        if is_exitcode && path.is_file() {
            exitcode_files.push(path);
        }
    }

    let mut artifacts = exitcode_files
        .iter()
        .map(|path| read_artifact(path))
        .collect::<ResticKitResult<Vec<_>>>()?;

    artifacts.sort_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.exitcode_path.cmp(&b.exitcode_path))
    });

    Ok(artifacts)
}

/// Read one exit-code file and its sibling output
fn read_artifact(exitcode_path: &Path) -> ResticKitResult<ArtifactPair> {
    let file_name = exitcode_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let base = file_name.strip_suffix(EXITCODE_SUFFIX).unwrap_or(file_name);
    let (kind, name) = classify(base);

    let modified = fs::metadata(exitcode_path)
        .and_then(|m| m.modified())
        .map_err(|e| {
            ResticKitError::discovery(exitcode_path, format!("failed to read file metadata: {}", e))
        })?;

    let exit_code = read_exit_code(exitcode_path)?;

    let out_path = exitcode_path.with_file_name(format!("{}{}", base, OUTPUT_SUFFIX));
    let err_path = exitcode_path.with_file_name(format!("{}{}", base, ERROR_SUFFIX));

    let output_text = fs::read_to_string(&out_path).map_err(|e| {
        let message = if e.kind() == ErrorKind::NotFound {
            "missing output file for exit code artifact".to_string()
        } else {
            format!("failed to read output file: {}", e)
        };
        ResticKitError::discovery(&out_path, message)
    })?;

    debug!(
        path = %exitcode_path.display(),
        kind = %kind,
        name = %name,
        exit_code,
        "discovered artifact"
    );

    Ok(ArtifactPair {
        kind,
        name,
        exit_code,
        output_text,
        modified,
        exitcode_path: exitcode_path.to_path_buf(),
        out_path,
        err_path,
    })
}

/// Read an ASCII decimal exit code, optionally newline-terminated
fn read_exit_code(path: &Path) -> ResticKitResult<i32> {
    let content = fs::read_to_string(path).map_err(|e| {
        ResticKitError::discovery(path, format!("failed to read exit code: {}", e))
    })?;

    content
        .trim()
        .parse()
        .map_err(|e| ResticKitError::format(path, format!("invalid exit code: {}", e)))
}
