//! Report CLI command
//!
//! Renders the backup report of a log directory.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::error::ResticKitResult;
use crate::logs::analyze_log_dir;
use crate::notify::{Notification, NotificationSink, PreviewSink};
use crate::reports::BackupReport;

/// Arguments of `restic-kit report`
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding the *.exitcode / *.out / *.err artifacts
    pub log_dir: PathBuf,

    /// Show the notification that would be sent (subject, attachments, body)
    #[arg(long)]
    pub preview: bool,
}

/// Handle the report command
///
/// A FAILURE status is part of the report, not an error.
pub fn handle_report_command<W: Write>(args: &ReportArgs, out: &mut W) -> ResticKitResult<()> {
    let analysis = analyze_log_dir(&args.log_dir)?;

    if args.preview {
        let notification = Notification::backup_report(&analysis);
        PreviewSink::new(&mut *out).deliver(&notification)?;
    } else {
        write!(out, "{}", BackupReport::new(&analysis).format_terminal())?;
    }

    Ok(())
}
