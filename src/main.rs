use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use restic_kit::cli::{handle_audit_command, handle_report_command, AuditArgs, ReportArgs};

/// Exit status when the audit found violations
const EXIT_AUDIT_FAILED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "restic-kit",
    author = "Kaylee Beyene",
    version,
    about = "Reports and audits for restic backup pipelines",
    long_about = "restic-kit reads the exit codes and JSON output that a restic \
                  backup pipeline leaves in a log directory, renders a report of \
                  the run, and audits the snapshot history for size anomalies and \
                  retention policy violations."
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report of a pipeline run
    Report(ReportArgs),

    /// Audit snapshots for size anomalies and retention policy compliance
    Audit(AuditArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Report(args) => {
            handle_report_command(&args, &mut out)
                .with_context(|| format!("failed to report on {}", args.log_dir.display()))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Audit(args) => {
            let report = handle_audit_command(&args, &mut out)
                .with_context(|| format!("failed to audit {}", args.log_dir.display()))?;
            if report.passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_AUDIT_FAILED))
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
