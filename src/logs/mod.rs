//! Log directory discovery and analysis
//!
//! - `scanner`: finds and classifies the per-action artifacts
//! - `analysis`: parses them into [`crate::models::ActionResult`]s

pub mod analysis;
pub mod scanner;

pub use analysis::{analyze_log_dir, parse_artifact, LogAnalysis};
pub use scanner::{classify, scan_log_dir, ArtifactPair};
