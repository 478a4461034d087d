//! Custom error types for restic-kit
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Audit findings are not errors; see [`crate::audit::AuditViolation`].

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for restic-kit operations
#[derive(Error, Debug)]
pub enum ResticKitError {
    /// The log directory could not be listed, or an artifact is incomplete
    #[error("Discovery error in {}: {message}", .path.display())]
    Discovery { path: PathBuf, message: String },

    /// An artifact's content does not match the shape expected for its kind
    #[error("Format error in {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ResticKitError {
    /// Create a discovery error for the given path
    pub fn discovery(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Discovery {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a format error for the given path
    pub fn format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Check if this error means the log directory itself is unusable
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Discovery { .. } | Self::Format { .. })
    }

    /// The offending artifact, if the error is tied to one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Discovery { path, .. } | Self::Format { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResticKitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for restic-kit operations
pub type ResticKitResult<T> = Result<T, ResticKitError>;
