//! Unified error type for the conversion bridge.
//!
//! Every failure of an external tool collapses into
//! [`BridgeError::CommandFailed`], which carries the captured output as its
//! only diagnostic payload. The remaining variants cover the ambient work
//! around it (configuration, log file, project metadata).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Unified error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // --- Process execution errors ---
    /// The external command exited non-zero or reported an exception.
    #[error("\n{output}")]
    CommandFailed {
        /// Exit code, `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Merged stdout and stderr of the process.
        output: String,
    },

    /// The external command exceeded the configured timeout.
    #[error("Command timed out after {seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        seconds: u64,
    },

    /// The requested working directory does not exist.
    #[error("Working directory does not exist: {path}")]
    WorkingDirectoryNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    // --- Project errors ---
    /// The directory is missing `workspace.mel` or `metadata.json`.
    #[error("{path} is not a valid project")]
    NotAProject {
        /// The directory that was checked.
        path: PathBuf,
    },

    /// A project-relative path does not exist on disk.
    #[error("{path} does not exist")]
    PathNotFound {
        /// The resolved full path.
        path: PathBuf,
    },

    /// A metadata key the operation needs is unset.
    #[error("Project metadata '{key}' is not set")]
    MissingMetadata {
        /// Stored name of the key.
        key: String,
    },

    /// A file would be overwritten by staging.
    #[error("{path} already exists")]
    FileExists {
        /// The file that is in the way.
        path: PathBuf,
    },

    // --- Configuration errors ---
    /// Configuration could not be built or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // --- Generic errors ---
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading or writing project files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether this error came from the external tool itself.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }

    /// Captured tool output, if this is a command failure.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
