//! Process invocation configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// File name of the output log in the system temp directory.
const DEFAULT_LOG_NAME: &str = "test.log";

/// Settings for [`CommandRunner`](crate::runner::CommandRunner).
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// File that receives the output of the last command. Overwritten on
    /// every call.
    pub log_file: Option<PathBuf>,

    /// Log the command line and its output at info level.
    #[serde(default = "default_echo_output")]
    pub echo_output: bool,

    /// Upper bound for a single invocation. Unset means wait forever.
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            echo_output: default_echo_output(),
            timeout_seconds: None,
        }
    }
}

fn default_echo_output() -> bool {
    true
}

impl RunnerConfig {
    /// Resolve the effective log file path.
    pub fn effective_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_NAME))
    }
}
