//! Shell command execution for the conversion tools.
//!
//! Runs one fully formed command line through the platform shell, waits
//! for it to finish, keeps a copy of its output in the log file and turns
//! failures into [`BridgeError::CommandFailed`].

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::config::RunnerConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::path::normalize_separators;

/// Substring that marks a failure even when the tool exits with 0.
///
/// ck-cmd prints caught Havok exceptions and still reports success.
pub const FAILURE_MARKER: &str = "Exception";

/// Returns the shell program and the flag that makes it run one command.
pub fn shell_command() -> (&'static str, &'static str) {
    if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") }
}

/// Whether a finished command counts as failed.
pub fn is_failure(exit_code: Option<i32>, output: &str) -> bool {
    exit_code != Some(0) || output.contains(FAILURE_MARKER)
}

/// Runs command lines one at a time.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    /// Create a runner from its configuration.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run `command` and wait for it to exit.
    ///
    /// Without a working directory the child inherits the current one.
    /// The merged output (stdout, then stderr) overwrites the log file.
    pub async fn run(&self, command: &str, working_dir: Option<&Path>) -> BridgeResult<()> {
        let command = normalize_separators(command);
        let working_dir =
            working_dir.map(|dir| PathBuf::from(normalize_separators(&dir.to_string_lossy())));

        if let Some(dir) = &working_dir {
            if !dir.is_dir() {
                return Err(BridgeError::WorkingDirectoryNotFound { path: dir.clone() });
            }
        }

        if self.config.echo_output {
            info!(command = %command, "Running command");
        }

        let start = Instant::now();
        let (shell, flag) = shell_command();

        let mut cmd = Command::new(shell);
        #[cfg(windows)]
        cmd.raw_arg(flag).raw_arg(&command);
        #[cfg(not(windows))]
        cmd.arg(flag).arg(&command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &working_dir {
            cmd.current_dir(dir);
        }

        let output = match self.config.timeout_seconds {
            Some(seconds) => {
                match tokio::time::timeout(Duration::from_secs(seconds), cmd.output()).await {
                    Ok(result) => result?,
                    Err(_) => {
                        error!(command = %command, seconds, "Command timed out");
                        let err = BridgeError::Timeout { seconds };
                        self.write_log(&format!("{err}\n")).await;
                        return Err(err);
                    }
                }
            }
            None => cmd.output().await?,
        };

        let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
        merged.push_str(&String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code();

        self.write_log(&merged).await;

        if self.config.echo_output && !merged.is_empty() {
            info!("{}", merged.trim_end());
        }

        debug!(
            exit_code = ?exit_code,
            duration_ms = start.elapsed().as_millis() as u64,
            "Command finished"
        );

        if is_failure(exit_code, &merged) {
            error!(command = %command, exit_code = ?exit_code, "Command failed");
            return Err(BridgeError::CommandFailed {
                exit_code,
                output: merged,
            });
        }

        Ok(())
    }

    /// Overwrite the log file. A log that cannot be written never changes
    /// the outcome of the run.
    async fn write_log(&self, contents: &str) {
        let log_file = self.config.effective_log_file();
        if let Err(err) = write_file(&log_file, contents).await {
            warn!(path = %log_file.display(), error = %err, "Failed to write command log");
        }
    }
}

async fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, contents).await
}
