//! Subprocess execution for the download tool.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::ProcessError;

// ============================================================================
// Process Output
// ============================================================================

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output content.
    pub stdout: String,
    /// Standard error content.
    pub stderr: String,
    /// Exit code (0 = success, -1 when killed by a signal).
    pub exit_code: i32,
    /// How long the command took to execute.
    pub duration: Duration,
}

impl ProcessOutput {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the stdout if successful, otherwise an error.
    pub fn stdout_if_success(&self) -> Result<&str, ProcessError> {
        if self.success() {
            Ok(&self.stdout)
        } else {
            Err(ProcessError::NonZeroExit {
                code: self.exit_code,
                stderr: self.stderr.clone(),
            })
        }
    }

    /// First non-empty stderr line, trimmed.
    pub fn first_stderr_line(&self) -> Option<&str> {
        self.stderr.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

// ============================================================================
// Process Runner
// ============================================================================

/// Runs external commands with piped output.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    /// Run a command, optionally bounded by `timeout`.
    ///
    /// The child is killed when the timeout fires or the future is dropped.
    #[instrument(skip(self, args), fields(cmd = %cmd, timeout = ?timeout))]
    pub async fn run(
        &self,
        cmd: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ProcessError> {
        debug!(args = args.len(), "Running command");

        let cmd_path = self.which(cmd).ok_or_else(|| {
            warn!(cmd = %cmd, "Command not found");
            ProcessError::NotFound(cmd.to_string())
        })?;

        let start = Instant::now();

        let mut command = Command::new(&cmd_path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = if let Some(timeout) = timeout {
            match tokio::time::timeout(timeout, command.output()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(cmd = %cmd, timeout = ?timeout, "Command timed out");
                    return Err(ProcessError::Timeout(timeout));
                }
            }
        } else {
            command.output().await?
        };

        let duration = start.elapsed();
        let exit_code = output.status.code().unwrap_or(-1);

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code,
            duration,
        };

        debug!(
            exit_code = exit_code,
            duration = ?duration,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Command completed"
        );

        Ok(result)
    }

    /// Check if a command exists on PATH (or at the given path).
    pub fn command_exists(&self, cmd: &str) -> bool {
        self.which(cmd).is_some()
    }

    /// Find the path to a command.
    pub fn which(&self, cmd: &str) -> Option<PathBuf> {
        which::which(cmd).ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_which() {
        let runner = ProcessRunner::new();
        assert!(runner.command_exists("sh"));
        assert!(runner.which("definitely_not_a_real_command_12345").is_none());
    }

    #[tokio::test]
    async fn test_run_echo() {
        let runner = ProcessRunner::new();
        let output = runner.run("echo", &args(&["hello", "world"]), None).await.unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello world");
        assert!(output.first_stderr_line().is_none());
    }

    #[tokio::test]
    async fn test_run_failure_captures_stderr() {
        let runner = ProcessRunner::new();
        let output = runner
            .run("sh", &args(&["-c", "echo 'first' >&2; echo second >&2; exit 3"]), None)
            .await
            .unwrap();

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.first_stderr_line(), Some("first"));
        assert!(matches!(
            output.stdout_if_success(),
            Err(ProcessError::NonZeroExit { code: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_run_timeout() {
        let runner = ProcessRunner::new();
        let result = runner
            .run("sleep", &args(&["5"]), Some(Duration::from_millis(100)))
            .await;

        assert!(matches!(result, Err(ProcessError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_run_not_found() {
        let runner = ProcessRunner::new();
        let result = runner.run("not_a_real_command_xyz", &[], None).await;
        assert!(matches!(result, Err(ProcessError::NotFound(_))));
    }
}
