//! Local command execution using `tokio::process`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, instrument};

use crate::error::ExecError;
use crate::result::CommandResult;
use crate::traits::RemoteExecutor;

/// Executes commands on the local machine through `sh -c`
///
/// The shell indirection keeps parity with remote executors, where scan
/// commands carry quoting and glob patterns of their own.
#[derive(Debug, Clone, Default)]
pub struct LocalExecutor;

impl LocalExecutor {
    /// Create a new local executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self), level = "debug")]
    async fn execute(&self, cmd: &str) -> Result<CommandResult, ExecError> {
        let start = Instant::now();

        debug!(command = %cmd, "executing local command");

        let child = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::SpawnError(e.to_string()))?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecError::IoError(e.to_string()))?;

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let duration = start.elapsed();

        if output.status.success() {
            debug!(status, ?duration, "command completed");
        } else {
            error!(command = %cmd, status, stderr = %stderr, "command failed");
        }

        Ok(CommandResult {
            status,
            stdout,
            stderr,
            duration,
        })
    }
}

#[async_trait]
impl RemoteExecutor for LocalExecutor {
    async fn run(&self, cmd: &str) -> Result<CommandResult, ExecError> {
        self.execute(cmd).await
    }

    async fn run_with_timeout(
        &self,
        cmd: &str,
        timeout_duration: Duration,
    ) -> Result<CommandResult, ExecError> {
        match timeout(timeout_duration, self.execute(cmd)).await {
            Ok(result) => result,
            Err(_) => {
                error!(command = %cmd, timeout = ?timeout_duration, "command timed out");
                Err(ExecError::Timeout {
                    timeout: timeout_duration,
                })
            }
        }
    }

    fn executor_type(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_multiline_stdout() {
        // bundle discovery yields one path per line
        let executor = LocalExecutor::new();
        let result = executor
            .run("printf '/Applications/a.app\\n/Applications/b.app\\n'")
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_run_preserves_quoted_arguments() {
        // scan commands quote paths with spaces, the shell must keep them whole
        let executor = LocalExecutor::new();
        let result = executor
            .run("echo \"/Applications/Visual Studio Code.app\"")
            .await
            .unwrap();

        assert_eq!(result.stdout.trim(), "/Applications/Visual Studio Code.app");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_keeps_diagnostics() {
        let executor = LocalExecutor::new();
        let result = executor
            .run("echo 'could not parse' >&2; exit 3")
            .await
            .unwrap();

        assert!(!result.success());
        assert_eq!(result.status, 3);
        assert_eq!(result.stderr.trim(), "could not parse");
        assert!(result.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_run_with_timeout_expires() {
        let executor = LocalExecutor::new();
        let result = executor
            .run_with_timeout("sleep 5", Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(ExecError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_run_with_timeout_passes_result_through() {
        let executor = LocalExecutor::new();
        let result = executor
            .run_with_timeout("echo ok", Duration::from_secs(5))
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.trim(), "ok");
    }

    #[test]
    fn test_executor_type() {
        assert_eq!(LocalExecutor::new().executor_type(), "local");
    }
}
