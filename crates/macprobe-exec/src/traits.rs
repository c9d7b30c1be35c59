//! Executor trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Abstraction over where commands run (local shell, SSH session, ...)
///
/// Scanners never spawn processes themselves; they hand command strings to
/// an executor and parse the captured output.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run a command and capture its output
    async fn run(&self, cmd: &str) -> Result<CommandResult, ExecError>;

    /// Run a command, failing with [`ExecError::Timeout`] if it exceeds `timeout`
    async fn run_with_timeout(
        &self,
        cmd: &str,
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    /// Short identifier for logging ("local", "ssh", ...)
    fn executor_type(&self) -> &'static str;
}
