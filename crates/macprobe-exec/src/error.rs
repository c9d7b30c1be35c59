//! Error types for macprobe-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while executing a command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Failed to spawn the process
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error while collecting output
    #[error("I/O error: {0}")]
    IoError(String),

    /// Command timed out
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Failed to connect to the target host
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No connection established
    #[error("not connected")]
    NotConnected,
}

impl ExecError {
    /// Check if error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExecError::ConnectionFailed(_) | ExecError::Timeout { .. }
        )
    }
}
