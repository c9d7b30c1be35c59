//! Result types for command execution

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Captured output of a single command execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Exit status code (0 for success)
    pub status: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Wall-clock time taken to execute
    pub duration: Duration,
}

impl CommandResult {
    /// Check if the command exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Combine stdout and stderr for diagnostics
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: i32, stdout: &str, stderr: &str) -> CommandResult {
        CommandResult {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_success() {
        assert!(result(0, "", "").success());
        assert!(!result(1, "", "").success());
    }

    #[test]
    fn test_combined_output() {
        assert_eq!(result(0, "out", "").combined_output(), "out");
        assert_eq!(result(0, "out", "err").combined_output(), "out\nerr");
    }
}
