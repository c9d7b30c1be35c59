//! Error types for macprobe-scan

use thiserror::Error;

/// Errors that can occur while detecting the OS or scanning packages
///
/// Every variant is terminal for the call that produced it; callers decide
/// whether to abort the host scan or continue with degraded information.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// `sw_vers` reported a product name outside the four known editions
    #[error("unexpected product name: {0:?}")]
    UnrecognizedProductName(String),

    /// `sw_vers` reported no ProductVersion value
    #[error("ProductVersion is empty")]
    MissingProductVersion,

    /// An inventory line had no `<TAG>: <VALUE>` separator
    #[error("unexpected installed packages line, expected \"<TAG>: <VALUE>\", actual: {0:?}")]
    UnexpectedLineFormat(String),

    /// An inventory line carried a tag other than the two recognized labels
    #[error(
        "unexpected installed packages line tag, expected [\"Info.plist\", \"CFBundleShortVersionString\"], actual: {0:?}"
    )]
    UnexpectedTag(String),

    /// The executor failed before any output could be captured
    #[error("execution error: {0}")]
    Execution(String),

    /// A scan command ran but exited non-zero
    #[error("command failed: {status} - {stderr}")]
    CommandFailed {
        /// Exit status
        status: i32,
        /// Captured stderr
        stderr: String,
    },
}

impl ScanError {
    /// Check if the error came from the capture layer rather than parsing
    #[must_use]
    pub fn is_capture_failure(&self) -> bool {
        matches!(
            self,
            ScanError::Execution(_) | ScanError::CommandFailed { .. }
        )
    }
}
