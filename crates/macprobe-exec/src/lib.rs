//! macprobe-exec: command execution abstraction
//!
//! Provides the executor trait the scanners capture command output through,
//! plus a local implementation. Remote transports (SSH etc.) plug in behind
//! the same trait.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::CommandResult;
pub use traits::RemoteExecutor;
