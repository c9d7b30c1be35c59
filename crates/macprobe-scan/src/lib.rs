//! macprobe-scan: macOS host identification and application inventory
//!
//! Identifies the operating system edition from `sw_vers` output and builds
//! a deduplicated inventory of installed application bundles from `plutil`
//! metadata blocks. Parsing is pure and synchronous; command capture happens
//! through a [`macprobe_exec::RemoteExecutor`], and the results feed the
//! downstream vulnerability-matching stages.

pub mod bundles;
pub mod error;
pub mod scanner;
pub mod swvers;
pub mod types;

pub use error::ScanError;
pub use scanner::{HostScanner, MacosScanner, detect_macos, run_scan};
pub use types::{OsFamily, OsIdentity, Package, PackageInventory, ScanResult};
