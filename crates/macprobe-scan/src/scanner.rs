//! macOS scan strategy
//!
//! Detection probes the host with `sw_vers`; the package scan discovers
//! `.app` bundles with `find`, extracts one version value per bundle with
//! `plutil`, and feeds the formatted blocks to the inventory parser. Other
//! OS families implement the same [`HostScanner`] capability surface with
//! their own strategies; macOS needs none of the pre/post hooks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use macprobe_exec::traits::RemoteExecutor;
use tracing::{debug, info, instrument, warn};

use crate::bundles::{self, PLIST_TAG, VERSION_TAG};
use crate::error::ScanError;
use crate::swvers::parse_sw_vers;
use crate::types::{OsIdentity, PackageInventory, ScanResult, SrcPackageInventory};

/// Bundle discovery command: top-level `.app` directories only, nested
/// helper bundles excluded
pub const FIND_BUNDLE_PLISTS: &str = "find -L /Applications /System/Applications -type f -path \"*.app/Contents/Info.plist\" -not -path \"*.app/**/*.app/*\"";

/// Build the per-bundle version extraction command
#[must_use]
pub fn plutil_cmd(plist_path: &str) -> String {
    format!("plutil -extract \"{VERSION_TAG}\" raw \"{plist_path}\" -o -")
}

/// Common scan lifecycle implemented by every OS-family strategy
///
/// The hooks default to no-ops; families override only what they need
/// (deb/rpm strategies override most of them, macOS only the package scan).
#[async_trait]
pub trait HostScanner: Send + Sync {
    /// Detected OS identity
    fn os(&self) -> &OsIdentity;

    /// Validate that the configured scan mode is supported
    fn check_scan_mode(&self) -> Result<(), ScanError> {
        Ok(())
    }

    /// Validate that required tooling exists on the host
    fn check_deps(&self) -> Result<(), ScanError> {
        Ok(())
    }

    /// Collect host facts needed before the package scan
    async fn pre_cure(&mut self) -> Result<(), ScanError> {
        Ok(())
    }

    /// Build the installed package inventory
    async fn scan_packages(&mut self) -> Result<(), ScanError>;

    /// Cleanup after the package scan
    async fn post_scan(&mut self) -> Result<(), ScanError> {
        Ok(())
    }

    /// Consume the scanner and materialize its result
    fn into_result(self: Box<Self>) -> ScanResult;
}

/// Run the full scan lifecycle and materialize the result
///
/// # Errors
/// The first failing lifecycle step aborts the scan.
pub async fn run_scan(mut scanner: Box<dyn HostScanner>) -> Result<ScanResult, ScanError> {
    scanner.check_scan_mode()?;
    scanner.check_deps()?;
    scanner.pre_cure().await?;
    scanner.scan_packages().await?;
    scanner.post_scan().await?;
    Ok(scanner.into_result())
}

/// Scan strategy for the macOS families
pub struct MacosScanner {
    executor: Arc<dyn RemoteExecutor>,
    os: OsIdentity,
    packages: PackageInventory,
    src_packages: SrcPackageInventory,
    warnings: Vec<String>,
}

impl std::fmt::Debug for MacosScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacosScanner")
            .field("os", &self.os)
            .field("packages", &self.packages)
            .field("src_packages", &self.src_packages)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl MacosScanner {
    /// Create a scanner for an already-identified host
    pub fn new(executor: Arc<dyn RemoteExecutor>, os: OsIdentity) -> Self {
        Self {
            executor,
            os,
            packages: PackageInventory::new(),
            src_packages: SrcPackageInventory::new(),
            warnings: Vec::new(),
        }
    }

    /// Non-fatal problems accumulated so far
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Discover bundle paths and format one metadata block per bundle
    ///
    /// `plutil` failures are not fatal here: a bundle whose extraction
    /// fails keeps its record with an empty version, and an executor-level
    /// failure skips the bundle with a warning.
    async fn capture_bundle_blocks(&mut self) -> Result<String, ScanError> {
        let found = self
            .executor
            .run(FIND_BUNDLE_PLISTS)
            .await
            .map_err(|e| ScanError::Execution(e.to_string()))?;
        if !found.success() {
            return Err(ScanError::CommandFailed {
                status: found.status,
                stderr: found.stderr,
            });
        }

        let mut blocks = String::new();
        for path in found.stdout.lines().filter(|l| !l.is_empty()) {
            match self.executor.run(&plutil_cmd(path)).await {
                Ok(extracted) => {
                    blocks.push_str(PLIST_TAG);
                    blocks.push_str(": ");
                    blocks.push_str(path);
                    blocks.push('\n');

                    // Only a clean exit carries a value; a failing plutil
                    // prints diagnostics, and those must not end up recorded
                    // as version strings. Values are single-line, so anything
                    // spanning lines is tool noise either way.
                    if extracted.success() {
                        let value = extracted.stdout.trim();
                        if !value.is_empty() && !value.contains('\n') {
                            blocks.push_str(VERSION_TAG);
                            blocks.push_str(": ");
                            blocks.push_str(value);
                            blocks.push('\n');
                        }
                    } else {
                        debug!(path, status = extracted.status, "no version value for bundle");
                    }
                    blocks.push('\n');
                }
                Err(e) => {
                    warn!(path, error = %e, "skipping bundle, version extraction failed");
                    self.warnings
                        .push(format!("failed to extract version for {path}: {e}"));
                }
            }
        }

        Ok(blocks)
    }
}

#[async_trait]
impl HostScanner for MacosScanner {
    fn os(&self) -> &OsIdentity {
        &self.os
    }

    #[instrument(skip(self), fields(family = %self.os.family, version = %self.os.version))]
    async fn scan_packages(&mut self) -> Result<(), ScanError> {
        debug!("scanning installed application bundles");

        let blocks = self.capture_bundle_blocks().await?;
        let (packages, src_packages) = bundles::parse_installed_bundles(&blocks)?;

        info!(count = packages.len(), "found installed application bundles");

        self.packages = packages;
        self.src_packages = src_packages;
        Ok(())
    }

    fn into_result(self: Box<Self>) -> ScanResult {
        ScanResult {
            os: self.os,
            packages: self.packages,
            src_packages: self.src_packages,
            warnings: self.warnings,
            scanned_at: Utc::now(),
        }
    }
}

/// Probe a host with `sw_vers` and build a scanner if it is macOS
///
/// A failing `sw_vers` means the host is some other OS (`Ok(None)`), which
/// is not an error; unparseable `sw_vers` output on a macOS host is.
///
/// # Errors
/// [`ScanError::Execution`] if the probe could not run at all, or a
/// version-parse failure from [`parse_sw_vers`].
#[instrument(skip(executor))]
pub async fn detect_macos(
    executor: Arc<dyn RemoteExecutor>,
) -> Result<Option<MacosScanner>, ScanError> {
    let result = executor
        .run("sw_vers")
        .await
        .map_err(|e| ScanError::Execution(e.to_string()))?;

    if !result.success() {
        debug!(status = result.status, "sw_vers unavailable, not a macOS host");
        return Ok(None);
    }

    let os = parse_sw_vers(&result.stdout)?;
    info!(family = %os.family, version = %os.version, "detected macOS host");
    Ok(Some(MacosScanner::new(executor, os)))
}
