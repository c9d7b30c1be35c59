//! Parser for application bundle metadata listings
//!
//! The package scan emits one block per discovered `.app` bundle, blocks
//! separated by a blank line:
//!
//! ```text
//! Info.plist: /Applications/Safari.app/Contents/Info.plist
//! CFBundleShortVersionString: 16.5.1
//! ```
//!
//! The version line is optional. When `plutil` cannot extract the key it
//! prints a diagnostic instead of a value; that diagnostic is recognized by
//! its fixed suffix and treated as "no version", not as an error.

use crate::error::ScanError;
use crate::types::{Package, PackageInventory, SrcPackageInventory};

/// Tag introducing a bundle record
pub const PLIST_TAG: &str = "Info.plist";
/// Tag carrying the bundle's version value
pub const VERSION_TAG: &str = "CFBundleShortVersionString";

/// Trailing text `plutil` emits when the version key does not exist.
///
/// Exact-wording contract with the external tool; if a plutil revision
/// rewords this diagnostic, detection breaks silently.
pub const NO_VALUE_SENTINEL: &str =
    "Could not extract value, error: No value at that key path or invalid key path: CFBundleShortVersionString";

/// Path suffix locating a bundle's metadata file inside its `.app` directory
pub const BUNDLE_METADATA_SUFFIX: &str = ".app/Contents/Info.plist";

/// Derive a bundle name from its Info.plist path
///
/// `/Applications/Safari.app/Contents/Info.plist` becomes `Safari`. Paths
/// without the metadata suffix fall through to their literal final segment.
#[must_use]
pub fn bundle_name(path: &str) -> String {
    let trimmed = path.strip_suffix(BUNDLE_METADATA_SUFFIX).unwrap_or(path);
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

/// Parse a bundle metadata listing into a package inventory
///
/// Single pass; a blank line or end-of-input finalizes the pending record.
/// Bundles resolving to the same name overwrite each other, last one wins.
/// The secondary source-package map is always empty on macOS and is
/// returned only for parity with the deb/rpm scanners.
///
/// # Errors
/// [`ScanError::UnexpectedLineFormat`] for a non-blank line without a colon,
/// [`ScanError::UnexpectedTag`] for an unknown tag. No partial inventory is
/// returned on failure.
pub fn parse_installed_bundles(
    stdout: &str,
) -> Result<(PackageInventory, SrcPackageInventory), ScanError> {
    let mut pkgs = PackageInventory::new();
    let mut path = "";
    let mut version = "";

    for line in stdout.lines() {
        if line.is_empty() {
            if !path.is_empty() {
                pkgs.insert(Package::new(bundle_name(path), version));
            }
            path = "";
            version = "";
            continue;
        }

        let Some((tag, value)) = line.split_once(':') else {
            return Err(ScanError::UnexpectedLineFormat(line.to_string()));
        };

        match tag {
            PLIST_TAG => path = value.trim(),
            VERSION_TAG => {
                version = value.trim();
                if version.ends_with(NO_VALUE_SENTINEL) {
                    version = "";
                }
            }
            other => return Err(ScanError::UnexpectedTag(other.to_string())),
        }
    }

    // No trailing blank line is required
    if !path.is_empty() {
        pkgs.insert(Package::new(bundle_name(path), version));
    }

    Ok((pkgs, SrcPackageInventory::new()))
}
