//! Parser for `sw_vers` output
//!
//! `sw_vers` prints colon-delimited key/value lines:
//!
//! ```text
//! ProductName:        macOS
//! ProductVersion:     13.4.1
//! BuildVersion:       22F82
//! ```
//!
//! Only ProductName and ProductVersion matter here; everything else is
//! ignored.

use crate::error::ScanError;
use crate::types::{OsFamily, OsIdentity};

const PRODUCT_NAME_KEY: &str = "ProductName:";
const PRODUCT_VERSION_KEY: &str = "ProductVersion:";

/// Parse captured `sw_vers` output into an OS identity
///
/// Scans every line, keeping the last-seen value per key (repeats are
/// tolerated, not expected). Fails if the product name is not one of the
/// four known editions, or if the product version is empty.
///
/// # Errors
/// [`ScanError::UnrecognizedProductName`] or [`ScanError::MissingProductVersion`].
pub fn parse_sw_vers(stdout: &str) -> Result<OsIdentity, ScanError> {
    let mut name = "";
    let mut version = "";

    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix(PRODUCT_NAME_KEY) {
            name = rest.trim();
        } else if let Some(rest) = line.strip_prefix(PRODUCT_VERSION_KEY) {
            version = rest.trim();
        }
    }

    let family = OsFamily::from_product_name(name)
        .ok_or_else(|| ScanError::UnrecognizedProductName(name.to_string()))?;

    if version.is_empty() {
        return Err(ScanError::MissingProductVersion);
    }

    Ok(OsIdentity {
        family,
        version: version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_os_x() {
        let stdout = "ProductName:\t\tMac OS X\nProductVersion:\t\t10.3\nBuildVersion:\t\t7A100";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.family, OsFamily::MacOsX);
        assert_eq!(os.version, "10.3");
    }

    #[test]
    fn test_mac_os_x_server() {
        let stdout =
            "ProductName:\t\tMac OS X Server\nProductVersion:\t\t10.6.8\nBuildVersion:\t\t10K549";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.family, OsFamily::MacOsXServer);
        assert_eq!(os.version, "10.6.8");
    }

    #[test]
    fn test_macos() {
        let stdout = "ProductName:\t\tmacOS\nProductVersion:\t\t13.4.1\nBuildVersion:\t\t22F82";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.family, OsFamily::MacOs);
        assert_eq!(os.version, "13.4.1");
    }

    #[test]
    fn test_macos_server() {
        let stdout =
            "ProductName:\t\tmacOS Server\nProductVersion:\t\t13.4.1\nBuildVersion:\t\t22F82";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.family, OsFamily::MacOsServer);
        assert_eq!(os.version, "13.4.1");
    }

    #[test]
    fn test_unrecognized_product_name() {
        // "MacOS" is not a product name sw_vers ever emits
        let stdout = "ProductName:\t\tMacOS\nProductVersion:\t\t13.4.1\nBuildVersion:\t\t22F82";
        assert_eq!(
            parse_sw_vers(stdout),
            Err(ScanError::UnrecognizedProductName("MacOS".to_string()))
        );
    }

    #[test]
    fn test_missing_product_version() {
        let stdout = "ProductName:\t\tmacOS\nProductVersion:\t\t\nBuildVersion:\t\t22F82";
        assert_eq!(parse_sw_vers(stdout), Err(ScanError::MissingProductVersion));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let stdout = "SomeFutureKey:\tvalue\nProductName: macOS\nProductVersion: 14.0\n";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.family, OsFamily::MacOs);
        assert_eq!(os.version, "14.0");
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let stdout =
            "ProductName: macOS\nProductVersion: 13.4.0\nProductVersion: 13.4.1\n";
        let os = parse_sw_vers(stdout).unwrap();
        assert_eq!(os.version, "13.4.1");
    }

    #[test]
    fn test_idempotent() {
        let stdout = "ProductName:\t\tmacOS\nProductVersion:\t\t13.4.1\nBuildVersion:\t\t22F82";
        assert_eq!(parse_sw_vers(stdout), parse_sw_vers(stdout));
    }
}
