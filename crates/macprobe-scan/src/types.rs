//! Inventory type definitions

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four macOS editions `sw_vers` can report
///
/// Any product name outside this set is a detection failure, not a fifth
/// variant; the set is closed on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    /// "Mac OS X" (10.0 - 10.7)
    MacOsX,
    /// "Mac OS X Server"
    MacOsXServer,
    /// "macOS" (10.12 and later)
    MacOs,
    /// "macOS Server"
    MacOsServer,
}

impl OsFamily {
    /// Map a `sw_vers` ProductName literal onto its family
    ///
    /// Matching is exact; near-misses like "MacOS" are rejected.
    #[must_use]
    pub fn from_product_name(name: &str) -> Option<Self> {
        match name {
            "Mac OS X" => Some(OsFamily::MacOsX),
            "Mac OS X Server" => Some(OsFamily::MacOsXServer),
            "macOS" => Some(OsFamily::MacOs),
            "macOS Server" => Some(OsFamily::MacOsServer),
            _ => None,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::MacOsX => write!(f, "macos_x"),
            OsFamily::MacOsXServer => write!(f, "macos_x_server"),
            OsFamily::MacOs => write!(f, "macos"),
            OsFamily::MacOsServer => write!(f, "macos_server"),
        }
    }
}

/// Detected operating system identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsIdentity {
    /// OS family
    pub family: OsFamily,
    /// ProductVersion string, always non-empty
    pub version: String,
}

/// An installed application bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Bundle name derived from its `.app` directory
    pub name: String,
    /// CFBundleShortVersionString, empty when the bundle exposes none
    pub version: String,
}

impl Package {
    /// Create a new package record
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Installed packages keyed by name
///
/// Inserting a package whose name is already present overwrites the earlier
/// record (last write wins). Iteration order is unspecified; use
/// [`PackageInventory::sorted_by_name`] where deterministic order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageInventory(HashMap<String, Package>);

impl PackageInventory {
    /// Create an empty inventory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, overwriting any existing record with the same name
    pub fn insert(&mut self, pkg: Package) {
        self.0.insert(pkg.name.clone(), pkg);
    }

    /// Look up a package by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.0.get(name)
    }

    /// Number of packages
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the inventory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over packages in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.0.values()
    }

    /// Packages sorted by name, for presentation
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&Package> {
        let mut pkgs: Vec<&Package> = self.0.values().collect();
        pkgs.sort_by(|a, b| a.name.cmp(&b.name));
        pkgs
    }
}

impl FromIterator<Package> for PackageInventory {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut inv = Self::new();
        for pkg in iter {
            inv.insert(pkg);
        }
        inv
    }
}

/// A source package, for parity with package managers that track build
/// origins (deb/rpm). macOS application bundles have no source-package
/// notion, so macOS scans always produce an empty map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcPackage {
    /// Source package name
    pub name: String,
    /// Source package version
    pub version: String,
    /// Names of binary packages built from this source
    pub binary_names: Vec<String>,
}

/// Source packages keyed by name
pub type SrcPackageInventory = HashMap<String, SrcPackage>;

/// Everything a completed host scan produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Detected OS identity
    pub os: OsIdentity,
    /// Installed application bundles
    pub packages: PackageInventory,
    /// Source packages, empty on macOS
    pub src_packages: SrcPackageInventory,
    /// Non-fatal problems encountered during the scan
    pub warnings: Vec<String>,
    /// When the scan finished
    pub scanned_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_product_name() {
        assert_eq!(OsFamily::from_product_name("Mac OS X"), Some(OsFamily::MacOsX));
        assert_eq!(
            OsFamily::from_product_name("Mac OS X Server"),
            Some(OsFamily::MacOsXServer)
        );
        assert_eq!(OsFamily::from_product_name("macOS"), Some(OsFamily::MacOs));
        assert_eq!(
            OsFamily::from_product_name("macOS Server"),
            Some(OsFamily::MacOsServer)
        );
        assert_eq!(OsFamily::from_product_name("MacOS"), None);
        assert_eq!(OsFamily::from_product_name(""), None);
    }

    #[test]
    fn test_inventory_last_write_wins() {
        let mut inv = PackageInventory::new();
        inv.insert(Package::new("Safari", "16.5"));
        inv.insert(Package::new("Safari", "16.5.1"));

        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get("Safari").unwrap().version, "16.5.1");
    }

    #[test]
    fn test_sorted_by_name() {
        let inv: PackageInventory = [
            Package::new("Slack", "4.33.73"),
            Package::new("Firefox", "115.0.2"),
            Package::new("Safari", "16.5.1"),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = inv.sorted_by_name().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Firefox", "Safari", "Slack"]);
    }
}
