use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One installed dependency, as reported by the package path lister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub path: PathBuf,
}

/// The license decision for a single package.
///
/// A cross-platform result never carries a license id: the package was
/// classified as foreign to this host and its directory was not read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageResult {
    pub package_name: String,
    pub path: PathBuf,
    pub version: Option<String>,
    pub license_spdx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_content: Option<String>,
    pub license_file_path: Option<PathBuf>,
    pub is_cross_platform: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resolve_errors: Vec<String>,
    pub source: LicenseSource,
    pub risk: LicenseRisk,
    pub verdict: PolicyVerdict,
}

impl PackageResult {
    pub fn new(package_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            package_name: package_name.into(),
            path: path.into(),
            version: None,
            license_spdx_id: None,
            license_content: None,
            license_file_path: None,
            is_cross_platform: false,
            resolve_errors: Vec::new(),
            source: LicenseSource::Unknown,
            risk: LicenseRisk::Unknown,
            verdict: PolicyVerdict::Warn,
        }
    }

    /// Result for a package built for another OS/arch than the host.
    pub fn cross_platform(package_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            is_cross_platform: true,
            verdict: PolicyVerdict::Pass,
            ..Self::new(package_name, path)
        }
    }
}

/// Results of a whole-project resolution, in enumeration order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Report {
    /// Packages with a license id.
    pub resolved: Vec<PackageResult>,
    /// Cross-platform packages and packages whose license could not be resolved.
    pub skipped: Vec<PackageResult>,
}

impl Report {
    pub fn resolve(&mut self, result: PackageResult) {
        self.resolved.push(result);
    }

    pub fn skip(&mut self, result: PackageResult) {
        self.skipped.push(result);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageResult> {
        self.resolved.iter().chain(self.skipped.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PackageResult> {
        self.resolved.iter_mut().chain(self.skipped.iter_mut())
    }

    pub fn cross_platform_count(&self) -> usize {
        self.skipped.iter().filter(|r| r.is_cross_platform).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LicenseRisk {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for LicenseRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseRisk::Permissive => write!(f, "Permissive"),
            LicenseRisk::WeakCopyleft => write!(f, "Weak Copyleft"),
            LicenseRisk::StrongCopyleft => write!(f, "Strong Copyleft"),
            LicenseRisk::Proprietary => write!(f, "Proprietary"),
            LicenseRisk::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyVerdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVerdict::Pass => write!(f, "pass"),
            PolicyVerdict::Warn => write!(f, "warn"),
            PolicyVerdict::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LicenseSource {
    Manifest,
    Config,
    Registry,
    Unknown,
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::Manifest => write!(f, "manifest"),
            LicenseSource::Config => write!(f, "config"),
            LicenseSource::Registry => write!(f, "registry"),
            LicenseSource::Unknown => write!(f, "unknown"),
        }
    }
}
