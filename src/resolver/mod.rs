//! License resolution for installed npm packages.
//!
//! - [`arch`] — canonical architecture tokens.
//! - [`platform`] — OS/arch suffixes in package names and host applicability.
//! - [`license_field`] — the `license` / `licenses` manifest fields.
//! - [`manifest`] — `package.json` and license file readers.
//! - [`enumerator`] — installed package listing.
//!
//! [`NpmResolver`] ties them together, one [`PackageResult`] per package.

pub mod arch;
pub mod enumerator;
pub mod license_field;
pub mod manifest;
pub mod platform;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::manager::PackageManager;
use crate::models::{LicenseSource, PackageResult, Report};
use enumerator::{get_installed_pkgs, scoped_pkg_name};
use license_field::{resolve_license_field, resolve_licenses_field};
use manifest::{parse_pkg_file, resolve_lcs_file, Manifest, PKG_FILE_NAME};
use platform::{is_for_current_platform, HostPlatform};

pub struct NpmResolver {
    host: HostPlatform,
}

impl NpmResolver {
    pub fn new(host: HostPlatform) -> Self {
        Self { host }
    }

    /// Resolve every installed dependency of the project owning `manifest_file`.
    pub fn resolve(
        &self,
        manager: &dyn PackageManager,
        manifest_file: &Path,
        cfg: &Config,
    ) -> Report {
        let root = manifest_file.parent().unwrap_or(Path::new("."));

        if manager.need_skip_install_pkgs() {
            debug!("skipping package installation");
        } else if let Err(e) = manager.install_pkgs(root) {
            warn!("package installation failed, using installed packages: {e:#}");
        }

        let mut report = Report::default();
        for pkg in get_installed_pkgs(manager, root) {
            if self.is_excluded(&pkg.name, &pkg.path, cfg) {
                debug!(package = %pkg.name, "excluded by configuration");
                continue;
            }

            let result = self.resolve_package_license(&pkg.name, &pkg.path, cfg);
            if result.license_spdx_id.is_some() {
                report.resolve(result);
            } else {
                report.skip(result);
            }
        }

        info!(
            resolved = report.resolved.len(),
            skipped = report.skipped.len(),
            "dependency licenses resolved"
        );
        report
    }

    /// Resolve the license of one installed package.
    ///
    /// Packages built for another OS/arch are reported as cross-platform
    /// without touching `pkg_path`. Read errors never fail the resolution;
    /// they are recorded in [`PackageResult::resolve_errors`].
    pub fn resolve_package_license(
        &self,
        pkg_name: &str,
        pkg_path: &Path,
        cfg: &Config,
    ) -> PackageResult {
        if !is_for_current_platform(pkg_name, &self.host) {
            debug!(package = pkg_name, "skipping package for another platform");
            return PackageResult::cross_platform(pkg_name, pkg_path);
        }

        let mut result = PackageResult::new(pkg_name, pkg_path);

        let manifest = match parse_pkg_file(&pkg_path.join(PKG_FILE_NAME)) {
            Ok(manifest) => manifest,
            Err(e) => {
                debug!(package = pkg_name, "{e}");
                result.resolve_errors.push(e.to_string());
                Manifest::default()
            }
        };
        result.version = manifest.version.clone();

        if let Some((license, source)) = resolve_manifest_license(&manifest, cfg) {
            result.license_spdx_id = Some(license);
            result.source = source;
        } else {
            result
                .resolve_errors
                .push(r#"cannot parse the "license"/"licenses" field"#.to_string());
        }

        if let Err(e) = resolve_lcs_file(&mut result, pkg_path) {
            debug!(package = pkg_name, "{e}");
            result.resolve_errors.push(e.to_string());
        }

        result
    }

    fn is_excluded(&self, pkg_name: &str, pkg_path: &Path, cfg: &Config) -> bool {
        let name = scoped_pkg_name(pkg_name, pkg_path);
        let Some(exclude) = cfg.dependency.exclude_for(&name) else {
            return false;
        };
        let Some(version) = &exclude.version else {
            return true;
        };
        parse_pkg_file(&pkg_path.join(PKG_FILE_NAME))
            .ok()
            .and_then(|m| m.version)
            .is_some_and(|v| &v == version)
    }
}

/// Configured override first, then `license`, then the legacy `licenses`.
fn resolve_manifest_license(manifest: &Manifest, cfg: &Config) -> Option<(String, LicenseSource)> {
    if let (Some(name), Some(version)) = (&manifest.name, &manifest.version) {
        if let Some(license) = cfg.dependency.license_override(name, version) {
            return Some((license.to_string(), LicenseSource::Config));
        }
    }

    resolve_license_field(&manifest.license)
        .or_else(|| resolve_licenses_field(&manifest.license_entries()))
        .map(|license| (license, LicenseSource::Manifest))
}
