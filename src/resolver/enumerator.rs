use std::path::Path;

use tracing::{debug, warn};

use super::manifest::PKG_FILE_NAME;
use crate::manager::PackageManager;
use crate::models::Package;

/// Turn the package manager's path listing into packages, in listing order.
///
/// Listing failures are logged and produce no packages.
pub fn get_installed_pkgs(manager: &dyn PackageManager, root_dir: &Path) -> Vec<Package> {
    let listing = match manager.list_pkg_paths(root_dir) {
        Ok(listing) => listing,
        Err(e) => {
            warn!(dir = %root_dir.display(), "cannot list installed packages: {e:#}");
            return Vec::new();
        }
    };

    let pkgs: Vec<Package> = listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let path = Path::new(line);
            let name = path
                .file_name()
                .map_or_else(|| line.to_string(), |n| n.to_string_lossy().into_owned());
            Package {
                name,
                path: path.to_path_buf(),
            }
        })
        .collect();

    debug!(count = pkgs.len(), "installed packages listed");
    pkgs
}

/// The npm name of an installed package: `name`, prefixed with the `@scope`
/// directory that holds it, if any.
pub fn scoped_pkg_name(name: &str, path: &Path) -> String {
    let scope = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|s| s.to_str())
        .filter(|s| s.starts_with('@'));
    match scope {
        Some(scope) => format!("{scope}/{name}"),
        None => name.to_string(),
    }
}

/// Whether `filename` is the manifest this resolver understands.
pub fn can_resolve(filename: &str) -> bool {
    filename == PKG_FILE_NAME
}
