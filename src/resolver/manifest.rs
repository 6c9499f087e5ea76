use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::license_field::LicenseEntry;
use crate::error::ResolveError;
use crate::models::PackageResult;

/// File name of an npm package manifest.
pub const PKG_FILE_NAME: &str = "package.json";

static LICENSE_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(licen[cs]e|copying)(-[\w-]+)?(\.(txt|md|markdown|rst))?$")
        .expect("license file pattern is valid")
});

/// The parts of `package.json` the resolver reads.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Value,
    #[serde(default)]
    pub licenses: Value,
}

impl Manifest {
    /// Entries of the legacy `licenses` array.
    ///
    /// Objects with a `type` and bare strings are accepted; other elements
    /// and a non-array field are ignored.
    pub fn license_entries(&self) -> Vec<LicenseEntry> {
        let Some(items) = self.licenses.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(LicenseEntry::new(s.as_str())),
                Value::Object(_) => serde_json::from_value(item.clone()).ok(),
                _ => None,
            })
            .collect()
    }
}

/// Read and decode the manifest at `path`.
pub fn parse_pkg_file(path: &Path) -> Result<Manifest, ResolveError> {
    let content = std::fs::read_to_string(path).map_err(|source| ResolveError::MissingManifest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ResolveError::MalformedManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Attach the package's license file, if any, to `result`.
///
/// A missing directory or the absence of a license file is not an error.
pub fn resolve_lcs_file(result: &mut PackageResult, pkg_dir: &Path) -> Result<(), ResolveError> {
    let Some(license_path) = find_license_file(pkg_dir) else {
        debug!(dir = %pkg_dir.display(), "no license file");
        return Ok(());
    };

    let content =
        std::fs::read_to_string(&license_path).map_err(|source| ResolveError::LicenseFile {
            path: license_path.clone(),
            source,
        })?;

    let license_path = std::path::absolute(&license_path).unwrap_or(license_path);
    result.license_content = Some(content);
    result.license_file_path = Some(license_path);
    Ok(())
}

/// Pick the preferred license file in `dir`: `LICENSE`/`LICENCE` names before
/// `COPYING`, then shorter names, then lexicographic order.
fn find_license_file(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            LICENSE_FILE_RE.is_match(&name).then_some(name)
        })
        .min_by_key(|name| {
            let is_copying = name.to_ascii_lowercase().starts_with("copying");
            (is_copying, name.len(), name.clone())
        })
        .map(|name| dir.join(name))
}
