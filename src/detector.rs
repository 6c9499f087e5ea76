use std::path::{Path, PathBuf};

use crate::resolver::enumerator::can_resolve;

/// Locate the npm manifest of the project at `path`.
///
/// `path` may be the project directory or the manifest itself.
pub fn detect_manifest(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        let name = path.file_name()?.to_str()?;
        return can_resolve(name).then(|| path.to_path_buf());
    }

    std::fs::read_dir(path)
        .ok()?
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_ok_and(|t| t.is_file())
                && entry.file_name().to_str().is_some_and(can_resolve)
        })
        .map(|entry| entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_in_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert_eq!(
            detect_manifest(dir.path()),
            Some(dir.path().join("package.json"))
        );
    }

    #[test]
    fn test_detect_manifest_path() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("package.json");
        std::fs::write(&manifest, "{}").unwrap();
        assert_eq!(detect_manifest(&manifest), Some(manifest));

        let other = dir.path().join("yarn.lock");
        std::fs::write(&other, "").unwrap();
        assert_eq!(detect_manifest(&other), None);
    }

    #[test]
    fn test_detect_nothing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_manifest(dir.path()), None);
        assert_eq!(detect_manifest(&dir.path().join("missing")), None);
    }
}
