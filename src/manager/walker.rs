use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::resolver::manifest::PKG_FILE_NAME;

/// Lists packages by walking an already populated `node_modules` tree.
pub struct NodeModulesWalker;

impl NodeModulesWalker {
    pub fn new() -> Self {
        Self
    }
}

/// A package directory sits directly under `node_modules`, or under a
/// `node_modules/@scope` directory.
fn is_package_dir(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    let parent_name = parent.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if parent_name == "node_modules" {
        return true;
    }
    parent_name.starts_with('@')
        && parent
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|n| n == "node_modules")
}

impl super::PackageManager for NodeModulesWalker {
    fn list_pkg_paths(&self, root: &Path) -> Result<String> {
        let node_modules = root.join("node_modules");
        if !node_modules.is_dir() {
            return Ok(String::new());
        }

        let mut paths = Vec::new();
        let walker = WalkDir::new(&node_modules)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.file_type().is_dir() && e.file_name().to_str().is_some_and(|n| n != ".bin")
            });

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if is_package_dir(path) && path.join(PKG_FILE_NAME).is_file() {
                paths.push(path.to_string_lossy().into_owned());
            }
        }

        Ok(paths.join("\n"))
    }

    fn install_pkgs(&self, _root: &Path) -> Result<()> {
        Ok(())
    }

    fn need_skip_install_pkgs(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::PackageManager;
    use tempfile::TempDir;

    fn make_pkg(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(PKG_FILE_NAME), "{}").unwrap();
    }

    #[test]
    fn test_walk_node_modules() {
        let root = TempDir::new().unwrap();
        let nm = root.path().join("node_modules");
        make_pkg(&nm.join("lodash"));
        make_pkg(&nm.join("@parcel").join("watcher"));
        make_pkg(&nm.join("express").join("node_modules").join("debug"));
        // not packages
        std::fs::create_dir_all(nm.join(".bin")).unwrap();
        std::fs::create_dir_all(nm.join("lodash").join("fp")).unwrap();
        std::fs::write(nm.join("lodash").join("fp").join(PKG_FILE_NAME), "{}").unwrap();

        let listing = NodeModulesWalker::new().list_pkg_paths(root.path()).unwrap();
        let names: Vec<&str> = listing
            .lines()
            .map(|l| Path::new(l).file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["watcher", "debug", "lodash"]);
    }

    #[test]
    fn test_walk_without_node_modules() {
        let root = TempDir::new().unwrap();
        let listing = NodeModulesWalker::new().list_pkg_paths(root.path()).unwrap();
        assert!(listing.is_empty());
    }
}
