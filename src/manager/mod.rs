//! Package-manager collaborators.
//!
//! The resolver never shells out or walks `node_modules` itself; it asks a
//! [`PackageManager`] for the installed package paths and for the install step.
//!
//! - [`npm::NpmCli`] — drives the `npm` command line.
//! - [`walker::NodeModulesWalker`] — walks an existing `node_modules` tree offline.

pub mod npm;
pub mod walker;

use std::path::Path;

use anyhow::Result;

pub trait PackageManager {
    /// Absolute package directories under `root/node_modules`, one per line,
    /// in enumeration order. `root` is the project directory.
    fn list_pkg_paths(&self, root: &Path) -> Result<String>;

    /// Install the project's dependencies into `root/node_modules`.
    fn install_pkgs(&self, root: &Path) -> Result<()>;

    /// Whether the install step should be skipped.
    fn need_skip_install_pkgs(&self) -> bool;
}
