use std::io::BufRead;
use std::path::Path;
use std::process::Command;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::config::DependencyConfig;

/// [`PackageManager`](super::PackageManager) backed by the `npm` CLI.
pub struct NpmCli {
    install_timeout: Duration,
    skip_install: bool,
    production_only: bool,
}

impl NpmCli {
    pub fn new(config: &DependencyConfig) -> Self {
        Self {
            install_timeout: Duration::from_secs(config.install_timeout_secs),
            skip_install: config.skip_install,
            production_only: config.production_only,
        }
    }

    fn command() -> Command {
        let npm_cmd = if cfg!(target_os = "windows") { "npm.cmd" } else { "npm" };
        Command::new(npm_cmd)
    }
}

/// `npm ls --parseable` prints the project directory before its dependencies.
fn without_project_line(listing: &str, root: &Path) -> String {
    let root_line = root.to_string_lossy();
    listing
        .lines()
        .filter(|line| line.trim() != &*root_line)
        .collect::<Vec<_>>()
        .join("\n")
}

impl super::PackageManager for NpmCli {
    fn list_pkg_paths(&self, root: &Path) -> Result<String> {
        let mut cmd = Self::command();
        cmd.args(["ls", "--all", "--parseable"]).current_dir(root);
        if self.production_only {
            cmd.arg("--omit=dev");
        }

        let output = cmd
            .output()
            .context("Failed to execute npm. Is npm installed?")?;

        // npm ls exits 1 on peer dependency problems but still prints the tree
        if !output.status.success() {
            if output.stdout.is_empty() {
                bail!(
                    "npm ls failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            warn!(status = %output.status, "npm ls reported problems, using partial output");
        }

        Ok(without_project_line(
            &String::from_utf8_lossy(&output.stdout),
            root,
        ))
    }

    fn install_pkgs(&self, root: &Path) -> Result<()> {
        let subcommand = if root.join("package-lock.json").exists() {
            "ci"
        } else {
            "install"
        };
        info!(dir = %root.display(), "running npm {subcommand}");

        let status = Self::command()
            .arg(subcommand)
            .current_dir(root)
            .status()
            .with_context(|| format!("Failed to execute npm {subcommand}"))?;

        if !status.success() {
            bail!("npm {subcommand} exited with {status}");
        }
        Ok(())
    }

    fn need_skip_install_pkgs(&self) -> bool {
        if self.skip_install {
            return true;
        }
        if self.install_timeout.is_zero() {
            return false;
        }

        eprintln!(
            "Installing npm packages in {} seconds, press [s/S] and ENTER to skip",
            self.install_timeout.as_secs()
        );

        let (tx, rx) = mpsc::channel();
        // On timeout the reader stays blocked on stdin until the process exits.
        std::thread::spawn(move || {
            let mut line = String::new();
            if std::io::stdin().lock().read_line(&mut line).is_ok() {
                let _ = tx.send(line);
            }
        });

        match rx.recv_timeout(self.install_timeout) {
            Ok(line) => {
                let skip = line.trim().eq_ignore_ascii_case("s");
                debug!(skip, "install prompt answered");
                skip
            }
            Err(_) => false,
        }
    }
}
