use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "npm-license-checkr",
    about = "Resolve and check the licenses of every installed npm dependency",
    version
)]
pub struct Cli {
    /// Project directory (or its package.json) to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read a single package.json and print its license, then exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["online", "walk"])]
    pub manifest: Option<PathBuf>,

    /// Look up unresolved licenses in the npm registry
    #[arg(long)]
    pub online: bool,

    /// Policy config file [default: ./.npm-license-checkr/config.toml, fallback ~/.config/npm-license-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List packages by walking node_modules instead of running npm
    #[arg(long)]
    pub walk: bool,

    /// Do not run npm ci / npm install before listing packages
    #[arg(long)]
    pub skip_install: bool,

    /// Seconds to wait for a skip answer before installing (0 installs without asking)
    #[arg(long, value_name = "SECS")]
    pub install_timeout: Option<u64>,

    /// Leave dev dependencies out
    #[arg(long)]
    pub production: bool,

    /// Show all dependencies (not just warnings/errors) and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["npm-license-checkr"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(matches!(cli.report, ReportFormat::Terminal));
        assert!(cli.install_timeout.is_none());
        assert!(!cli.walk);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "npm-license-checkr",
            "app",
            "--report",
            "json",
            "--skip-install",
            "--install-timeout",
            "0",
            "--production",
        ]);
        assert_eq!(cli.path, PathBuf::from("app"));
        assert!(matches!(cli.report, ReportFormat::Json));
        assert!(cli.skip_install);
        assert_eq!(cli.install_timeout, Some(0));
        assert!(cli.production);
    }

    #[test]
    fn test_manifest_conflicts_with_online() {
        let parsed = Cli::try_parse_from([
            "npm-license-checkr",
            "--manifest",
            "package.json",
            "--online",
        ]);
        assert!(parsed.is_err());
    }
}
