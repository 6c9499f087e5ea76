use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::PolicyVerdict;

const CONFIG_DIR: &str = ".npm-license-checkr";

/// Root configuration structure, deserialized from `.npm-license-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// License policy rules.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// How dependencies are installed, listed and overridden.
    #[serde(default)]
    pub dependency: DependencyConfig,
}

/// Defines how licenses are evaluated.
#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Verdict applied to any license not explicitly listed in `licenses`.
    /// Defaults to `warn`.
    #[serde(default = "default_policy_action")]
    pub default: PolicyAction,
    /// Per-license overrides keyed by SPDX identifier (e.g. `"MIT"`, `"GPL-3.0"`).
    #[serde(default)]
    pub licenses: HashMap<String, PolicyAction>,
}

fn default_policy_action() -> PolicyAction {
    PolicyAction::Warn
}

/// The action to take when a dependency's license matches a policy rule.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Pass,
    Warn,
    Error,
}

impl PolicyAction {
    pub fn to_verdict(&self) -> PolicyVerdict {
        match self {
            PolicyAction::Pass => PolicyVerdict::Pass,
            PolicyAction::Warn => PolicyVerdict::Warn,
            PolicyAction::Error => PolicyVerdict::Error,
        }
    }
}

impl Default for PolicyConfig {
    /// Built-in default policy used when no config file is found.
    ///
    /// Permissive licenses pass, weak-copyleft licenses warn, and strong-copyleft
    /// licenses (GPL, AGPL) produce an error.
    fn default() -> Self {
        let mut licenses = HashMap::new();
        for id in ["MIT", "Apache-2.0", "BSD-2-Clause", "BSD-3-Clause", "ISC", "0BSD"] {
            licenses.insert(id.to_string(), PolicyAction::Pass);
        }
        licenses.insert("LGPL-2.1".to_string(), PolicyAction::Warn);
        licenses.insert("GPL-2.0".to_string(), PolicyAction::Error);
        licenses.insert("GPL-3.0".to_string(), PolicyAction::Error);
        licenses.insert("AGPL-3.0".to_string(), PolicyAction::Error);
        licenses.insert("unknown".to_string(), PolicyAction::Warn);

        PolicyConfig {
            default: PolicyAction::Warn,
            licenses,
        }
    }
}

/// The `[dependency]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Never run `npm ci` / `npm install` before listing packages.
    pub skip_install: bool,
    /// How long the install prompt waits for a skip answer; `0` installs without asking.
    pub install_timeout_secs: u64,
    /// Leave dev dependencies out of the listing.
    pub production_only: bool,
    /// Licenses to use instead of what a package declares.
    pub licenses: Vec<LicenseOverride>,
    /// Packages left out of the report.
    pub excludes: Vec<Exclude>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            skip_install: false,
            install_timeout_secs: 5,
            production_only: false,
            licenses: Vec::new(),
            excludes: Vec::new(),
        }
    }
}

/// Pins the license of one package version, e.g. when its manifest is wrong.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseOverride {
    pub name: String,
    pub version: String,
    pub license: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Exclude {
    pub name: String,
    /// Only this version is excluded; all versions when absent.
    #[serde(default)]
    pub version: Option<String>,
}

impl DependencyConfig {
    /// The license override for `name@version`, if one is configured.
    pub fn license_override(&self, name: &str, version: &str) -> Option<&str> {
        self.licenses
            .iter()
            .find(|l| l.name == name && l.version == version)
            .map(|l| l.license.as_str())
    }

    /// The exclude rule matching the package name, if any.
    pub fn exclude_for(&self, name: &str) -> Option<&Exclude> {
        self.excludes.iter().find(|e| e.name == name)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.npm-license-checkr/config.toml`
/// 3. `~/.config/npm-license-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(CONFIG_DIR).join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("npm-license-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

/// Determine the policy verdict for a license identifier.
///
/// An exact entry wins. Otherwise the id is split on ` OR ` (least severe
/// alternative wins) and each alternative on ` AND ` (most severe term wins).
/// `WITH` exceptions are ignored and the base license is looked up.
pub fn apply_policy(config: &Config, license: Option<&str>) -> PolicyVerdict {
    let license = license.unwrap_or("unknown");

    if let Some(action) = config.policy.licenses.get(license) {
        return action.to_verdict();
    }

    let normalized = license.replace('/', " OR ").replace(['(', ')'], "");

    normalized
        .split(" OR ")
        .map(|alternative| {
            alternative
                .split(" AND ")
                .map(|term| apply_policy_single(config, term))
                .fold(PolicyVerdict::Pass, verdict_and)
        })
        .reduce(verdict_or)
        .unwrap_or_else(|| config.policy.default.to_verdict())
}

/// Look up a single SPDX identifier in the policy map.
fn apply_policy_single(config: &Config, id: &str) -> PolicyVerdict {
    let base = id.split(" WITH ").next().unwrap_or(id).trim();
    if let Some(action) = config.policy.licenses.get(base) {
        return action.to_verdict();
    }
    config.policy.default.to_verdict()
}

/// Most permissive (least severe) of two verdicts — used for OR semantics.
fn verdict_or(a: PolicyVerdict, b: PolicyVerdict) -> PolicyVerdict {
    match (a, b) {
        (PolicyVerdict::Pass, _) | (_, PolicyVerdict::Pass) => PolicyVerdict::Pass,
        (PolicyVerdict::Warn, _) | (_, PolicyVerdict::Warn) => PolicyVerdict::Warn,
        _ => PolicyVerdict::Error,
    }
}

/// Most restrictive (most severe) of two verdicts — used for AND semantics.
fn verdict_and(a: PolicyVerdict, b: PolicyVerdict) -> PolicyVerdict {
    match (a, b) {
        (PolicyVerdict::Error, _) | (_, PolicyVerdict::Error) => PolicyVerdict::Error,
        (PolicyVerdict::Warn, _) | (_, PolicyVerdict::Warn) => PolicyVerdict::Warn,
        _ => PolicyVerdict::Pass,
    }
}
