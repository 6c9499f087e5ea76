//! `npm-license-checkr`: resolve the license of every installed npm package and enforce policy.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]), CLI flags override `[dependency]`.
//! 3. Locate `package.json` ([`detector::detect_manifest`]).
//! 4. Install (unless skipped), list and resolve installed packages ([`resolver`], [`manager`]).
//! 5. Optionally look up unresolved licenses in the npm registry (`--online`, [`registry`]).
//! 6. Classify licenses and apply policy ([`license`], [`config::apply_policy`]).
//! 7. Render the requested report ([`report`]).
//! 8. Exit `0` (clean) or `1` (at least one [`models::PolicyVerdict::Error`]).

mod cli;
mod config;
mod detector;
mod error;
mod license;
mod manager;
mod models;
mod registry;
mod report;
mod resolver;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, ReportFormat};
use config::{apply_policy, load_config};
use detector::detect_manifest;
use license::classifier::classify;
use manager::{npm::NpmCli, walker::NodeModulesWalker, PackageManager};
use models::{LicenseSource, PolicyVerdict, Report};
use resolver::license_field::{resolve_license_field, resolve_licenses_field};
use resolver::manifest::parse_pkg_file;
use resolver::platform::HostPlatform;
use resolver::NpmResolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(manifest) = &cli.manifest {
        return print_manifest_license(manifest, cli.report);
    }

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let mut config = load_config(&path, cli.config.as_deref())?;
    if cli.skip_install {
        config.dependency.skip_install = true;
    }
    if let Some(secs) = cli.install_timeout {
        config.dependency.install_timeout_secs = secs;
    }
    if cli.production {
        config.dependency.production_only = true;
    }

    let Some(manifest_file) = detect_manifest(&path) else {
        eprintln!("No package.json found in {}", path.display());
        std::process::exit(1);
    };

    let host = HostPlatform::current();
    info!(os = %host.os, arch = %host.arch, manifest = %manifest_file.display(), "resolving");

    let manager: Box<dyn PackageManager> = if cli.walk {
        Box::new(NodeModulesWalker::new())
    } else {
        Box::new(NpmCli::new(&config.dependency))
    };
    let mut report = NpmResolver::new(host).resolve(manager.as_ref(), &manifest_file, &config);

    if !cli.quiet {
        eprintln!(
            "  {} {} packages resolved, {} skipped ({} for other platforms)",
            "→".cyan(),
            report.resolved.len(),
            report.skipped.len(),
            report.cross_platform_count()
        );
    }

    if cli.online {
        enrich_online(&mut report, cli.quiet).await?;
    }

    // Cross-platform packages keep their pass verdict: nothing of them ships on this host
    for result in report.iter_mut().filter(|r| !r.is_cross_platform) {
        let license = result.license_spdx_id.as_deref();
        result.risk = classify(license.unwrap_or("unknown"));
        result.verdict = apply_policy(&config, license);
    }

    let project_dir = manifest_file.parent().unwrap_or(path.as_path());
    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&report, project_dir, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    let has_errors = report.iter().any(|r| r.verdict == PolicyVerdict::Error);
    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,npm_license_checkr={level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `--manifest`: read one `package.json` and print what its license fields resolve to.
fn print_manifest_license(path: &Path, format: ReportFormat) -> Result<()> {
    let manifest = parse_pkg_file(path)?;
    let license = resolve_license_field(&manifest.license)
        .or_else(|| resolve_licenses_field(&manifest.license_entries()));

    match format {
        ReportFormat::Json => {
            let doc = serde_json::json!({
                "name": manifest.name,
                "version": manifest.version,
                "license": license,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        ReportFormat::Terminal => {
            println!(
                "{}@{}: {}",
                manifest.name.as_deref().unwrap_or("<unnamed>"),
                manifest.version.as_deref().unwrap_or("?"),
                license.as_deref().unwrap_or("unknown")
            );
        }
    }
    Ok(())
}

/// Look up host packages without a license in the npm registry; found ones
/// move from `skipped` to `resolved`.
async fn enrich_online(report: &mut Report, quiet: bool) -> Result<()> {
    use futures::future::join_all;

    const BATCH_SIZE: usize = 75;

    let mut skipped = std::mem::take(&mut report.skipped);
    let pending = skipped.iter().filter(|r| !r.is_cross_platform).count();

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let pb = if !quiet && pending > 0 {
        let pb = ProgressBar::new(pending as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    for batch in skipped.chunks_mut(BATCH_SIZE) {
        let lookups: Vec<_> = batch
            .iter()
            .map(|result| {
                let client = client.clone();
                let name = registry::npm::registry_name(result);
                let version = result.version.clone();
                let wanted = !result.is_cross_platform;
                async move {
                    if !wanted {
                        return Ok(None);
                    }
                    registry::npm::fetch_license(&client, &name, version.as_deref()).await
                }
            })
            .collect();

        let outcomes = join_all(lookups).await;

        for (result, outcome) in batch.iter_mut().zip(outcomes) {
            if result.is_cross_platform {
                continue;
            }
            match outcome {
                Ok(Some(license)) => {
                    result.license_spdx_id = Some(license);
                    result.source = LicenseSource::Registry;
                }
                Ok(None) => {}
                Err(e) => debug!(package = %result.package_name, "registry lookup failed: {e:#}"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    for result in skipped {
        if result.license_spdx_id.is_some() {
            report.resolve(result);
        } else {
            report.skip(result);
        }
    }

    Ok(())
}
