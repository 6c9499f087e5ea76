use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LicenseRisk, PackageResult, PolicyVerdict, Report};

/// Render a colored terminal report.
///
/// Cross-platform packages are counted separately and only listed with
/// `verbose`; they are not installed on this host and carry no verdict.
pub fn render(report: &Report, path: &Path, verbose: bool, quiet: bool) -> Result<()> {
    let checked: Vec<&PackageResult> = report.iter().filter(|r| !r.is_cross_platform).collect();
    let count = |verdict: PolicyVerdict| checked.iter().filter(|r| r.verdict == verdict).count();
    let pass_count = count(PolicyVerdict::Pass);
    let warn_count = count(PolicyVerdict::Warn);
    let error_count = count(PolicyVerdict::Error);
    let foreign_count = report.cross_platform_count();

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}  Other platforms: {}",
            checked.len(),
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
            foreign_count.to_string().dimmed(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "npm-license-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Installed packages : {}", checked.len()));
    for (symbol, label, n, verdict) in [
        ("✓".green(), "Pass", pass_count, PolicyVerdict::Pass),
        ("⚠".yellow(), "Warn", warn_count, PolicyVerdict::Warn),
        ("✗".red(), "Error", error_count, PolicyVerdict::Error),
    ] {
        println!(
            " │  {:<48} │",
            format!(
                "{}  {:<16}: {:>4}  {}",
                symbol,
                label,
                n,
                summarize_licenses(&checked, &verdict)
            )
        );
    }
    println!(
        " │  {:<48} │",
        format!("-  {:<16}: {:>4}", "Other platforms", foreign_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Packages requiring attention:\n", "[ERROR]".red().bold());
        render_table(checked.iter().copied().filter(|r| r.verdict == PolicyVerdict::Error));
        println!();
    }

    if warn_count > 0 {
        println!(" {} Packages with warnings:\n", "[WARN]".yellow().bold());
        render_table(checked.iter().copied().filter(|r| r.verdict == PolicyVerdict::Warn));
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All passing packages:\n", "[PASS]".green().bold());
        render_table(checked.iter().copied().filter(|r| r.verdict == PolicyVerdict::Pass));
        println!();
    }

    if verbose && foreign_count > 0 {
        println!(" {} Built for other platforms:\n", "[SKIP]".dimmed().bold());
        for result in report.skipped.iter().filter(|r| r.is_cross_platform) {
            println!("   {}", result.package_name.dimmed());
        }
        println!();
    }

    Ok(())
}

fn render_table<'a>(results: impl Iterator<Item = &'a PackageResult>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for result in results {
        let (verdict_str, verdict_color) = match result.verdict {
            PolicyVerdict::Pass => ("✓ pass", Color::Green),
            PolicyVerdict::Warn => ("⚠ warn", Color::Yellow),
            PolicyVerdict::Error => ("✗ error", Color::Red),
        };

        let risk_color = match result.risk {
            LicenseRisk::Permissive => Color::Green,
            LicenseRisk::WeakCopyleft => Color::Yellow,
            LicenseRisk::StrongCopyleft => Color::Red,
            LicenseRisk::Proprietary => Color::Magenta,
            LicenseRisk::Unknown => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(&result.package_name),
            Cell::new(result.version.as_deref().unwrap_or("-")),
            Cell::new(license_of(result)),
            Cell::new(result.source.to_string()),
            Cell::new(result.risk.to_string()).fg(risk_color),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn license_of(result: &PackageResult) -> &str {
    result.license_spdx_id.as_deref().unwrap_or("unknown")
}

/// Top three licenses among results with `verdict`, e.g. `[MIT (40), ISC (12)]`.
fn summarize_licenses(results: &[&PackageResult], verdict: &PolicyVerdict) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for result in results.iter().filter(|r| &r.verdict == verdict) {
        *counts.entry(license_of(result)).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, license: Option<&str>, verdict: PolicyVerdict) -> PackageResult {
        let mut r = PackageResult::new(name, format!("/app/node_modules/{name}"));
        r.license_spdx_id = license.map(str::to_string);
        r.verdict = verdict;
        r
    }

    #[test]
    fn test_summarize_licenses() {
        let results = [
            result("a", Some("MIT"), PolicyVerdict::Pass),
            result("b", Some("MIT"), PolicyVerdict::Pass),
            result("c", Some("ISC"), PolicyVerdict::Pass),
            result("d", None, PolicyVerdict::Warn),
        ];
        let refs: Vec<&PackageResult> = results.iter().collect();
        assert_eq!(
            summarize_licenses(&refs, &PolicyVerdict::Pass),
            "[MIT (2), ISC (1)]"
        );
        assert_eq!(
            summarize_licenses(&refs, &PolicyVerdict::Warn),
            "[unknown (1)]"
        );
        assert_eq!(summarize_licenses(&refs, &PolicyVerdict::Error), "");
    }
}
