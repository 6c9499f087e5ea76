use crate::license::spdx::{classify_spdx_id, normalize};
use crate::models::LicenseRisk;

/// Ordering used to pick the winner of an `OR` / `AND` expression.
fn severity(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Permissive => 0,
        LicenseRisk::WeakCopyleft => 1,
        LicenseRisk::StrongCopyleft => 2,
        LicenseRisk::Proprietary => 3,
        LicenseRisk::Unknown => 4,
    }
}

/// Classify a resolved license id into a risk level.
///
/// Handles:
/// - SPDX identifiers and common non-SPDX spellings
/// - `OR` expressions (and the legacy `licenses` join) → most permissive wins
/// - `AND` expressions → most restrictive known component wins
/// - npm's `UNLICENSED` and proprietary/commercial strings
/// - `SEE LICENSE IN <file>`, empty and unknown strings
pub fn classify(license: &str) -> LicenseRisk {
    let trimmed = license.trim();

    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("unknown")
        || trimmed.starts_with("SEE LICENSE IN")
    {
        return LicenseRisk::Unknown;
    }

    let lower = trimmed.to_lowercase();
    if lower == "unlicensed" || lower.contains("proprietary") || lower.contains("commercial") {
        return LicenseRisk::Proprietary;
    }

    let expr = trimmed
        .trim_start_matches('(')
        .trim_end_matches(')')
        .replace('/', " OR ");

    if expr.contains(" OR ") {
        return expr
            .split(" OR ")
            .map(classify_single)
            .min_by_key(severity)
            .unwrap_or(LicenseRisk::Unknown);
    }

    if expr.contains(" AND ") {
        let risks: Vec<LicenseRisk> = expr.split(" AND ").map(classify_single).collect();
        if risks.contains(&LicenseRisk::Unknown) {
            return LicenseRisk::Unknown;
        }
        return risks
            .into_iter()
            .max_by_key(severity)
            .unwrap_or(LicenseRisk::Unknown);
    }

    classify_single(&expr)
}

fn classify_single(id: &str) -> LicenseRisk {
    // GPL-2.0 WITH Classpath-exception-2.0 → GPL-2.0
    let base = id.split(" WITH ").next().unwrap_or(id);
    classify_spdx_id(&normalize(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_expression() {
        assert_eq!(classify("MIT OR GPL-3.0"), LicenseRisk::Permissive);
        assert_eq!(classify("(GPL-3.0 OR LGPL-3.0)"), LicenseRisk::WeakCopyleft);
    }

    #[test]
    fn test_slash_separator() {
        assert_eq!(classify("MIT/Apache-2.0"), LicenseRisk::Permissive);
        assert_eq!(classify("GPL-3.0/LGPL-3.0"), LicenseRisk::WeakCopyleft);
    }

    #[test]
    fn test_and_expression() {
        assert_eq!(classify("MIT AND GPL-3.0"), LicenseRisk::StrongCopyleft);
        assert_eq!(classify("MIT AND CUSTOM"), LicenseRisk::Unknown);
    }

    #[test]
    fn test_proprietary() {
        assert_eq!(classify("UNLICENSED"), LicenseRisk::Proprietary);
        assert_eq!(classify("commercial license"), LicenseRisk::Proprietary);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify(""), LicenseRisk::Unknown);
        assert_eq!(classify("unknown"), LicenseRisk::Unknown);
        assert_eq!(classify("SEE LICENSE IN LICENSE.md"), LicenseRisk::Unknown);
        assert_eq!(classify("CUSTOM-LICENSE-42"), LicenseRisk::Unknown);
    }

    #[test]
    fn test_non_spdx_spelling() {
        assert_eq!(classify("The MIT License"), LicenseRisk::Permissive);
    }

    #[test]
    fn test_with_exception() {
        assert_eq!(
            classify("GPL-2.0 WITH Classpath-exception-2.0"),
            LicenseRisk::StrongCopyleft
        );
    }
}
