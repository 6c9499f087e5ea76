use crate::models::LicenseRisk;

const PERMISSIVE: &[&str] = &[
    "MIT",
    "MIT-0",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-4-Clause",
    "0BSD",
    "ISC",
    "Unlicense",
    "Zlib",
    "CC0-1.0",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "WTFPL",
    "Python-2.0",
    "BlueOak-1.0.0",
    "Artistic-2.0",
];

const WEAK_COPYLEFT: &[&str] = &[
    "LGPL-2.0",
    "LGPL-2.1",
    "LGPL-3.0",
    "MPL-1.1",
    "MPL-2.0",
    "EPL-1.0",
    "EPL-2.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "EUPL-1.2",
    "OSL-3.0",
    "CC-BY-SA-4.0",
];

const STRONG_COPYLEFT: &[&str] = &[
    "GPL-2.0",
    "GPL-3.0",
    "AGPL-1.0",
    "AGPL-3.0",
    "EUPL-1.1",
    "SSPL-1.0",
];

/// Classify a single canonical SPDX identifier into a risk level.
///
/// `-only`, `-or-later` and the deprecated `+` suffix share the risk of
/// their base identifier.
pub fn classify_spdx_id(id: &str) -> LicenseRisk {
    let id = id.trim();
    let base = id
        .strip_suffix("-only")
        .or_else(|| id.strip_suffix("-or-later"))
        .or_else(|| id.strip_suffix('+'))
        .unwrap_or(id);

    if PERMISSIVE.contains(&base) {
        LicenseRisk::Permissive
    } else if WEAK_COPYLEFT.contains(&base) {
        LicenseRisk::WeakCopyleft
    } else if STRONG_COPYLEFT.contains(&base) {
        LicenseRisk::StrongCopyleft
    } else {
        LicenseRisk::Unknown
    }
}

/// Normalize common non-SPDX spellings found in `package.json` files.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "Apache 2.0" | "Apache-2" | "Apache License 2.0" | "Apache License, Version 2.0" => {
            "Apache-2.0".to_string()
        }
        "MIT License" | "The MIT License" | "MIT/X11" | "Expat" => "MIT".to_string(),
        "BSD" | "BSD License" | "BSD-like" => "BSD-3-Clause".to_string(),
        "BSD 2-Clause" | "Simplified BSD" | "FreeBSD" => "BSD-2-Clause".to_string(),
        "BSD 3-Clause" | "New BSD" | "Modified BSD" => "BSD-3-Clause".to_string(),
        "GPLv2" | "GPL v2" | "GPL-2" => "GPL-2.0".to_string(),
        "GPLv3" | "GPL v3" | "GPL-3" => "GPL-3.0".to_string(),
        "LGPLv2.1" | "LGPL v2.1" => "LGPL-2.1".to_string(),
        "LGPLv3" | "LGPL v3" => "LGPL-3.0".to_string(),
        "MPL 2.0" | "MPLv2" | "Mozilla Public License 2.0" => "MPL-2.0".to_string(),
        "ISC License" => "ISC".to_string(),
        "CC0" | "Public Domain" => "CC0-1.0".to_string(),
        "AGPLv3" | "AGPL v3" => "AGPL-3.0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_permissive() {
        assert_eq!(classify_spdx_id("MIT"), LicenseRisk::Permissive);
        assert_eq!(classify_spdx_id("Apache-2.0"), LicenseRisk::Permissive);
        assert_eq!(classify_spdx_id("BSD-3-Clause"), LicenseRisk::Permissive);
    }

    #[test]
    fn test_classify_suffixed_ids() {
        assert_eq!(classify_spdx_id("GPL-3.0-only"), LicenseRisk::StrongCopyleft);
        assert_eq!(classify_spdx_id("GPL-2.0+"), LicenseRisk::StrongCopyleft);
        assert_eq!(classify_spdx_id("LGPL-2.1-or-later"), LicenseRisk::WeakCopyleft);
    }

    #[test]
    fn test_classify_weak_copyleft() {
        assert_eq!(classify_spdx_id("LGPL-2.1"), LicenseRisk::WeakCopyleft);
        assert_eq!(classify_spdx_id("MPL-2.0"), LicenseRisk::WeakCopyleft);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("MIT License"), "MIT");
        assert_eq!(normalize(" Apache License 2.0 "), "Apache-2.0");
        assert_eq!(normalize("BSD-2-Clause"), "BSD-2-Clause");
    }
}
