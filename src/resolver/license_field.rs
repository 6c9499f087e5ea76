use serde::Deserialize;
use serde_json::Value;

/// One element of the deprecated `licenses` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LicenseEntry {
    #[serde(rename = "type", default)]
    pub license_type: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl LicenseEntry {
    pub fn new(license_type: impl Into<String>) -> Self {
        Self {
            license_type: license_type.into(),
            url: None,
        }
    }
}

/// Resolve the `license` field of a manifest.
///
/// Accepts `"MIT"` and the older `{ "type": "MIT", "url": "..." }`.
pub fn resolve_license_field(raw: &Value) -> Option<String> {
    let id = match raw {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("type")?.as_str()?,
        _ => return None,
    };
    if id.trim().is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Resolve the legacy `licenses` array by joining its entries with `OR`.
pub fn resolve_licenses_field(entries: &[LicenseEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let ids: Vec<&str> = entries.iter().map(|e| e.license_type.as_str()).collect();
    Some(ids.join(" OR "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_license_field_string() {
        assert_eq!(resolve_license_field(&json!("MIT")), Some("MIT".to_string()));
    }

    #[test]
    fn test_license_field_object() {
        let raw = json!({ "type": "GPL-3.0", "url": "https://www.gnu.org/licenses/gpl-3.0.txt" });
        assert_eq!(resolve_license_field(&raw), Some("GPL-3.0".to_string()));
    }

    #[test]
    fn test_license_field_unsupported_shapes() {
        assert_eq!(resolve_license_field(&Value::Null), None);
        assert_eq!(resolve_license_field(&json!("")), None);
        assert_eq!(resolve_license_field(&json!(42)), None);
        assert_eq!(resolve_license_field(&json!(["MIT"])), None);
        assert_eq!(resolve_license_field(&json!({ "url": "https://x" })), None);
        assert_eq!(resolve_license_field(&json!({ "type": 1 })), None);
    }

    #[test]
    fn test_licenses_field_joined_in_order() {
        let entries = vec![LicenseEntry::new("MIT"), LicenseEntry::new("GPL-3.0")];
        assert_eq!(
            resolve_licenses_field(&entries),
            Some("MIT OR GPL-3.0".to_string())
        );
    }

    #[test]
    fn test_licenses_field_keeps_duplicates() {
        let entries = vec![
            LicenseEntry::new("MIT"),
            LicenseEntry::new("Apache-2.0"),
            LicenseEntry::new("MIT"),
        ];
        assert_eq!(
            resolve_licenses_field(&entries),
            Some("MIT OR Apache-2.0 OR MIT".to_string())
        );
    }

    #[test]
    fn test_licenses_field_empty() {
        assert_eq!(resolve_licenses_field(&[]), None);
    }
}
