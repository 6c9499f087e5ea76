use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::models::PackageResult;
use crate::resolver::enumerator::scoped_pkg_name;
use crate::resolver::license_field::{resolve_license_field, resolve_licenses_field, LicenseEntry};

const REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Fetch the license of `name@version` from the npm registry.
///
/// Without a version the `latest` dist-tag is used.
pub async fn fetch_license(
    client: &Client,
    name: &str,
    version: Option<&str>,
) -> Result<Option<String>> {
    // @scope/pkg → @scope%2Fpkg
    let encoded_name = name.replace('/', "%2F");
    let url = match version {
        Some(v) => format!("{REGISTRY_URL}/{encoded_name}/{v}"),
        None => format!("{REGISTRY_URL}/{encoded_name}"),
    };

    let response = client
        .get(&url)
        .header("User-Agent", concat!("npm-license-checkr/", env!("CARGO_PKG_VERSION")))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        debug!(%url, status = %response.status(), "registry lookup failed");
        return Ok(None);
    }

    let data: Value = response.json().await?;

    let document = match version {
        Some(_) => Some(&data),
        None => data
            .pointer("/dist-tags/latest")
            .and_then(Value::as_str)
            .and_then(|latest| data.get("versions")?.get(latest)),
    };

    Ok(document.and_then(license_of))
}

/// The registry name of an installed package.
///
/// Installed directories drop the scope from the final path segment, so a
/// package under `node_modules/@scope/` is looked up as `@scope/<name>`.
pub fn registry_name(result: &PackageResult) -> String {
    scoped_pkg_name(&result.package_name, &result.path)
}

/// The license of a registry version document, with the same precedence as
/// a local manifest.
fn license_of(doc: &Value) -> Option<String> {
    if let Some(license) = doc.get("license").and_then(resolve_license_field) {
        return Some(license);
    }
    let entries: Vec<LicenseEntry> = doc
        .get("licenses")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    resolve_licenses_field(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_name() {
        let plain = PackageResult::new("lodash", "/app/node_modules/lodash");
        assert_eq!(registry_name(&plain), "lodash");
        let scoped = PackageResult::new("core", "/app/node_modules/@babel/core");
        assert_eq!(registry_name(&scoped), "@babel/core");
    }

    #[test]
    fn test_license_of_version_document() {
        assert_eq!(
            license_of(&json!({ "name": "lodash", "license": "MIT" })),
            Some("MIT".to_string())
        );
        assert_eq!(
            license_of(&json!({ "licenses": [{ "type": "MIT" }, { "type": "Apache-2.0" }] })),
            Some("MIT OR Apache-2.0".to_string())
        );
        assert_eq!(license_of(&json!({ "name": "nothing" })), None);
    }
}
