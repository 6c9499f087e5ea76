//! Async lookup of license data in the npm registry, used by `--online`.
//!
//! [`npm::fetch_license`] returns `Ok(Some(license))` on success, `Ok(None)`
//! when the package is not found or declares no license, and `Err` on network
//! failures.

pub mod npm;
