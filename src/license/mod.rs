//! Risk classification of resolved license ids.
//!
//! - [`spdx`] — maps canonical SPDX identifiers to [`LicenseRisk`](crate::models::LicenseRisk)
//!   and normalizes common non-SPDX strings found in `package.json`.
//! - [`classifier`] — entry point for whole license strings, including `OR`/`AND`
//!   combinations and npm's `UNLICENSED`.

pub mod classifier;
pub mod spdx;
