use std::path::PathBuf;

use thiserror::Error;

/// Failures of the manifest and license-file readers.
///
/// [`NpmResolver::resolve_package_license`](crate::resolver::NpmResolver::resolve_package_license)
/// absorbs these into the result; direct callers see them.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot read manifest {}: {source}", .path.display())]
    MissingManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed manifest {}: {source}", .path.display())]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot read license file {}: {source}", .path.display())]
    LicenseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
