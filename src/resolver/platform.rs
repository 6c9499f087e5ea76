use super::arch::{canonical_arch, normalize_arch};

/// OS tokens recognized in platform-specific package names.
const OS_TOKENS: &[&str] = &[
    "linux", "darwin", "win32", "freebsd", "openbsd", "netbsd", "android", "sunos", "aix",
];

/// Trailing segments allowed after `<os>-<arch>`, e.g. `-gnu` or `-musl`.
const LIBC_QUALIFIERS: &[&str] = &[
    "gnu",
    "glibc",
    "musl",
    "msvc",
    "gnueabihf",
    "musleabihf",
    "eabi",
    "eabihf",
];

/// The host a resolution runs for, as canonical OS and arch tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: String,
    pub arch: String,
}

impl HostPlatform {
    /// Build a host from raw values; the arch is normalized.
    pub fn new(os: impl Into<String>, arch: &str) -> Self {
        Self {
            os: os.into(),
            arch: normalize_arch(arch),
        }
    }

    /// The platform this binary was compiled for, in npm's vocabulary.
    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            "windows" => "win32",
            "solaris" | "illumos" => "sunos",
            other => other,
        };
        Self::new(os, std::env::consts::ARCH)
    }
}

/// Extract the `(os, arch)` encoded in a package name.
///
/// The base name (after any `@scope/`) must end in exactly
/// `<os>-<arch>` or `<os>-<arch>-<libc>`. Anything else, including a bare OS
/// without an arch, yields `None`.
pub fn analyze_package_platform(pkg_name: &str) -> Option<(String, String)> {
    let base = pkg_name.rsplit('/').next().unwrap_or(pkg_name);
    let segments: Vec<&str> = base.split('-').collect();

    match_os_arch(&segments).or_else(|| match segments.split_last() {
        Some((qualifier, rest)) if LIBC_QUALIFIERS.contains(qualifier) => match_os_arch(rest),
        _ => None,
    })
}

fn match_os_arch(segments: &[&str]) -> Option<(String, String)> {
    let [.., os, arch] = segments else {
        return None;
    };
    if !OS_TOKENS.contains(os) {
        return None;
    }
    let arch = canonical_arch(arch)?;
    Some(((*os).to_string(), arch.to_string()))
}

/// Whether a package is usable on `host`.
///
/// Packages without platform information apply everywhere.
pub fn is_for_current_platform(pkg_name: &str, host: &HostPlatform) -> bool {
    match analyze_package_platform(pkg_name) {
        None => true,
        Some((os, arch)) => os == host.os && arch == host.arch,
    }
}
