pub const ARCH_AMD64: &str = "amd64";
pub const ARCH_386: &str = "386";
pub const ARCH_ARM64: &str = "arm64";
pub const ARCH_ARM: &str = "arm";

/// Map a recognized architecture spelling to its canonical token.
pub fn canonical_arch(raw: &str) -> Option<&'static str> {
    match raw.to_ascii_lowercase().as_str() {
        "amd64" | "x64" | "x86_64" => Some(ARCH_AMD64),
        "ia32" | "x86" | "386" | "i386" | "i686" => Some(ARCH_386),
        "arm64" | "aarch64" => Some(ARCH_ARM64),
        "arm" | "armv6" | "armv6l" | "armv7" | "armv7l" | "armhf" | "armel" => Some(ARCH_ARM),
        _ => None,
    }
}

/// Normalize an architecture string.
///
/// Unrecognized input is returned verbatim so unknown architectures still
/// compare equal to themselves.
pub fn normalize_arch(raw: &str) -> String {
    canonical_arch(raw).map_or_else(|| raw.to_string(), str::to_string)
}
