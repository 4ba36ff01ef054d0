//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `0.1.0 (2024-06-01, abc1234)`
pub fn version_line() -> String {
    format!("{} ({}, {})", PKG_VERSION, BUILD_DATE, BUILD_COMMIT)
}
