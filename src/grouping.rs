// src/grouping.rs

//! Computes the group key that clusters files inside a rendered project.
//!
//! Java sources group by the `package` declaration found in their content;
//! web and catch-all profiles group by containing directory. Directory-based
//! package inference is deliberately not attempted for Java: a missing
//! declaration lands in the default-package bucket.

use crate::constants::{DEFAULT_PACKAGE, OTHER_FILES};
use crate::profiles::{ProfileKind, ProjectProfile};
use once_cell::sync::Lazy;
use regex::Regex;

static PACKAGE_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*package\s+([A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*)\s*;")
        .expect("valid package declaration regex")
});

/// Resolves the group key for one classified file. Pure: same inputs, same
/// key, no I/O.
pub fn resolve_group(
    relative_path: &str,
    content: &str,
    file_type: &str,
    profile: &ProjectProfile,
) -> String {
    match profile.kind {
        ProfileKind::Java if file_type == "java" => content
            .lines()
            .find_map(|line| PACKAGE_DECL_RE.captures(line))
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
        ProfileKind::Web | ProfileKind::All => containing_directory(relative_path)
            .map(str::to_string)
            .unwrap_or_else(|| OTHER_FILES.to_string()),
        _ => OTHER_FILES.to_string(),
    }
}

/// All path segments except the leaf, joined by `/`. `None` for root-level
/// paths.
fn containing_directory(relative_path: &str) -> Option<&str> {
    match relative_path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => Some(dir),
        _ => None,
    }
}
