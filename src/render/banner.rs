//! Banner frames delimiting projects, groups, and files in unified output.

use once_cell::sync::Lazy;
use regex::Regex;

const FRAME_WIDTH: usize = 60;

/// Prefixes of every line this renderer can emit as a banner. Used to strip
/// stale banners from content that was itself produced by an earlier run.
const BANNER_PREFIXES: &[&str] = &[
    "//####",
    "//====",
    "//----",
    "// Project:",
    "// Package:",
    "// Directory:",
    "// Group:",
    "// File (",
    "// Path:",
];

// A dotted identifier with at least two segments, e.g. "com.acme.app".
// Single-segment keys are ambiguous (package "util" vs directory "src") and
// fall back to the generic label.
static DOTTED_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)+$").unwrap());

fn frame(fill: &str) -> String {
    format!("//{}", fill.repeat(FRAME_WIDTH))
}

/// Chooses the banner label for a group key by its shape.
pub(crate) fn group_label(key: &str) -> &'static str {
    if key.contains('/') {
        "Directory"
    } else if DOTTED_IDENTIFIER_RE.is_match(key) {
        "Package"
    } else {
        "Group"
    }
}

/// Emits the three-line project frame plus a trailing blank line.
pub(crate) fn push_project_banner(out: &mut Vec<String>, name: &str) {
    out.push(frame("#"));
    out.push(format!("// Project: {}", name));
    out.push(frame("#"));
    out.push(String::new());
}

/// Emits the three-line group frame plus a trailing blank line.
pub(crate) fn push_group_banner(out: &mut Vec<String>, key: &str) {
    out.push(frame("="));
    out.push(format!("// {}: {}", group_label(key), key));
    out.push(frame("="));
    out.push(String::new());
}

/// Emits the four-line file frame plus a trailing blank line.
pub(crate) fn push_file_banner(out: &mut Vec<String>, file_type: &str, name: &str, path: &str) {
    out.push(frame("-"));
    out.push(format!("// File ({}): {}", file_type.to_uppercase(), name));
    out.push(format!("// Path: {}", path));
    out.push(frame("-"));
    out.push(String::new());
}

/// Removes lines that start with any banner prefix, so re-unifying an
/// already-unified document does not nest the previous run's banners.
pub(crate) fn strip_stale_banners(content: &str) -> String {
    content
        .lines()
        .filter(|line| !BANNER_PREFIXES.iter().any(|p| line.starts_with(p)))
        .collect::<Vec<&str>>()
        .join("\n")
}
