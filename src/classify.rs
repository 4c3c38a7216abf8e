// src/classify.rs

//! Maps file names to normalized type tags.
//!
//! Classification is pure and profile-aware: the same name always yields the
//! same tag, and a tag counts as "recognized" only when the active profile
//! lists it. Unrecognized files are not dropped by callers; the walker parks
//! them as promotable other-files.

use crate::profiles::ProjectProfile;

/// Tag returned when no rule applies. Never recognized by any profile.
pub const UNKNOWN_TAG: &str = "unknown";

// Whole filenames with a dedicated tag (case-insensitive check). These would
// otherwise classify as generic "json" or not at all.
const SPECIAL_FILENAMES: &[(&str, &str)] = &[
    ("package.json", "packagejson"),
    ("tsconfig.json", "tsconfig"),
    (".gitignore", "gitignore"),
    ("dockerfile", "dockerfile"),
];

/// Classifies `file_name` into a normalized lowercase type tag.
///
/// Priority order: dedicated whole-filename tags, bare names without an
/// interior dot (hidden files like `.gitignore` variants, `makefile`-style
/// names), the exact `pom.xml` pair, the `.gradle` build-script suffix, and
/// finally the substring after the last dot checked against the profile.
///
/// # Examples
///
/// ```
/// use srcunify::classify::classify;
/// use srcunify::profiles::ProjectProfile;
///
/// let java = ProjectProfile::java();
/// assert_eq!(classify("Main.java", java), "java");
/// assert_eq!(classify("pom.xml", java), "pom");
/// assert_eq!(classify("settings.gradle", java), "gradle");
/// assert_eq!(classify("logo.png", java), "unknown");
/// ```
pub fn classify(file_name: &str, profile: &ProjectProfile) -> String {
    let lower = file_name.to_ascii_lowercase();
    let lower = lower.trim();
    if lower.is_empty() {
        return UNKNOWN_TAG.to_string();
    }

    // --- 1. Dedicated whole-filename tags ---
    for (name, tag) in SPECIAL_FILENAMES {
        if lower == *name {
            return (*tag).to_string();
        }
    }

    // --- 2. Bare names: no interior dot, optionally one leading dot ---
    let bare = lower.strip_prefix('.').unwrap_or(lower);
    if !bare.contains('.') && profile.recognizes(bare) {
        return bare.to_string();
    }

    // --- 3. Two-part exact match, distinct from generic xml ---
    if lower == "pom.xml" {
        return "pom".to_string();
    }

    // --- 4. Build-script suffix ---
    if lower.ends_with(".gradle") {
        return "gradle".to_string();
    }

    // --- 5. Everything after the last dot ---
    match lower.rsplit_once('.') {
        Some((_, suffix)) if profile.recognizes(suffix) => suffix.to_string(),
        _ => UNKNOWN_TAG.to_string(),
    }
}

/// True when `file_name` classifies to a tag the profile recognizes.
pub fn is_recognized(file_name: &str, profile: &ProjectProfile) -> bool {
    profile.recognizes(&classify(file_name, profile))
}
