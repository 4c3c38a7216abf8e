// src/profiles.rs

//! The three built-in project profiles.
//!
//! A profile is an immutable value object: the set of recognized type tags
//! plus the subset selected by default. Profiles are passed explicitly into
//! classifier, resolver, walker, and renderer calls; nothing reads them from
//! ambient state.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

/// Identifies one of the built-in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Narrow profile for Java/JVM project trees.
    Java,
    /// Broad profile for web front-end trees.
    Web,
    /// Catch-all combining both plus general-purpose scripting extensions.
    All,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Java => write!(f, "java"),
            ProfileKind::Web => write!(f, "web"),
            ProfileKind::All => write!(f, "all"),
        }
    }
}

/// A named set of recognized type tags plus the default-selected subset.
///
/// Invariant: `default_selected ⊆ extensions`, checked by tests for every
/// built-in profile.
#[derive(Debug)]
pub struct ProjectProfile {
    /// Short profile name ("java", "web", "all").
    pub name: &'static str,
    /// Which built-in this is.
    pub kind: ProfileKind,
    extensions: HashSet<&'static str>,
    default_selected: HashSet<&'static str>,
}

impl ProjectProfile {
    /// Returns the built-in profile for `kind`.
    pub fn of(kind: ProfileKind) -> &'static ProjectProfile {
        match kind {
            ProfileKind::Java => &JAVA,
            ProfileKind::Web => &WEB,
            ProfileKind::All => &ALL,
        }
    }

    /// Narrow Java/JVM profile.
    pub fn java() -> &'static ProjectProfile {
        &JAVA
    }

    /// Web front-end profile.
    pub fn web() -> &'static ProjectProfile {
        &WEB
    }

    /// Catch-all profile.
    pub fn all() -> &'static ProjectProfile {
        &ALL
    }

    /// True when `tag` is recognized by this profile. The fallback tag
    /// `"unknown"` is never recognized.
    pub fn recognizes(&self, tag: &str) -> bool {
        self.extensions.contains(tag)
    }

    /// True when files tagged `tag` start out selected.
    pub fn selected_by_default(&self, tag: &str) -> bool {
        self.default_selected.contains(tag)
    }

    /// Every tag this profile recognizes (test support, stable contents,
    /// unspecified order).
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().copied()
    }

    /// Every tag selected by default (test support).
    pub fn default_selected(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.default_selected.iter().copied()
    }
}

// Tag tables. Tags are classifier outputs, not raw suffixes: whole-filename
// tags like "packagejson" or "dockerfile" appear here alongside plain
// extensions.

const JAVA_EXTENSIONS: &[&str] = &[
    // --- Source and build descriptors ---
    "java", "xml", "pom", "gradle", "properties", "classpath", "project",
    // --- Data and docs commonly checked into JVM trees ---
    "txt", "md", "sql", "csv", "yaml", "yml", "dat",
];

const JAVA_DEFAULT_SELECTED: &[&str] = &["java"];

const WEB_EXTENSIONS: &[&str] = &[
    // --- Markup and styles ---
    "html", "htm", "css", "scss", "sass", "less", "svg",
    // --- Scripts and components ---
    "js", "mjs", "cjs", "ts", "jsx", "tsx", "vue", "svelte",
    // --- Config and metadata ---
    "json", "packagejson", "tsconfig", "gitignore", "dockerfile",
    // --- Data and docs ---
    "md", "txt", "xml", "yaml", "yml",
];

const WEB_DEFAULT_SELECTED: &[&str] = &[
    "html", "css", "scss", "js", "ts", "jsx", "tsx", "vue", "svelte",
];

const SCRIPTING_EXTENSIONS: &[&str] = &[
    "py", "rb", "go", "rs", "c", "cpp", "h", "hpp", "cs", "php", "kt", "swift", "sh", "bash",
    "toml", "ini",
];

const SCRIPTING_DEFAULT_SELECTED: &[&str] = &[
    "py", "rb", "go", "rs", "c", "cpp", "cs", "php", "kt", "swift", "sh",
];

static JAVA: Lazy<ProjectProfile> = Lazy::new(|| ProjectProfile {
    name: "java",
    kind: ProfileKind::Java,
    extensions: JAVA_EXTENSIONS.iter().copied().collect(),
    default_selected: JAVA_DEFAULT_SELECTED.iter().copied().collect(),
});

static WEB: Lazy<ProjectProfile> = Lazy::new(|| ProjectProfile {
    name: "web",
    kind: ProfileKind::Web,
    extensions: WEB_EXTENSIONS.iter().copied().collect(),
    default_selected: WEB_DEFAULT_SELECTED.iter().copied().collect(),
});

static ALL: Lazy<ProjectProfile> = Lazy::new(|| ProjectProfile {
    name: "all",
    kind: ProfileKind::All,
    extensions: JAVA_EXTENSIONS
        .iter()
        .chain(WEB_EXTENSIONS)
        .chain(SCRIPTING_EXTENSIONS)
        .copied()
        .collect(),
    default_selected: JAVA_DEFAULT_SELECTED
        .iter()
        .chain(WEB_DEFAULT_SELECTED)
        .chain(SCRIPTING_DEFAULT_SELECTED)
        .copied()
        .collect(),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selected_is_subset_of_extensions() {
        for profile in [ProjectProfile::java(), ProjectProfile::web(), ProjectProfile::all()] {
            for tag in profile.default_selected() {
                assert!(
                    profile.recognizes(tag),
                    "profile '{}' pre-selects unrecognized tag '{}'",
                    profile.name,
                    tag
                );
            }
        }
    }

    #[test]
    fn test_web_default_selection_list() {
        let web = ProjectProfile::web();
        for tag in ["html", "css", "scss", "js", "ts", "jsx", "tsx", "vue", "svelte"] {
            assert!(web.selected_by_default(tag), "'{}' should be pre-selected", tag);
        }
        assert!(!web.selected_by_default("json"));
        assert!(!web.selected_by_default("md"));
    }

    #[test]
    fn test_all_profile_covers_both() {
        let all = ProjectProfile::all();
        assert!(all.recognizes("java"));
        assert!(all.recognizes("svelte"));
        assert!(all.recognizes("py"));
        assert!(all.selected_by_default("java"));
        assert!(all.selected_by_default("rs"));
    }

    #[test]
    fn test_unknown_is_never_recognized() {
        for profile in [ProjectProfile::java(), ProjectProfile::web(), ProjectProfile::all()] {
            assert!(!profile.recognizes("unknown"));
        }
    }

    #[test]
    fn test_of_resolves_kinds() {
        assert_eq!(ProjectProfile::of(ProfileKind::Java).name, "java");
        assert_eq!(ProjectProfile::of(ProfileKind::Web).name, "web");
        assert_eq!(ProjectProfile::of(ProfileKind::All).name, "all");
    }
}
