// src/output/filename.rs

//! Builds the suggested name for the unified output file.

use crate::constants::{MULTI_PROJECT_NAME, OUTPUT_EXTENSION, UNIFIED_SUFFIX, UNTITLED_PROJECT};
use crate::core_types::Project;
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid file name sanitizer regex"));

/// Suggests an output file name for the given contributing projects.
///
/// A single project contributes its cleaned display name, several fall back
/// to a generic multi-project name. The `_unified` suffix is appended, every
/// character outside `[A-Za-z0-9_.-]` becomes `_`, and the `.txt` extension
/// is added unless the name already carries it.
///
/// # Examples
///
/// ```
/// use srcunify::core_types::{Project, RootKind};
/// use srcunify::output::suggest_output_file_name;
///
/// let project = Project::new("My App (1)", RootKind::Folder);
/// assert_eq!(
///     suggest_output_file_name(&[&project]),
///     "My_App_unified.txt"
/// );
/// ```
pub fn suggest_output_file_name(contributing: &[&Project]) -> String {
    let base = match contributing {
        [] => UNTITLED_PROJECT,
        [only] => only.name.as_str(),
        _ => MULTI_PROJECT_NAME,
    };
    let mut name = UNSAFE_NAME_CHARS_RE
        .replace_all(&format!("{}{}", base, UNIFIED_SUFFIX), "_")
        .into_owned();
    if !name.to_ascii_lowercase().ends_with(OUTPUT_EXTENSION) {
        name.push_str(OUTPUT_EXTENSION);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::RootKind;

    #[test]
    fn test_single_project_uses_cleaned_name() {
        let project = Project::new("demo.zip", RootKind::File);
        assert_eq!(suggest_output_file_name(&[&project]), "demo_unified.txt");
    }

    #[test]
    fn test_several_projects_use_generic_name() {
        let a = Project::new("a", RootKind::Folder);
        let b = Project::new("b", RootKind::Folder);
        assert_eq!(
            suggest_output_file_name(&[&a, &b]),
            "Unified_Projects_unified.txt"
        );
    }

    #[test]
    fn test_no_projects_fall_back_to_untitled() {
        assert_eq!(suggest_output_file_name(&[]), "UntitledProject_unified.txt");
    }

    #[test]
    fn test_unsafe_characters_become_underscores() {
        let project = Project::new("naïve app+crm", RootKind::Folder);
        assert_eq!(
            suggest_output_file_name(&[&project]),
            "na_ve_app_crm_unified.txt"
        );
    }

    #[test]
    fn test_reunifying_previous_output_suggests_same_name() {
        // "demo_unified.txt" cleans back to "demo", so the suggestion is stable.
        let project = Project::new("demo_unified.txt", RootKind::File);
        assert_eq!(suggest_output_file_name(&[&project]), "demo_unified.txt");
    }
}
