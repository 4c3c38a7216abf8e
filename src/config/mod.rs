// src/config/mod.rs

//! Defines the core `RunConfig` struct and related types for one run.
//!
//! This module consolidates all the settings parsed and validated from the
//! CLI, making them available to the rest of the application in a structured
//! and type-safe manner.

mod builder;

use crate::core_types::Project;
use crate::profiles::ProfileKind;
use crate::render::CommentOption;
use std::path::PathBuf;

/// How the selection left over from classification is overridden.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionSpec {
    /// Keep each profile's default selection.
    Default,
    /// Select every recognized file.
    All,
    /// Select exactly the files with one of these type tags.
    Types(Vec<String>),
    /// Select exactly the files whose relative path matches any pattern.
    Globs(Vec<glob::Pattern>),
}

impl SelectionSpec {
    /// Rewrites the selection flags of `project` according to this spec.
    pub fn apply(&self, project: &mut Project) {
        match self {
            SelectionSpec::Default => {}
            SelectionSpec::All => project.set_all_selected(true),
            SelectionSpec::Types(types) => project.select_only_types(types),
            SelectionSpec::Globs(patterns) => {
                for file in &mut project.files {
                    file.selected = patterns.iter().any(|p| p.matches(&file.relative_path));
                }
            }
        }
    }
}

/// Represents the destination for the unified document.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum OutputDestination {
    /// Write to standard output.
    Stdout,
    /// Write to the specified file path.
    File(PathBuf),
    /// Write to the suggested file name in the current directory. The name
    /// depends on which projects contribute, so it is resolved after the walk.
    SuggestedFile,
    #[cfg(feature = "clipboard")]
    /// Copy the output to the system clipboard (requires the `clipboard` feature).
    Clipboard,
}

/// All settings for one unification run.
///
/// This struct holds the options parsed and validated from the CLI, ready to
/// be used by the pipeline (walk, selection, rendering, output).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Canonicalized root paths to walk.
    pub paths: Vec<PathBuf>,
    /// The active project profile.
    pub profile: ProfileKind,
    /// Comment handling mode for rendering.
    pub comments: CommentOption,
    /// Selection override applied after the walk.
    pub selection: SelectionSpec,
    /// Promote every retained unrecognized file before selection.
    pub with_other: bool,
    /// Whether to respect `.gitignore`, `.ignore`, and other VCS ignore files.
    pub use_ignore_rules: bool,
    /// Where the unified document goes.
    pub output_destination: OutputDestination,
    /// Record contributing projects in the recent store after file writes.
    pub record_recent: bool,
}

impl RunConfig {
    /// Creates a default `RunConfig` for testing purposes.
    ///
    /// This function is hidden from public documentation and is intended for
    /// use in tests and doc tests only.
    #[doc(hidden)]
    pub fn new_for_test(paths: Vec<PathBuf>) -> Self {
        RunConfig {
            paths,
            profile: ProfileKind::Java,
            comments: CommentOption::Default,
            selection: SelectionSpec::Default,
            with_other: false,
            use_ignore_rules: true,
            output_destination: OutputDestination::Stdout,
            record_recent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{ClassifiedFile, RootKind};

    fn project_with(paths: &[(&str, &str, bool)]) -> Project {
        let mut project = Project::new("demo", RootKind::Folder);
        for (path, file_type, selected) in paths {
            let name = path.rsplit('/').next().unwrap_or(path).to_string();
            project.files.push(ClassifiedFile::new(
                &project.id,
                path,
                &name,
                "content".to_string(),
                file_type,
                "group",
                *selected,
            ));
        }
        project
    }

    #[test]
    fn test_default_spec_keeps_flags() {
        let mut project = project_with(&[("a.java", "java", true), ("b.sql", "sql", false)]);
        SelectionSpec::Default.apply(&mut project);
        assert!(project.files[0].selected);
        assert!(!project.files[1].selected);
    }

    #[test]
    fn test_all_spec_selects_everything() {
        let mut project = project_with(&[("a.java", "java", false), ("b.sql", "sql", false)]);
        SelectionSpec::All.apply(&mut project);
        assert!(project.files.iter().all(|f| f.selected));
    }

    #[test]
    fn test_types_spec_is_exact_and_case_insensitive() {
        let mut project = project_with(&[
            ("a.java", "java", false),
            ("b.sql", "sql", true),
            ("c.html", "html", true),
        ]);
        SelectionSpec::Types(vec!["JAVA".to_string(), "sql".to_string()]).apply(&mut project);
        assert!(project.files[0].selected);
        assert!(project.files[1].selected);
        assert!(!project.files[2].selected);
    }

    #[test]
    fn test_globs_spec_matches_relative_paths() {
        let mut project = project_with(&[
            ("src/Main.java", "java", false),
            ("src/util/Helper.java", "java", true),
            ("web/index.html", "html", true),
        ]);
        let patterns = vec![glob::Pattern::new("*Main.java").unwrap()];
        SelectionSpec::Globs(patterns).apply(&mut project);
        assert!(project.files[0].selected);
        assert!(!project.files[1].selected);
        assert!(!project.files[2].selected);
    }
}
