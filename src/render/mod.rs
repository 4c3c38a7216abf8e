// src/render/mod.rs

//! Deterministic unification renderer.
//!
//! [`render`] is a pure function of its inputs: it filters each project down
//! to its selected files, buckets them by group key, applies one of four
//! comment-handling modes, and concatenates everything in a total order that
//! does not depend on walk order. The same projects always produce the same
//! document.

mod banner;
mod comments;

pub use comments::{remove_blank_lines, strip_comments};

use std::cmp::Ordering;

use log::debug;

use crate::constants::{DEFAULT_PACKAGE, OTHER_FILES};
use crate::core_types::{ClassifiedFile, Project};

/// How the renderer treats structural banners and pre-existing comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentOption {
    /// Banners on; file contents verbatim (trimmed).
    #[default]
    Default,
    /// No banners; trimmed contents separated by blank lines.
    NoBanners,
    /// Banners on; banner-shaped lines left over from an earlier run are
    /// stripped from file contents first, so re-unifying is idempotent.
    RemovePastBanners,
    /// No banners; language-appropriate comments stripped from contents and
    /// the blank lines they leave behind collapsed away.
    RemoveAllComments,
}

impl CommentOption {
    fn banners(self) -> bool {
        matches!(
            self,
            CommentOption::Default | CommentOption::RemovePastBanners
        )
    }
}

/// Renders the selected files of `projects` into one unified document.
///
/// Projects contribute in their given order; groups and files within a
/// project follow the fixed sort of [`compare_group_keys`] and file-name
/// order. A project with no selected files contributes nothing, and an
/// input with no contributing projects yields an empty string.
///
/// # Examples
///
/// ```
/// use srcunify::core_types::{ClassifiedFile, Project, RootKind};
/// use srcunify::render::{render, CommentOption};
///
/// let mut project = Project::new("demo", RootKind::Folder);
/// project.files.push(ClassifiedFile::new(
///     &project.id,
///     "X.java",
///     "X.java",
///     "package com.acme;\nclass X {}".to_string(),
///     "java",
///     "com.acme",
///     true,
/// ));
/// let text = render(&[project], false, CommentOption::Default);
/// assert!(text.contains("// Project: demo"));
/// assert!(text.contains("// Package: com.acme"));
/// assert!(text.contains("// File (JAVA): X.java"));
/// assert!(text.ends_with("class X {}"));
/// ```
pub fn render(projects: &[Project], multi_project_mode: bool, option: CommentOption) -> String {
    let mut out: Vec<String> = Vec::new();

    for project in projects {
        let selected: Vec<&ClassifiedFile> = project.selected_files().collect();
        if selected.is_empty() {
            continue;
        }
        debug!(
            "Rendering project '{}': {} selected file(s)",
            project.name,
            selected.len()
        );

        // Blank line between consecutive projects.
        if !out.is_empty() {
            out.push(String::new());
        }
        if option.banners() && (multi_project_mode || out.is_empty()) {
            banner::push_project_banner(&mut out, &project.name);
        }

        for (key, files) in group_files(selected) {
            if option.banners() {
                banner::push_group_banner(&mut out, key);
            }
            for file in files {
                if option.banners() {
                    banner::push_file_banner(
                        &mut out,
                        &file.file_type,
                        &file.name,
                        &file.relative_path,
                    );
                }
                out.push(transform_content(file, option));
                out.push(String::new());
            }
        }
    }

    out.join("\n").trim().to_string()
}

/// Buckets files by group key, groups ordered by [`compare_group_keys`] and
/// files within a group by name.
fn group_files(selected: Vec<&ClassifiedFile>) -> Vec<(&str, Vec<&ClassifiedFile>)> {
    let mut groups: Vec<(&str, Vec<&ClassifiedFile>)> = Vec::new();
    for file in selected {
        match groups.iter_mut().find(|(key, _)| *key == file.group_key) {
            Some((_, files)) => files.push(file),
            None => groups.push((file.group_key.as_str(), vec![file])),
        }
    }
    groups.sort_by(|a, b| compare_group_keys(a.0, b.0));
    for (_, files) in &mut groups {
        files.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

/// Total order over group keys: the default package sorts first, the
/// other-files bucket last, and everything between lexicographically.
pub fn compare_group_keys(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if a == DEFAULT_PACKAGE {
        return Ordering::Less;
    }
    if b == DEFAULT_PACKAGE {
        return Ordering::Greater;
    }
    if a == OTHER_FILES {
        return Ordering::Greater;
    }
    if b == OTHER_FILES {
        return Ordering::Less;
    }
    a.cmp(b)
}

fn transform_content(file: &ClassifiedFile, option: CommentOption) -> String {
    match option {
        CommentOption::Default | CommentOption::NoBanners => file.content.trim().to_string(),
        CommentOption::RemovePastBanners => {
            banner::strip_stale_banners(&file.content).trim().to_string()
        }
        CommentOption::RemoveAllComments => {
            remove_blank_lines(&strip_comments(&file.content, &file.file_type))
                .trim()
                .to_string()
        }
    }
}
