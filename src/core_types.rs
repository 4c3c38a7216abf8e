//! Defines core data structures used throughout the application pipeline.
//!
//! These structs, `Project`, `ClassifiedFile`, and `OtherFile`, are central
//! to how dropped roots are walked, classified, selected, and rendered.

use crate::constants::UNTITLED_PROJECT;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// The kind of root a project was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    /// A walked directory tree.
    Folder,
    /// A single file root, including expanded archives.
    File,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Folder => write!(f, "folder"),
            RootKind::File => write!(f, "file"),
        }
    }
}

/// A recognized, decoded file ready for selection and rendering.
///
/// # Examples
///
/// ```
/// use srcunify::core_types::ClassifiedFile;
///
/// let file = ClassifiedFile::new(
///     "demo-1",
///     "src/Main.java",
///     "Main.java",
///     "package com.acme;\nclass Main {}".to_string(),
///     "java",
///     "com.acme",
///     true,
/// );
/// assert_eq!(file.file_type, "java");
/// assert!(file.selected);
/// ```
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    /// Unique id within the working set.
    pub id: String,
    /// POSIX-style path relative to the drop root (archive-internal path for
    /// archive entries, bare file name for single-file roots).
    pub relative_path: String,
    /// The leaf file name.
    pub name: String,
    /// Decoded text content (lossy UTF-8 for stray bytes).
    pub content: String,
    /// Classifier tag, never empty (`"unknown"` fallback never reaches here;
    /// unrecognized entries stay in [`OtherFile`]).
    pub file_type: String,
    /// Group key assigned by the grouping resolver.
    pub group_key: String,
    /// Whether the file participates in the next unification.
    pub selected: bool,
    /// Id of the owning [`Project`].
    pub owner_project_id: String,
}

impl ClassifiedFile {
    /// Builds a file with a fresh working-set-unique id.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_project_id: &str,
        relative_path: &str,
        name: &str,
        content: String,
        file_type: &str,
        group_key: &str,
        selected: bool,
    ) -> Self {
        ClassifiedFile {
            id: format!("{}-{}-{}", owner_project_id, relative_path, next_seq()),
            relative_path: relative_path.to_string(),
            name: name.to_string(),
            content,
            file_type: file_type.to_string(),
            group_key: group_key.to_string(),
            selected,
            owner_project_id: owner_project_id.to_string(),
        }
    }
}

/// Where an [`OtherFile`]'s bytes live, so promotion can decode on demand.
#[derive(Debug, Clone)]
pub enum OtherSource {
    /// A file on disk.
    Disk(PathBuf),
    /// An entry inside a ZIP/JAR archive.
    Archive {
        /// Path of the archive on disk.
        archive: PathBuf,
        /// Internal entry name.
        member: String,
    },
    /// Bytes already held in memory (in-memory roots, tests).
    Buffer(Vec<u8>),
}

/// An unrecognized entry retained *undecoded* for later promotion.
#[derive(Debug, Clone)]
pub struct OtherFile {
    /// POSIX-style path relative to the drop root.
    pub relative_path: String,
    /// The leaf file name.
    pub name: String,
    /// Size in bytes, from metadata.
    pub size: u64,
    /// How to reach the bytes if the user promotes this entry.
    pub source: OtherSource,
}

/// A dropped root after walking: its recognized files plus the unrecognized
/// leftovers.
#[derive(Debug, Clone)]
pub struct Project {
    /// Unique id (cleaned name + epoch millis + process-wide counter).
    pub id: String,
    /// Cleaned display name, see [`clean_project_name`].
    pub name: String,
    /// What kind of root produced this project.
    pub kind: RootKind,
    /// Recognized, decoded files.
    pub files: Vec<ClassifiedFile>,
    /// Unrecognized entries available for promotion.
    pub other_files: Vec<OtherFile>,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Project {
    /// Creates an empty project from a raw root name.
    pub fn new(raw_name: &str, kind: RootKind) -> Self {
        let name = clean_project_name(raw_name);
        let timestamp = epoch_millis();
        let id = format!("{}-{}-{}", name, timestamp, next_seq());
        Project {
            id,
            name,
            kind,
            files: Vec::new(),
            other_files: Vec::new(),
            timestamp,
        }
    }

    /// True when the walk yielded neither files nor other files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.other_files.is_empty()
    }

    /// Moves every file of `other` into `self`, re-parenting them.
    ///
    /// Used when several dropped roots normalize to the same display name.
    pub fn absorb(&mut self, other: Project) {
        for mut file in other.files {
            file.owner_project_id = self.id.clone();
            self.files.push(file);
        }
        self.other_files.extend(other.other_files);
    }

    /// Marks every file selected or deselected.
    pub fn set_all_selected(&mut self, selected: bool) {
        for file in &mut self.files {
            file.selected = selected;
        }
    }

    /// Selects exactly the files whose type tag is in `types` (ASCII
    /// case-insensitive), deselecting the rest.
    pub fn select_only_types(&mut self, types: &[String]) {
        for file in &mut self.files {
            file.selected = types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&file.file_type));
        }
    }

    /// The files that will participate in the next unification.
    pub fn selected_files(&self) -> impl Iterator<Item = &ClassifiedFile> {
        self.files.iter().filter(|f| f.selected)
    }

    /// True when at least one file is selected.
    pub fn has_selection(&self) -> bool {
        self.files.iter().any(|f| f.selected)
    }
}

/// Outcome of walking one set of dropped roots.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// One project per distinct cleaned root name, in drop order.
    pub projects: Vec<Project>,
    /// Skippable-item and resource-limit conditions hit along the way.
    pub warnings: Vec<WalkWarning>,
}

/// A non-fatal condition encountered during a walk.
///
/// Warnings are logged as they happen and returned to the caller in the
/// [`WalkReport`]; they never abort the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkWarning {
    /// A candidate exceeded the per-file size ceiling and was skipped.
    OversizedFile {
        /// Root-relative path of the skipped entry.
        path: String,
        /// Its size in bytes.
        size: u64,
    },
    /// The walk-wide decoded-file ceiling was reached; the walk stopped early.
    FileLimitReached {
        /// The ceiling that was hit.
        limit: usize,
    },
    /// An entry could not be read or decoded and was skipped.
    UnreadableEntry {
        /// Root-relative path of the entry.
        path: String,
        /// Short human-readable cause.
        reason: String,
    },
    /// An archive root could not be expanded at all.
    ArchiveUnreadable {
        /// Path of the archive.
        path: String,
        /// Short human-readable cause.
        reason: String,
    },
}

impl fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkWarning::OversizedFile { path, size } => write!(
                f,
                "Skipping '{}' ({}): larger than the {} per-file limit",
                path,
                human_size(*size),
                human_size(crate::constants::MAX_FILE_SIZE)
            ),
            WalkWarning::FileLimitReached { limit } => write!(
                f,
                "File limit of {} reached; remaining entries were not decoded",
                limit
            ),
            WalkWarning::UnreadableEntry { path, reason } => {
                write!(f, "Skipping '{}': {}", path, reason)
            }
            WalkWarning::ArchiveUnreadable { path, reason } => {
                write!(f, "Could not expand archive '{}': {}", path, reason)
            }
        }
    }
}

/// Formats a byte count with an appropriate binary unit ("5 MiB").
pub(crate) fn human_size(bytes: u64) -> String {
    let adjusted =
        byte_unit::Byte::from_u64(bytes).get_appropriate_unit(byte_unit::UnitType::Binary);
    format!("{adjusted:.2}")
}

static ARCHIVE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(zip|jar|rar)$").expect("valid archive suffix regex"));
static DUPLICATE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d+\)$").expect("valid duplicate marker regex"));
static UNIFIED_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)_unified(\.txt)?$").expect("valid unified suffix regex"));

/// Derives a project display name from a raw root name.
///
/// Strips archive suffixes, browser duplicate markers like `" (1)"`, and the
/// `_unified`/`_unified.txt` suffix this tool itself generates, then falls
/// back to a fixed placeholder when nothing is left.
///
/// # Examples
///
/// ```
/// use srcunify::core_types::clean_project_name;
///
/// assert_eq!(clean_project_name("demo (1).zip"), "demo");
/// assert_eq!(clean_project_name("MyApp_unified.txt"), "MyApp");
/// assert_eq!(clean_project_name("  "), "UntitledProject");
/// ```
pub fn clean_project_name(raw: &str) -> String {
    let name = ARCHIVE_SUFFIX_RE.replace(raw.trim(), "");
    let name = DUPLICATE_MARKER_RE.replace(&name, "");
    let name = UNIFIED_SUFFIX_RE.replace(&name, "");
    let name = name.trim();
    if name.is_empty() {
        UNTITLED_PROJECT.to_string()
    } else {
        name.to_string()
    }
}

static SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_project_name_suffixes() {
        assert_eq!(clean_project_name("demo.zip"), "demo");
        assert_eq!(clean_project_name("Demo.JAR"), "Demo");
        assert_eq!(clean_project_name("legacy.rar"), "legacy");
        assert_eq!(clean_project_name("demo (2)"), "demo");
        assert_eq!(clean_project_name("demo (2).zip"), "demo");
        assert_eq!(clean_project_name("app_unified"), "app");
        assert_eq!(clean_project_name("app_Unified.TXT"), "app");
        assert_eq!(clean_project_name("plain-folder"), "plain-folder");
        // Interior markers are not duplicate suffixes.
        assert_eq!(clean_project_name("v(1) release"), "v(1) release");
    }

    #[test]
    fn test_clean_project_name_empty_fallback() {
        assert_eq!(clean_project_name(""), "UntitledProject");
        assert_eq!(clean_project_name(" .zip"), "UntitledProject");
    }

    #[test]
    fn test_project_ids_are_unique_for_same_name() {
        let a = Project::new("demo", RootKind::Folder);
        let b = Project::new("demo", RootKind::Folder);
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn test_absorb_reparents_files() {
        let mut a = Project::new("demo", RootKind::Folder);
        let mut b = Project::new("demo (1)", RootKind::Folder);
        b.files.push(ClassifiedFile::new(
            &b.id,
            "Main.java",
            "Main.java",
            "class Main {}".into(),
            "java",
            "(Default Package)",
            true,
        ));
        a.absorb(b);
        assert_eq!(a.files.len(), 1);
        assert_eq!(a.files[0].owner_project_id, a.id);
    }

    #[test]
    fn test_selection_helpers() {
        let mut p = Project::new("demo", RootKind::Folder);
        p.files.push(ClassifiedFile::new(
            &p.id, "A.java", "A.java", "a".into(), "java", "g", false,
        ));
        p.files.push(ClassifiedFile::new(
            &p.id, "b.sql", "b.sql", "b".into(), "sql", "g", false,
        ));
        assert!(!p.has_selection());

        p.set_all_selected(true);
        assert_eq!(p.selected_files().count(), 2);

        p.select_only_types(&["JAVA".to_string()]);
        let selected: Vec<_> = p.selected_files().map(|f| f.file_type.as_str()).collect();
        assert_eq!(selected, vec!["java"]);
    }
}
