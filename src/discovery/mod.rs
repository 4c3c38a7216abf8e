//! Turns dropped roots into classified [`Project`]s.
//!
//! Each root (a folder, a loose file, or a `.zip`/`.jar` archive) becomes one
//! project. Roots walk in parallel, but the returned project list preserves
//! drop order and two roots that clean to the same project name are merged
//! into one. Skippable problems (unreadable entries, oversized files, the
//! decoded-file cap) are reported as [`WalkWarning`]s instead of failing the
//! whole walk.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use content_inspector::{inspect, ContentType};
use crossbeam_channel::{unbounded, Sender};
use log::debug;
use rayon::prelude::*;

use crate::cancellation::CancellationToken;
use crate::classify::classify;
use crate::constants::{MAX_FILE_SIZE, MAX_TOTAL_FILES};
use crate::core_types::{
    ClassifiedFile, OtherFile, OtherSource, Project, RootKind, WalkReport, WalkWarning,
};
use crate::errors::{Error, Result};
use crate::grouping::resolve_group;
use crate::profiles::ProjectProfile;

mod archive;
mod disk;
mod entry;

pub use archive::is_archive_name;
pub(crate) use archive::read_member;
pub use disk::{entry_from_path, DiskDir, DiskLeaf};
pub use entry::{ContainerEntry, FsEntry, LeafEntry, MemoryDir, MemoryLeaf};

use entry::{Candidate, CandidateIter};

/// Ceilings applied while decoding candidates during a walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkLimits {
    /// Files strictly larger than this are skipped with a warning.
    pub max_file_size: u64,
    /// Total number of files decoded across *all* roots of one walk.
    pub max_total_files: usize,
}

impl Default for WalkLimits {
    fn default() -> Self {
        WalkLimits {
            max_file_size: MAX_FILE_SIZE,
            max_total_files: MAX_TOTAL_FILES,
        }
    }
}

/// Shared state for one walk: limits, cancellation, and the decoded-file
/// counter that all roots debit together.
struct WalkContext<'a> {
    profile: &'a ProjectProfile,
    limits: &'a WalkLimits,
    token: &'a CancellationToken,
    decoded: AtomicUsize,
    limit_warned: AtomicBool,
    warn_tx: Sender<WalkWarning>,
}

impl WalkContext<'_> {
    fn warn(&self, warning: WalkWarning) {
        log::warn!("{}", warning);
        // Receiver outlives the walk; a send can only fail after teardown.
        let _ = self.warn_tx.send(warning);
    }

    /// Checks the global decoded-file cap, warning exactly once when hit.
    fn limit_reached(&self) -> bool {
        if self.decoded.load(Ordering::SeqCst) < self.limits.max_total_files {
            return false;
        }
        if !self.limit_warned.swap(true, Ordering::SeqCst) {
            self.warn(WalkWarning::FileLimitReached {
                limit: self.limits.max_total_files,
            });
        }
        true
    }
}

/// Walks filesystem paths into projects.
///
/// Each path becomes one root: directories are traversed (honoring ignore
/// rules when `use_ignore_rules` is set), `.zip`/`.jar` files are expanded
/// in place, and any other file forms a single-file project. A path whose
/// metadata cannot be read fails the walk; problems *inside* a root are
/// downgraded to warnings.
pub fn walk_roots(
    paths: &[PathBuf],
    use_ignore_rules: bool,
    profile: &ProjectProfile,
    limits: &WalkLimits,
    token: &CancellationToken,
) -> Result<WalkReport> {
    let mut roots = Vec::with_capacity(paths.len());
    for path in paths {
        roots.push(disk::entry_from_path(path, use_ignore_rules)?);
    }
    walk_entries(roots, profile, limits, token)
}

/// Walks already-constructed roots into projects.
///
/// This is the filesystem-free core of [`walk_roots`]; in-memory entries
/// walk the exact same pipeline as disk entries.
///
/// # Examples
///
/// ```
/// use srcunify::discovery::{walk_entries, FsEntry, MemoryDir, MemoryLeaf, WalkLimits};
/// use srcunify::profiles::ProjectProfile;
/// use srcunify::CancellationToken;
///
/// let root = FsEntry::Container(Box::new(MemoryDir::new(
///     "demo",
///     vec![FsEntry::Leaf(Box::new(MemoryLeaf::new(
///         "Main.java",
///         "package com.acme;\nclass Main {}",
///     )))],
/// )));
/// let report = walk_entries(
///     vec![root],
///     ProjectProfile::java(),
///     &WalkLimits::default(),
///     &CancellationToken::new(),
/// )?;
/// assert_eq!(report.projects.len(), 1);
/// assert_eq!(report.projects[0].files[0].group_key, "com.acme");
/// # Ok::<(), srcunify::errors::Error>(())
/// ```
pub fn walk_entries(
    roots: Vec<FsEntry>,
    profile: &ProjectProfile,
    limits: &WalkLimits,
    token: &CancellationToken,
) -> Result<WalkReport> {
    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let (warn_tx, warn_rx) = unbounded();
    let ctx = WalkContext {
        profile,
        limits,
        token,
        decoded: AtomicUsize::new(0),
        limit_warned: AtomicBool::new(false),
        warn_tx,
    };

    // --- 1. Walk every root in parallel, keeping drop order ---
    let outcomes = roots
        .into_par_iter()
        .map(|root| walk_root(root, &ctx))
        .collect::<Result<Vec<_>>>()?;

    // Close the channel so try_iter below drains and stops.
    drop(ctx);

    // --- 2. Merge roots whose cleaned names collide ---
    let mut projects: Vec<Project> = Vec::new();
    for project in outcomes.into_iter().flatten() {
        if let Some(existing) = projects.iter_mut().find(|p| p.name == project.name) {
            debug!("Merging root into existing project '{}'", existing.name);
            existing.absorb(project);
        } else {
            projects.push(project);
        }
    }

    let warnings: Vec<WalkWarning> = warn_rx.try_iter().collect();
    debug!(
        "Walk complete: {} project(s), {} warning(s)",
        projects.len(),
        warnings.len()
    );
    Ok(WalkReport { projects, warnings })
}

/// Walks a single root into at most one project.
fn walk_root(root: FsEntry, ctx: &WalkContext<'_>) -> Result<Option<Project>> {
    if ctx.token.is_cancelled() {
        return Err(Error::Interrupted);
    }
    match root {
        FsEntry::Container(dir) => {
            let mut project = Project::new(&dir.name(), RootKind::Folder);
            debug!("Walking folder root as project '{}'", project.name);
            for candidate in CandidateIter::new(dir, ctx.warn_tx.clone()) {
                if !process_candidate(candidate, &mut project, ctx)? {
                    break;
                }
            }
            Ok(non_empty(project))
        }
        FsEntry::Leaf(leaf) => {
            let raw_name = leaf.name();
            let mut project = Project::new(&raw_name, RootKind::File);

            // Archives expand in place of the single file they arrived as.
            if is_archive_name(&raw_name) {
                if let OtherSource::Disk(path) = leaf.promotion_source() {
                    debug!("Expanding archive root '{}'", path.display());
                    match archive::expand_archive(&path) {
                        Ok((candidates, warnings)) => {
                            for warning in warnings {
                                ctx.warn(warning);
                            }
                            for candidate in candidates {
                                if !process_candidate(candidate, &mut project, ctx)? {
                                    break;
                                }
                            }
                        }
                        Err(e) => ctx.warn(WalkWarning::ArchiveUnreadable {
                            path: path.display().to_string(),
                            reason: e.to_string(),
                        }),
                    }
                    return Ok(non_empty(project));
                }
            }

            let candidate = Candidate {
                relative_path: raw_name,
                leaf,
            };
            process_candidate(candidate, &mut project, ctx)?;
            Ok(non_empty(project))
        }
    }
}

/// Runs one candidate through the classify/decode pipeline.
///
/// Returns `Ok(false)` when the walk of this root should stop (the global
/// decoded-file cap is exhausted), `Ok(true)` otherwise. Unrecognized files
/// are parked in `other_files` without being read; skippable decode problems
/// become warnings.
fn process_candidate(
    candidate: Candidate,
    project: &mut Project,
    ctx: &WalkContext<'_>,
) -> Result<bool> {
    if ctx.token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let Candidate {
        leaf,
        relative_path,
    } = candidate;
    let name = leaf.name();

    // --- 1. Size gate (metadata only, nothing is read yet) ---
    let size = match leaf.size() {
        Ok(size) => size,
        Err(e) => {
            ctx.warn(WalkWarning::UnreadableEntry {
                path: relative_path,
                reason: e.to_string(),
            });
            return Ok(true);
        }
    };
    if size > ctx.limits.max_file_size {
        ctx.warn(WalkWarning::OversizedFile {
            path: relative_path,
            size,
        });
        return Ok(true);
    }

    // --- 2. Classification by name ---
    let file_type = classify(&name, ctx.profile);
    if !ctx.profile.recognizes(&file_type) {
        debug!("Parking unrecognized file '{}'", relative_path);
        project.other_files.push(OtherFile {
            relative_path,
            name,
            size,
            source: leaf.promotion_source(),
        });
        return Ok(true);
    }

    // --- 3. Global decoded-file cap ---
    if ctx.limit_reached() {
        return Ok(false);
    }

    // --- 4. Read and decode ---
    let bytes = match leaf.read() {
        Ok(bytes) => bytes,
        Err(e) => {
            ctx.warn(WalkWarning::UnreadableEntry {
                path: relative_path,
                reason: e.to_string(),
            });
            return Ok(true);
        }
    };
    let content = match decode_text(&bytes) {
        Some(content) => content,
        None => {
            ctx.warn(WalkWarning::UnreadableEntry {
                path: relative_path,
                reason: "binary content".to_string(),
            });
            return Ok(true);
        }
    };
    ctx.decoded.fetch_add(1, Ordering::SeqCst);

    // --- 5. Group and store ---
    let group_key = resolve_group(&relative_path, &content, &file_type, ctx.profile);
    let selected = ctx.profile.selected_by_default(&file_type);
    let file = ClassifiedFile::new(
        &project.id,
        &relative_path,
        &name,
        content,
        &file_type,
        &group_key,
        selected,
    );
    project.files.push(file);
    Ok(true)
}

/// Decodes file bytes as text, or `None` for binary content.
///
/// Only content positively detected as UTF-8 (with or without a BOM) is
/// accepted; stray invalid sequences inside otherwise-textual data are
/// replaced rather than rejected.
pub(crate) fn decode_text(bytes: &[u8]) -> Option<String> {
    match inspect(bytes) {
        ContentType::UTF_8 | ContentType::UTF_8_BOM => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => None,
    }
}

fn non_empty(project: Project) -> Option<Project> {
    if project.is_empty() {
        None
    } else {
        Some(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, content: &str) -> FsEntry {
        FsEntry::Leaf(Box::new(MemoryLeaf::new(name, content)))
    }

    fn dir(name: &str, children: Vec<FsEntry>) -> FsEntry {
        FsEntry::Container(Box::new(MemoryDir::new(name, children)))
    }

    fn walk(roots: Vec<FsEntry>, profile: &ProjectProfile) -> WalkReport {
        walk_entries(
            roots,
            profile,
            &WalkLimits::default(),
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_walk_splits_recognized_and_other_files() {
        let root = dir(
            "demo",
            vec![
                leaf("Main.java", "package com.acme;\nclass Main {}"),
                leaf("notes.txt", "notes"),
                leaf("logo.png", "not really a png"),
            ],
        );
        let report = walk(vec![root], ProjectProfile::java());
        assert_eq!(report.projects.len(), 1);
        let project = &report.projects[0];
        assert_eq!(project.files.len(), 2);
        assert_eq!(project.other_files.len(), 1);
        assert_eq!(project.other_files[0].name, "logo.png");
        assert!(matches!(
            project.other_files[0].source,
            OtherSource::Buffer(_)
        ));
    }

    #[test]
    fn test_walk_applies_default_selection_and_groups() {
        let root = dir(
            "demo",
            vec![
                leaf("Main.java", "package com.acme.app;\nclass Main {}"),
                leaf("pom.xml", "<project/>"),
            ],
        );
        let report = walk(vec![root], ProjectProfile::java());
        let project = &report.projects[0];
        let main = project.files.iter().find(|f| f.name == "Main.java").unwrap();
        let pom = project.files.iter().find(|f| f.name == "pom.xml").unwrap();
        assert!(main.selected);
        assert_eq!(main.group_key, "com.acme.app");
        assert!(!pom.selected);
        assert_eq!(pom.group_key, crate::constants::DEFAULT_PACKAGE);
    }

    #[test]
    fn test_walk_skips_oversized_files_with_warning() {
        let limits = WalkLimits {
            max_file_size: 8,
            max_total_files: MAX_TOTAL_FILES,
        };
        let root = dir(
            "demo",
            vec![
                leaf("small.java", "class A{}"),
                leaf("big.java", "class Big { /* way past eight bytes */ }"),
            ],
        );
        let report =
            walk_entries(vec![root], ProjectProfile::java(), &limits, &CancellationToken::new())
                .unwrap();
        // "class A{}" is 9 bytes, also over the 8-byte ceiling.
        assert!(report.projects.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(report
            .warnings
            .iter()
            .all(|w| matches!(w, WalkWarning::OversizedFile { .. })));
    }

    #[test]
    fn test_walk_stops_at_total_file_cap() {
        let limits = WalkLimits {
            max_file_size: MAX_FILE_SIZE,
            max_total_files: 2,
        };
        let root = dir(
            "demo",
            vec![
                leaf("a.java", "class A {}"),
                leaf("b.java", "class B {}"),
                leaf("c.java", "class C {}"),
                leaf("d.java", "class D {}"),
            ],
        );
        let report =
            walk_entries(vec![root], ProjectProfile::java(), &limits, &CancellationToken::new())
                .unwrap();
        assert_eq!(report.projects[0].files.len(), 2);
        assert_eq!(
            report
                .warnings
                .iter()
                .filter(|w| matches!(w, WalkWarning::FileLimitReached { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_walk_merges_roots_with_same_cleaned_name() {
        let roots = vec![
            dir("demo", vec![leaf("A.java", "class A {}")]),
            dir("demo (1)", vec![leaf("B.java", "class B {}")]),
        ];
        let report = walk(roots, ProjectProfile::java());
        assert_eq!(report.projects.len(), 1);
        let project = &report.projects[0];
        assert_eq!(project.name, "demo");
        assert_eq!(project.files.len(), 2);
        assert!(project.files.iter().all(|f| f.owner_project_id == project.id));
    }

    #[test]
    fn test_walk_preserves_drop_order_across_roots() {
        let roots = vec![
            dir("zeta", vec![leaf("A.java", "class A {}")]),
            dir("alpha", vec![leaf("B.java", "class B {}")]),
        ];
        let report = walk(roots, ProjectProfile::java());
        let names: Vec<&str> = report.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_walk_single_file_root() {
        let report = walk(
            vec![leaf("Solo.java", "package solo;\nclass Solo {}")],
            ProjectProfile::java(),
        );
        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.projects[0].kind, RootKind::File);
        assert_eq!(report.projects[0].files[0].relative_path, "Solo.java");
    }

    #[test]
    fn test_walk_drops_empty_roots() {
        let report = walk(vec![dir("empty", vec![])], ProjectProfile::java());
        assert!(report.projects.is_empty());
    }

    #[test]
    fn test_walk_skips_binary_content_with_warning() {
        let root = dir(
            "demo",
            vec![FsEntry::Leaf(Box::new(MemoryLeaf::new(
                "Weird.java",
                vec![0x00u8, 0xFF, 0x00, 0xFF, 0x13, 0x37],
            )))],
        );
        let report = walk(vec![root], ProjectProfile::java());
        assert!(report.projects.is_empty());
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            WalkWarning::UnreadableEntry { reason, .. } if reason == "binary content"
        )));
    }

    #[test]
    fn test_walk_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let result = walk_entries(
            vec![dir("demo", vec![leaf("A.java", "class A {}")])],
            ProjectProfile::java(),
            &WalkLimits::default(),
            &token,
        );
        assert!(matches!(result, Err(Error::Interrupted)));
    }
}
