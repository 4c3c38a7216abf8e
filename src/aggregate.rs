// src/aggregate.rs

//! Mutations on the working set of projects between walk and render.
//!
//! The walker produces projects; these operations let callers amend them
//! before rendering: paste a file in by hand, promote a retained
//! unrecognized entry to first-class, append the results of a later drop,
//! or detach a finished project. Every operation validates before it
//! mutates, so a failed call leaves the working set exactly as it was.

use std::fs;
use std::io;

use log::{debug, warn};

use crate::classify::classify;
use crate::core_types::{ClassifiedFile, OtherSource, Project, RootKind};
use crate::discovery::{decode_text, read_member};
use crate::errors::{io_error_with_path, Error, Result};
use crate::grouping::resolve_group;
use crate::profiles::ProjectProfile;

/// Where a manually supplied file should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualTarget {
    /// Append to the project with this id.
    Existing(String),
    /// Create a fresh single-file project named after the file.
    New,
}

/// Adds pasted content as if it had been walked.
///
/// The name doubles as the relative path, so classification and grouping
/// behave exactly as they would for a file dropped at a root. Manual files
/// start out selected. An empty or whitespace-only name or content is
/// rejected before anything changes.
///
/// # Examples
///
/// ```
/// use srcunify::aggregate::{add_manual_file, ManualTarget};
/// use srcunify::profiles::ProjectProfile;
///
/// let mut projects = Vec::new();
/// let file = add_manual_file(
///     &mut projects,
///     "Util.java",
///     "package com.acme.util;\nclass Util {}",
///     ManualTarget::New,
///     ProjectProfile::java(),
/// )?;
/// assert_eq!(file.group_key, "com.acme.util");
/// assert!(file.selected);
/// assert_eq!(projects.len(), 1);
/// # Ok::<(), srcunify::errors::Error>(())
/// ```
pub fn add_manual_file<'a>(
    projects: &'a mut Vec<Project>,
    name: &str,
    content: &str,
    target: ManualTarget,
    profile: &ProjectProfile,
) -> Result<&'a ClassifiedFile> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyFileName);
    }
    if content.trim().is_empty() {
        return Err(Error::EmptyFileContent);
    }

    let index = match target {
        ManualTarget::Existing(id) => projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::UnknownProject(id))?,
        ManualTarget::New => {
            projects.push(Project::new(name, RootKind::File));
            projects.len() - 1
        }
    };
    let project = &mut projects[index];

    let file_type = classify(name, profile);
    let group_key = resolve_group(name, content, &file_type, profile);
    debug!(
        "Manually adding '{}' ({}) to project '{}'",
        name, file_type, project.name
    );
    let file = ClassifiedFile::new(
        &project.id,
        name,
        name,
        content.to_string(),
        &file_type,
        &group_key,
        true,
    );
    Ok(push_file(project, file))
}

/// Promotes a retained unrecognized entry into the project's file list.
///
/// The entry's bytes are decoded on demand from wherever they live (disk,
/// archive member, or an in-memory buffer), then classified and grouped
/// against the *current* profile, so switching profiles can turn an "other"
/// file into a first-class one. Promoted files start out selected. On any
/// decode failure the entry stays in `other_files` and the error is
/// returned.
pub fn promote_other_file<'a>(
    project: &'a mut Project,
    index: usize,
    profile: &ProjectProfile,
) -> Result<&'a ClassifiedFile> {
    let entry = project
        .other_files
        .get(index)
        .ok_or(Error::NoSuchOtherFile(index))?;

    let bytes = read_retained(&entry.source)?;
    let content = decode_text(&bytes).ok_or_else(|| Error::Io {
        path: entry.relative_path.clone(),
        source: io::Error::new(io::ErrorKind::InvalidData, "binary content"),
    })?;

    // Decoding succeeded; the entry now leaves `other_files` for good.
    let entry = project.other_files.remove(index);
    let file_type = classify(&entry.name, profile);
    let group_key = resolve_group(&entry.relative_path, &content, &file_type, profile);
    debug!(
        "Promoting '{}' as '{}' in project '{}'",
        entry.relative_path, file_type, project.name
    );
    let file = ClassifiedFile::new(
        &project.id,
        &entry.relative_path,
        &entry.name,
        content,
        &file_type,
        &group_key,
        true,
    );
    Ok(push_file(project, file))
}

/// Promotes every retained entry that decodes as text.
///
/// Entries that fail to decode stay in `other_files` with a warning; one
/// bad entry never blocks the rest. Returns how many were promoted.
pub fn promote_all(project: &mut Project, profile: &ProjectProfile) -> usize {
    let mut promoted = 0;
    let mut index = 0;
    while index < project.other_files.len() {
        let path = project.other_files[index].relative_path.clone();
        match promote_other_file(project, index, profile) {
            Ok(_) => promoted += 1,
            Err(e) => {
                warn!("Keeping '{}' unpromoted: {}", path, e);
                index += 1;
            }
        }
    }
    promoted
}

/// Appends the projects of a later walk to the working set.
///
/// A new project keeps its own identity even when its display name matches
/// an existing one: name-collision merging happens only *within* one walk,
/// where the colliding roots were dropped together.
pub fn merge_or_append(existing: &mut Vec<Project>, new_projects: Vec<Project>) {
    for project in new_projects {
        debug!("Appending project '{}' ({})", project.name, project.id);
        existing.push(project);
    }
}

/// Detaches the project with the given id, returning it if present.
pub fn remove_project(projects: &mut Vec<Project>, id: &str) -> Option<Project> {
    let index = projects.iter().position(|p| p.id == id)?;
    Some(projects.remove(index))
}

fn read_retained(source: &OtherSource) -> Result<Vec<u8>> {
    match source {
        OtherSource::Disk(path) => fs::read(path).map_err(|e| io_error_with_path(e, path)),
        OtherSource::Archive { archive, member } => read_member(archive, member),
        OtherSource::Buffer(bytes) => Ok(bytes.clone()),
    }
}

fn push_file(project: &mut Project, file: ClassifiedFile) -> &ClassifiedFile {
    project.files.push(file);
    let index = project.files.len() - 1;
    &project.files[index]
}
