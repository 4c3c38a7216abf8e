//! `srcunify` is a library and command-line tool that unifies source files,
//! folders, and ZIP/JAR archives into a single annotated text document.
//!
//! Every dropped root becomes a project: directories are walked (respecting
//! ignore rules), archives are expanded in place, and each file is classified
//! against a project profile. Recognized files are grouped, by Java package
//! declaration or by directory, and the selected ones are concatenated under
//! project, group, and file banners so the result reads as one body of source.
//!
//! As a library, it provides a modular three-stage pipeline:
//! 1.  **Walk**: Turn root paths into classified [`Project`]s.
//! 2.  **Select**: Promote retained files and apply selection overrides.
//! 3.  **Unify**: Render the selected files into the annotated document.
//!
//! This design allows programmatic use of its components, such as walking
//! in-memory trees or re-grouping files independently.
//!
//! # Example: Library Usage
//!
//! The following example demonstrates how to unify a small project directory
//! into a file.
//!
//! ```
//! use srcunify::config::{OutputDestination, RunConfig, SelectionSpec};
//! use srcunify::profiles::ProfileKind;
//! use srcunify::render::CommentOption;
//! use srcunify::{run, CancellationToken};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // 1. Set up a project directory with one Java file.
//! let temp_dir = tempdir().unwrap();
//! let project_dir = temp_dir.path().join("demo");
//! fs::create_dir(&project_dir).unwrap();
//! fs::write(
//!     project_dir.join("Main.java"),
//!     "package com.acme;\n\npublic class Main {}\n",
//! )
//! .unwrap();
//!
//! // 2. Describe the run.
//! let output_path = temp_dir.path().join("demo_unified.txt");
//! let config = RunConfig {
//!     paths: vec![project_dir],
//!     profile: ProfileKind::Java,
//!     comments: CommentOption::Default,
//!     selection: SelectionSpec::Default,
//!     with_other: false,
//!     use_ignore_rules: true,
//!     output_destination: OutputDestination::File(output_path.clone()),
//!     record_recent: false,
//! };
//!
//! // 3. Execute the pipeline.
//! run(&config, &CancellationToken::new(), None).unwrap();
//!
//! // 4. The document carries project, group, and file banners.
//! let document = fs::read_to_string(&output_path).unwrap();
//! assert!(document.contains("// Project: demo"));
//! assert!(document.contains("// Package: com.acme"));
//! assert!(document.contains("// File (JAVA): Main.java"));
//! assert!(document.contains("public class Main {}"));
//! ```

// Make modules public if they contain public types used in the API
pub mod aggregate;
pub mod cancellation;
pub mod cli;
pub mod classify;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod discovery;
pub mod errors;
pub mod grouping;
pub mod output;
pub mod profiles;
pub mod progress;
pub mod recent;
pub mod render;
pub mod signal;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{OutputDestination, RunConfig, SelectionSpec};
pub use core_types::{ClassifiedFile, OtherFile, Project, WalkReport, WalkWarning};
pub use errors::{Error, Result};
pub use render::CommentOption;

use crate::profiles::ProjectProfile;
use crate::progress::{NoOpProgress, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;

/// Walks the configured root paths into classified projects.
///
/// This is the first stage of the pipeline. Each path becomes one root:
/// directories are traversed (honoring ignore rules when configured),
/// `.zip`/`.jar` archives are expanded in place, and any other file forms a
/// single-file project. Skippable problems are returned as warnings in the
/// report; they never fail the walk.
///
/// # Arguments
/// * `config` - The configuration for the walk (paths, profile, ignore rules).
/// * `token` - A [`CancellationToken`] used to gracefully interrupt the walk.
///
/// # Returns
/// A `Result` containing a [`WalkReport`]: the projects in drop order plus
/// the warnings accumulated along the way.
pub fn walk(config: &RunConfig, token: &CancellationToken) -> Result<WalkReport> {
    discovery::walk_roots(
        &config.paths,
        config.use_ignore_rules,
        ProjectProfile::of(config.profile),
        &discovery::WalkLimits::default(),
        token,
    )
}

/// Applies promotion and selection overrides to walked projects.
///
/// This is the second stage of the pipeline. With `with_other` set, every
/// retained unrecognized file that decodes as text is promoted to
/// first-class; the configured [`SelectionSpec`] then rewrites the selection
/// flags (the default spec keeps each profile's own defaults).
pub fn select(projects: &mut [Project], config: &RunConfig) {
    let profile = ProjectProfile::of(config.profile);
    for project in projects.iter_mut() {
        if config.with_other {
            let promoted = aggregate::promote_all(project, profile);
            log::debug!(
                "Promoted {} retained file(s) in project '{}'",
                promoted,
                project.name
            );
        }
        config.selection.apply(project);
    }
}

/// Renders the selected files of `projects` into the unified document.
///
/// This is the final stage of the pipeline. Multi-project mode switches on
/// automatically when more than one project contributes at least one
/// selected file.
pub fn unify(projects: &[Project], config: &RunConfig) -> String {
    let contributing = projects.iter().filter(|p| p.has_selection()).count();
    render::render(projects, contributing > 1, config.comments)
}

/// Executes the complete pipeline: walk, select, unify, and write.
///
/// This is the primary entry point for running the tool's logic
/// programmatically in a way that mirrors the command-line execution. It
/// orchestrates the three stages, resolves the output destination (a
/// `SuggestedFile` destination becomes a concrete file name once the
/// contributing projects are known), and records the contributing projects
/// in the recent store after successful file writes.
///
/// For more granular control or to capture the document as a string in
/// memory, use [`walk`], [`select`], and [`unify`] directly.
///
/// # Arguments
/// * `config` - The configuration for the entire run.
/// * `token` - A [`CancellationToken`] used to gracefully interrupt the walk.
/// * `progress` - An optional reporter fed root counts and stage messages.
///
/// # Returns
/// A `Result` that is `Ok(())` on success. It returns
/// `Err(Error::NoFilesFound)` when the walk recognizes no files at all and
/// `Err(Error::NoFilesSelected)` when files exist but the selection is
/// empty. Other errors are propagated from the underlying stages.
pub fn run(
    config: &RunConfig,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<()> {
    let reporter: Arc<dyn ProgressReporter> =
        progress.unwrap_or_else(|| Arc::new(NoOpProgress));

    // --- 1. Walk the dropped roots ---
    reporter.set_length(config.paths.len() as u64);
    reporter.set_message(format!("Walking {} root(s)", config.paths.len()));
    let walked = walk(config, token);
    reporter.set_position(config.paths.len() as u64);
    reporter.finish();
    let report = walked?;

    // --- 2. Promote and select ---
    let mut projects = report.projects;
    select(&mut projects, config);
    if projects.iter().all(|p| p.files.is_empty()) {
        return Err(Error::NoFilesFound);
    }
    if !projects.iter().any(|p| p.has_selection()) {
        return Err(Error::NoFilesSelected);
    }

    // --- 3. Render ---
    let document = unify(&projects, config);

    // --- 4. Resolve the destination and write ---
    let contributing: Vec<&Project> = projects.iter().filter(|p| p.has_selection()).collect();
    let destination = match &config.output_destination {
        OutputDestination::SuggestedFile => OutputDestination::File(PathBuf::from(
            output::suggest_output_file_name(&contributing),
        )),
        other => other.clone(),
    };
    output::write_output(&document, &destination)?;

    // --- 5. Remember what was unified ---
    if let OutputDestination::File(path) = &destination {
        log::info!("Saved unified output to '{}'", path.display());
        if config.record_recent {
            let store = recent::RecentStore::open();
            for project in &contributing {
                store.record(project);
            }
        }
    }

    Ok(())
}
