// src/config/builder.rs

//! Converts parsed CLI arguments into a validated [`RunConfig`].

use super::{OutputDestination, RunConfig, SelectionSpec};
use crate::cli::Cli;
use crate::errors::{io_error_with_path, Error, Result};
use crate::profiles::ProfileKind;
use crate::render::CommentOption;
use std::fs;
use std::path::PathBuf;

impl TryFrom<Cli> for RunConfig {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let selection = if cli.select_all {
            SelectionSpec::All
        } else if let Some(patterns) = cli.select {
            SelectionSpec::Globs(compile_globs(&patterns)?)
        } else if let Some(types) = cli.only_type {
            SelectionSpec::Types(types)
        } else {
            SelectionSpec::Default
        };

        #[cfg_attr(not(feature = "clipboard"), allow(unused_mut))]
        let mut output_destination = if let Some(file_path_str) = cli.output_file {
            OutputDestination::File(PathBuf::from(file_path_str))
        } else if cli.save {
            OutputDestination::SuggestedFile
        } else {
            OutputDestination::Stdout
        };
        #[cfg(feature = "clipboard")]
        if cli.paste {
            output_destination = OutputDestination::Clipboard;
        }

        Ok(RunConfig {
            paths: resolve_paths(&cli.paths)?,
            profile: parse_profile(&cli.profile)?,
            comments: parse_comment_option(&cli.comments)?,
            selection,
            with_other: cli.with_other,
            use_ignore_rules: !cli.no_gitignore,
            output_destination,
            record_recent: !cli.no_recent,
        })
    }
}

/// Canonicalizes every root path so project names never degrade to `.` or
/// `..`. A root that cannot be resolved is a hard error.
fn resolve_paths(raw: &[String]) -> Result<Vec<PathBuf>> {
    raw.iter()
        .map(|p| fs::canonicalize(p).map_err(|e| io_error_with_path(e, p)))
        .collect()
}

fn parse_profile(raw: &str) -> Result<ProfileKind> {
    match raw.to_ascii_lowercase().as_str() {
        "java" => Ok(ProfileKind::Java),
        "web" => Ok(ProfileKind::Web),
        "all" => Ok(ProfileKind::All),
        other => Err(Error::Config(format!(
            "Unknown profile '{}' (expected java, web, or all)",
            other
        ))),
    }
}

fn parse_comment_option(raw: &str) -> Result<CommentOption> {
    match raw.to_ascii_lowercase().as_str() {
        "default" => Ok(CommentOption::Default),
        "no-banners" => Ok(CommentOption::NoBanners),
        "remove-past-banners" => Ok(CommentOption::RemovePastBanners),
        "remove-all" => Ok(CommentOption::RemoveAllComments),
        other => Err(Error::Config(format!(
            "Unknown comment mode '{}' (expected default, no-banners, remove-past-banners, or remove-all)",
            other
        ))),
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|raw| {
            glob::Pattern::new(raw)
                .map_err(|e| Error::Config(format!("Invalid selection glob '{}': {}", raw, e)))
        })
        .collect()
}
