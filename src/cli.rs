// src/cli.rs

use clap::Parser;

/// Unifies source files, folders, and archives into one annotated document.
///
/// srcunify walks the given roots (plain files, directory trees, or ZIP/JAR
/// archives), classifies every file against a project profile, groups the
/// recognized ones by Java package or by directory, and concatenates the
/// selected files into a single annotated text document that reads as one
/// body of source.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Files, folders, or ZIP/JAR archives to unify.
    #[arg(value_name = "PATH", required_unless_present = "list_recent")]
    pub paths: Vec<String>,

    // --- Classification Options ---
    /// Project profile deciding which files are recognized: java, web, or all.
    #[arg(long, value_name = "PROFILE", default_value = "java")]
    pub profile: String, // Parsed into a ProfileKind later

    // --- Selection Options ---
    /// Select every recognized file instead of only the profile's defaults.
    #[arg(short = 'a', long, action = clap::ArgAction::SetTrue, conflicts_with_all = &["select", "only_type"])]
    pub select_all: bool,

    /// Select only files whose relative path matches any of these glob patterns (repeatable).
    #[arg(long = "select", value_name = "GLOB", num_args = 1.., conflicts_with = "only_type")]
    pub select: Option<Vec<String>>,

    /// Select only files of these types, e.g. java, html, sql (repeatable).
    #[arg(long = "only-type", value_name = "TYPE", num_args = 1..)]
    pub only_type: Option<Vec<String>>,

    /// Also unify unrecognized files by promoting every retained entry.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub with_other: bool,

    // --- Walking Options ---
    /// Do not respect .gitignore, .ignore, or other VCS ignore files.
    #[arg(short = 't', long, action = clap::ArgAction::SetTrue)]
    pub no_gitignore: bool,

    // --- Rendering Options ---
    /// Comment handling: default, no-banners, remove-past-banners, or remove-all.
    #[arg(long, value_name = "MODE", default_value = "default")]
    pub comments: String, // Parsed into a CommentOption later

    // --- Output Destination ---
    /// Write output to the specified file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<String>, // Using String, convert to PathBuf later

    /// Save output to the suggested file name in the current directory.
    #[arg(short = 's', long, action = clap::ArgAction::SetTrue, conflicts_with = "output_file")]
    pub save: bool,

    #[cfg(feature = "clipboard")]
    /// Copy output to the system clipboard.
    #[arg(short = 'p', long, action = clap::ArgAction::SetTrue, conflicts_with_all = &["output_file", "save"])]
    pub paste: bool,

    // --- Recent Projects ---
    /// List recently unified projects and exit.
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "paths")]
    pub list_recent: bool,

    /// Do not record this run in the recent-projects list.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_recent: bool,
}
