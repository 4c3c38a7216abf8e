//! Defines application-specific error types.
//!
//! This module provides the [`Error`] enum, which categorizes the named
//! failures of the unification pipeline, offering more context than generic
//! I/O or `anyhow` errors. Skippable per-file conditions (oversized entries,
//! undecodable content, unreadable directories) are *not* errors; they are
//! reported as [`crate::core_types::WalkWarning`]s.

use thiserror::Error;

/// Application-specific errors used throughout `srcunify`.
#[derive(Error, Debug)]
pub enum Error {
    // --- I/O Errors ---
    /// Error occurring during file or directory access (read, write, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String, // Use String to avoid lifetime issues if PathBuf is dropped
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Archive Errors ---
    /// Error reading a ZIP/JAR root that could not be opened as an archive.
    #[error("Failed to read archive '{path}': {source}")]
    Archive {
        /// The archive path.
        path: String,
        /// The underlying decoder error.
        #[source]
        source: zip::result::ZipError,
    },

    // --- Validation Errors ---
    /// A manually added file was given an empty or whitespace-only name.
    #[error("Manual file name must not be empty")]
    EmptyFileName,

    /// A manually added file was given empty content.
    #[error("Manual file content must not be empty")]
    EmptyFileContent,

    /// An operation referenced a project id absent from the working set.
    #[error("No project with id '{0}' in the working set")]
    UnknownProject(String),

    /// A promotion referenced a retained file slot that does not exist.
    #[error("No unrecognized file at index {0} to promote")]
    NoSuchOtherFile(usize),

    // --- Pipeline Errors ---
    /// Unification was requested while no file is selected.
    #[error("No files are selected for unification")]
    NoFilesSelected,

    /// The walk produced no project at all (nothing supported found).
    #[error("No supported files found in the given inputs.")]
    NoFilesFound,

    // --- Configuration Errors ---
    /// Generic error related to invalid configuration settings or combinations.
    /// Often used when validation fails after initial parsing.
    #[error("Invalid configuration: {0}")]
    Config(String),

    // --- Clipboard Errors ---
    /// Error related to clipboard operations (copying).
    #[cfg(feature = "clipboard")]
    #[error("Clipboard error: {0}")]
    Clipboard(String), // arboard::Error doesn't implement std::error::Error directly

    // --- Signal Handling ---
    /// Error indicating that the operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

/// Result alias used by every fallible operation in the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an [`Error::Io`] with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn test_io_error_with_path_helper() {
        let path = PathBuf::from("some/test/path.txt");
        let source_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = io_error_with_path(source_error, &path);

        match error {
            Error::Io {
                path: error_path,
                source,
            } => {
                // Use contains because canonicalization might affect the exact path string
                assert!(error_path.contains("some/test/path.txt"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
                assert!(source.to_string().contains("File not found"));
            }
            _ => panic!("Expected Error::Io"),
        }
    }

    #[test]
    fn test_validation_errors_display() {
        assert_eq!(
            Error::EmptyFileName.to_string(),
            "Manual file name must not be empty"
        );
        assert!(Error::UnknownProject("p-1".into())
            .to_string()
            .contains("p-1"));
    }
}
