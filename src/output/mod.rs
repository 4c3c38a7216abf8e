// src/output/mod.rs

//! Output handling: suggested file names and destination writing.
//!
//! The renderer produces the unified document as one in-memory string;
//! this module only decides where that string goes.

mod filename;

pub use filename::suggest_output_file_name;

use crate::config::OutputDestination;
use crate::errors::{io_error_with_path, Result};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writes the unified document to the configured destination.
///
/// Stdout and file output get a trailing newline; clipboard content is
/// copied verbatim.
///
/// # Errors
/// Returns [`crate::errors::Error::Io`] when the file or stream cannot be
/// written, or `Error::Clipboard` when the clipboard is unavailable.
pub fn write_output(text: &str, destination: &OutputDestination) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_text(&mut handle, text).map_err(|e| io_error_with_path(e, "<stdout>"))?;
        }
        OutputDestination::File(path) => {
            debug!("Writing unified output to '{}'", path.display());
            let file = File::create(path).map_err(|e| io_error_with_path(e, path))?;
            let mut writer = BufWriter::new(file);
            write_text(&mut writer, text).map_err(|e| io_error_with_path(e, path))?;
        }
        #[cfg(feature = "clipboard")]
        OutputDestination::Clipboard => copy_to_clipboard(text)?,
        // The pipeline resolves SuggestedFile into a concrete File path
        // before writing (see `run` in lib.rs).
        OutputDestination::SuggestedFile => {
            unreachable!("SuggestedFile must be resolved to a concrete path before write_output")
        }
    }
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    if !text.is_empty() {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(feature = "clipboard")]
fn copy_to_clipboard(content: &str) -> Result<()> {
    use crate::errors::Error;
    use arboard::Clipboard;

    let mut clipboard = Clipboard::new()
        .map_err(|e| Error::Clipboard(format!("Failed to initialize clipboard: {}", e)))?;
    clipboard
        .set_text(content)
        .map_err(|e| Error::Clipboard(format!("Failed to set clipboard content: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_to_file_appends_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_output("unified text", &OutputDestination::File(path.clone())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "unified text\n");
    }

    #[test]
    fn test_write_empty_text_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        write_output("", &OutputDestination::File(path.clone())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_unwritable_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let result = write_output("text", &OutputDestination::File(path.clone()));
        match result {
            Err(Error::Io { path: p, .. }) => assert!(p.contains("missing")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
